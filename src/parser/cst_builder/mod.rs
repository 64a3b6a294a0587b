//! Unit emission and CST construction.
//!
//! Provides [`Parsed`], the unit builder and [`build_green_tree`].

use rowan::GreenNode;

use crate::config::ScanOptions;
use crate::parser::ast::{Comment, Root, Signature, Unit, UnitKind, extract_signature};
use crate::parser::comments::{Slot, UnitSlot};
use crate::tokenizer::Token;
use crate::Span;

mod spans;
mod tree;

pub use self::spans::{UnitSpanIssue, UnitSpanIssueKind, UnitSpanValidationError};
pub(crate) use self::spans::validate_units;
pub(crate) use self::tree::build_green_tree;

/// Result of a successful scan.
#[derive(Debug)]
pub struct Parsed {
    green: GreenNode,
    root: Root,
    units: Vec<Unit>,
    tokens: Vec<Token>,
    source: String,
    start_offset: usize,
}

impl Parsed {
    pub(super) fn new(
        green: GreenNode,
        units: Vec<Unit>,
        tokens: Vec<Token>,
        source: &str,
        start_offset: usize,
    ) -> Self {
        Self {
            root: Root::from_green(green.clone()),
            green,
            units,
            tokens,
            source: source.to_string(),
            start_offset,
        }
    }

    /// Access the `rowan` green tree.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Access the typed CST root.
    #[must_use]
    pub fn root(&self) -> &Root {
        &self.root
    }

    /// Top-level units in source order.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Consume the result, keeping only the units.
    #[must_use]
    pub fn into_units(self) -> Vec<Unit> {
        self.units
    }

    /// Every token of the scanned range, trivia included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The scanned text, reconstructed from the tree.
    #[must_use]
    pub fn text(&self) -> String {
        self.root.text()
    }

    /// Offset at which scanning started.
    #[must_use]
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Convert a byte offset in the original buffer into a 1-based
    /// `(line, column)` pair. Columns count characters.
    ///
    /// Returns `None` when `offset` is past the end of the buffer or not on a
    /// character boundary.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> Option<(usize, usize)> {
        line_col(&self.source, offset)
    }
}

/// 1-based `(line, column)` of byte `offset` in `src`, counting columns in
/// characters.
///
/// Returns `None` when `offset` is past the end of `src` or not on a
/// character boundary.
///
/// # Examples
///
/// ```
/// assert_eq!(cscan::line_col("int a;\nint b;", 11), Some((2, 5)));
/// assert_eq!(cscan::line_col("é", 1), None);
/// ```
#[must_use]
pub fn line_col(src: &str, offset: usize) -> Option<(usize, usize)> {
    let before = src.get(..offset)?;
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |nl| nl + 1);
    let column = before.get(line_start..)?.chars().count() + 1;
    Some((line, column))
}

/// Assembles [`Unit`] records from resolved slots.
pub(crate) struct UnitEmitter<'a> {
    tokens: &'a [Token],
    src: &'a str,
    options: &'a ScanOptions,
}

impl<'a> UnitEmitter<'a> {
    pub(crate) fn new(tokens: &'a [Token], src: &'a str, options: &'a ScanOptions) -> Self {
        Self {
            tokens,
            src,
            options,
        }
    }

    pub(crate) fn emit(&self, slots: &[Slot]) -> Vec<Unit> {
        slots
            .iter()
            .filter_map(|slot| match slot {
                Slot::Floating(idx) => self.floating(*idx),
                Slot::Unit(unit) => self.unit(unit),
            })
            .collect()
    }

    fn comment(&self, idx: Option<usize>) -> Option<Comment> {
        idx.and_then(|i| self.tokens.get(i))
            .map(|token| Comment::from_token(token, self.src))
    }

    fn text(&self, span: &Span) -> String {
        self.src.get(span.clone()).unwrap_or_default().to_string()
    }

    fn floating(&self, idx: usize) -> Option<Unit> {
        let token = self.tokens.get(idx)?;
        Some(Unit {
            kind: UnitKind::Other,
            pre_comment: None,
            body_span: token.span().clone(),
            body_text: self.text(token.span()),
            post_comment: None,
            nested: Vec::new(),
            line: token.line(),
            signature: Signature::default(),
        })
    }

    fn unit(&self, slot: &UnitSlot) -> Option<Unit> {
        let extent = &slot.extent;
        let first = self.tokens.get(extent.first)?;
        let last = self.tokens.get(extent.last)?;
        let body_span = first.span().start..last.span().end;
        Some(Unit {
            kind: extent.kind,
            pre_comment: self.comment(slot.pre),
            body_text: self.text(&body_span),
            body_span,
            post_comment: self.comment(slot.post),
            nested: self.emit(&slot.nested),
            line: first.line(),
            signature: extract_signature(extent, self.tokens, self.src, self.options),
        })
    }
}
