//! Boundary scanner for top-level C constructs.
//!
//! This module walks the token stream and decides where one declaration unit
//! ends and the next begins. It tracks only brace and paren depth and the
//! terminating tokens: `;` for declarations and statements, the matching `}`
//! for function, `extern` and control-statement bodies, and the directive
//! token itself for preprocessor lines. Struct, union and `extern` bodies are
//! scanned recursively over their inner token range, producing a tree of
//! [`Item`]s.
//!
//! Comments seen between constructs are recorded as items of their own so the
//! attachment resolver can decide who owns them. Comments inside a construct
//! are part of its body text.

use log::debug;

use crate::config::ScanOptions;
use crate::parser::ast::UnitKind;
use crate::parser::delimiter::matching_close;
use crate::parser::errors::{ScanError, StructuralError, UnterminatedConstructError};
use crate::parser::token_stream::TokenStream;
use crate::tokenizer::Token;
use crate::SyntaxKind;

use super::span_scanners::classify::{classify_terminated, has_top_level_word, leading_word};
use super::span_scanners::declarators::{
    function_declarator, top_level_aggregate, top_level_assignment, word,
};
use super::span_scanners::directives::classify_directive;
use super::span_scanners::keywords::is_block_keyword;

/// Where the scanner is relative to the construct being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    AtTopLevel,
    /// After the first token of a construct, before its body or terminator.
    InDeclaratorList,
    /// Inside a struct, union, enum or `extern` body.
    InAggregateBody,
    /// Inside the braces following a function signature.
    InFunctionBody,
    InMacroLine,
}

impl ScanState {
    fn describe(self) -> &'static str {
        match self {
            Self::AtTopLevel => "construct",
            Self::InDeclaratorList => "declaration",
            Self::InAggregateBody => "aggregate body",
            Self::InFunctionBody => "function body",
            Self::InMacroLine => "preprocessor line",
        }
    }
}

/// Token range and kind of one construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Extent {
    pub(crate) kind: UnitKind,
    /// Index of the first token.
    pub(crate) first: usize,
    /// Index of the terminating token.
    pub(crate) last: usize,
    /// Indices of the braces around a function, aggregate or `extern` body.
    pub(crate) body: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Construct {
    pub(crate) extent: Extent,
    pub(crate) nested: Vec<Item>,
}

/// A scanner output element at one nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Item {
    /// Index of a comment token between constructs.
    Comment(usize),
    Construct(Construct),
}

struct BoundaryScanner<'a> {
    stream: TokenStream<'a>,
    options: &'a ScanOptions,
    state: ScanState,
    items: Vec<Item>,
}

/// The construct under construction.
#[derive(Debug, Default)]
struct Pending {
    start: usize,
    /// Significant tokens seen so far, groups included.
    sig: Vec<Token>,
    /// Aggregate kind and brace indices once a body has been consumed.
    body: Option<(UnitKind, usize, usize)>,
    nested: Vec<Item>,
}

impl Pending {
    fn extend(&mut self, tokens: &[Token], open: usize, close: usize) {
        self.sig.extend(
            tokens
                .get(open..=close)
                .unwrap_or_default()
                .iter()
                .filter(|t| !t.kind().is_trivia() && t.kind() != SyntaxKind::T_PREPROCESSOR)
                .cloned(),
        );
    }
}

enum BraceOutcome {
    /// Keep scanning from this index.
    Continue(usize),
    /// The construct ends at the closing brace.
    End(Extent, Vec<Item>),
}

/// Scan every top-level construct in `tokens`.
///
/// # Errors
///
/// Returns [`ScanError::Structural`] for an unmatched closing delimiter and
/// [`ScanError::UnterminatedConstruct`] when input ends inside a construct.
pub(crate) fn scan_items(
    tokens: &[Token],
    src: &str,
    options: &ScanOptions,
) -> Result<Vec<Item>, ScanError> {
    scan_range(tokens, src, options, 0, tokens.len())
}

fn scan_range(
    tokens: &[Token],
    src: &str,
    options: &ScanOptions,
    start: usize,
    end: usize,
) -> Result<Vec<Item>, ScanError> {
    let mut scanner = BoundaryScanner {
        stream: TokenStream::bounded(tokens, src, start, end),
        options,
        state: ScanState::AtTopLevel,
        items: Vec::new(),
    };
    token_dispatch!(scanner, {
        SyntaxKind::T_WHITESPACE => skip_whitespace,
        SyntaxKind::T_LINE_COMMENT | SyntaxKind::T_BLOCK_COMMENT => record_comment,
        SyntaxKind::T_PREPROCESSOR => record_directive,
        SyntaxKind::T_RBRACE | SyntaxKind::T_RPAREN => stray_close,
    }, _ => scan_construct);
    Ok(scanner.items)
}

fn skip_whitespace(sc: &mut BoundaryScanner<'_>) -> Result<(), ScanError> {
    sc.stream.advance();
    Ok(())
}

fn record_comment(sc: &mut BoundaryScanner<'_>) -> Result<(), ScanError> {
    sc.items.push(Item::Comment(sc.stream.cursor()));
    sc.stream.advance();
    Ok(())
}

fn record_directive(sc: &mut BoundaryScanner<'_>) -> Result<(), ScanError> {
    let idx = sc.stream.cursor();
    sc.state = ScanState::InMacroLine;
    let kind = sc
        .stream
        .peek()
        .map_or(UnitKind::PreprocessorDirective, |t| {
            classify_directive(t, sc.stream.src())
        });
    sc.push(
        Extent {
            kind,
            first: idx,
            last: idx,
            body: None,
        },
        Vec::new(),
    );
    Ok(())
}

fn stray_close(sc: &mut BoundaryScanner<'_>) -> Result<(), ScanError> {
    match sc.stream.peek() {
        Some(token) => Err(stray(token).into()),
        None => Ok(()),
    }
}

fn scan_construct(sc: &mut BoundaryScanner<'_>) -> Result<(), ScanError> {
    sc.scan_construct()
}

fn stray(token: &Token) -> StructuralError {
    let delimiter = if token.kind() == SyntaxKind::T_RBRACE {
        '}'
    } else {
        ')'
    };
    StructuralError::new(delimiter, token.span().clone(), token.line())
}

fn is_extern_block(sig: &[Token], src: &str) -> bool {
    matches!(
        sig,
        [keyword, literal]
            if word(keyword, src) == Some("extern") && literal.kind() == SyntaxKind::T_STRING
    )
}

impl BoundaryScanner<'_> {
    fn scan_construct(&mut self) -> Result<(), ScanError> {
        let start = self.stream.cursor();
        self.state = ScanState::InDeclaratorList;
        let mut pending = Pending {
            start,
            ..Pending::default()
        };
        let mut idx = start;
        loop {
            let Some(token) = self.stream.get(idx) else {
                return Err(self.unterminated(start));
            };
            match token.kind() {
                kind if kind.is_trivia() || kind == SyntaxKind::T_PREPROCESSOR => idx += 1,
                SyntaxKind::T_LPAREN => {
                    let close = self.close_of(start, idx)?;
                    pending.extend(self.stream.tokens(), idx, close);
                    idx = close + 1;
                }
                SyntaxKind::T_RPAREN | SyntaxKind::T_RBRACE => return Err(stray(token).into()),
                SyntaxKind::T_LBRACE => match self.open_brace(&mut pending, idx)? {
                    BraceOutcome::Continue(next) => idx = next,
                    BraceOutcome::End(extent, nested) => {
                        self.push(extent, nested);
                        return Ok(());
                    }
                },
                SyntaxKind::T_SEMI if self.continues_after_semi(&pending, idx) => idx += 1,
                SyntaxKind::T_SEMI => {
                    let src = self.stream.src();
                    let kind = classify_terminated(
                        &pending.sig,
                        src,
                        self.options,
                        pending.body.map(|(kind, _, _)| kind),
                    );
                    let body = pending.body.map(|(_, open, close)| (open, close));
                    let nested = if kind.has_nested_units() {
                        std::mem::take(&mut pending.nested)
                    } else {
                        Vec::new()
                    };
                    self.push(
                        Extent {
                            kind,
                            first: start,
                            last: idx,
                            body,
                        },
                        nested,
                    );
                    return Ok(());
                }
                _ => {
                    pending.sig.push(token.clone());
                    idx += 1;
                }
            }
        }
    }

    /// Decide what a top-level `{` inside the current construct opens.
    fn open_brace(&mut self, pending: &mut Pending, open: usize) -> Result<BraceOutcome, ScanError> {
        let src = self.stream.src();
        let start = pending.start;

        if top_level_assignment(&pending.sig, src).is_some() {
            let close = self.close_of(start, open)?;
            pending.extend(self.stream.tokens(), open, close);
            return Ok(BraceOutcome::Continue(close + 1));
        }

        if is_extern_block(&pending.sig, src) {
            self.state = ScanState::InAggregateBody;
            let close = self.close_of(start, open)?;
            let nested = self.scan_body(open, close)?;
            return Ok(BraceOutcome::End(
                Extent {
                    kind: UnitKind::ExternBlock,
                    first: start,
                    last: close,
                    body: Some((open, close)),
                },
                nested,
            ));
        }

        match leading_word(&pending.sig, src) {
            Some("do") => {
                let close = self.close_of(start, open)?;
                pending.extend(self.stream.tokens(), open, close);
                return Ok(BraceOutcome::Continue(close + 1));
            }
            Some(keyword) if is_block_keyword(keyword) => {
                let close = self.close_of(start, open)?;
                pending.extend(self.stream.tokens(), open, close);
                if self.stream.next_word_is(close, "else") {
                    return Ok(BraceOutcome::Continue(close + 1));
                }
                return Ok(BraceOutcome::End(
                    Extent {
                        kind: UnitKind::Statement,
                        first: start,
                        last: close,
                        body: None,
                    },
                    Vec::new(),
                ));
            }
            _ => {}
        }

        if function_declarator(&pending.sig, src, self.options).is_some() {
            self.state = ScanState::InFunctionBody;
            let close = self.close_of(start, open)?;
            return Ok(BraceOutcome::End(
                Extent {
                    kind: UnitKind::FunctionDefinition,
                    first: start,
                    last: close,
                    body: Some((open, close)),
                },
                Vec::new(),
            ));
        }

        if pending.body.is_none()
            && let Some((_, kind)) = top_level_aggregate(&pending.sig, src)
        {
            self.state = ScanState::InAggregateBody;
            let close = self.close_of(start, open)?;
            pending.nested = if kind.has_nested_units() {
                self.scan_body(open, close)?
            } else {
                Vec::new()
            };
            pending.extend(self.stream.tokens(), open, close);
            pending.body = Some((kind, open, close));
            self.state = ScanState::InDeclaratorList;
            return Ok(BraceOutcome::Continue(close + 1));
        }

        let close = self.close_of(start, open)?;
        let kind = if pending.sig.is_empty() {
            UnitKind::Statement
        } else {
            UnitKind::Other
        };
        Ok(BraceOutcome::End(
            Extent {
                kind,
                first: start,
                last: close,
                body: None,
            },
            Vec::new(),
        ))
    }

    /// Whether a `;` at `idx` leaves the construct open: an `if` followed by
    /// `else`, or a `do` body still waiting for its `while`.
    fn continues_after_semi(&self, pending: &Pending, idx: usize) -> bool {
        let src = self.stream.src();
        match leading_word(&pending.sig, src) {
            Some("if" | "else") => self.stream.next_word_is(idx, "else"),
            Some("do") => !has_top_level_word(
                pending.sig.get(1..).unwrap_or_default(),
                src,
                "while",
            ),
            _ => false,
        }
    }

    fn scan_body(&self, open: usize, close: usize) -> Result<Vec<Item>, ScanError> {
        debug!("scanning body between tokens {open} and {close}");
        scan_range(
            self.stream.tokens(),
            self.stream.src(),
            self.options,
            open + 1,
            close,
        )
    }

    fn close_of(&self, start: usize, open: usize) -> Result<usize, ScanError> {
        matching_close(self.stream.tokens(), open, self.stream.end())?
            .ok_or_else(|| self.unterminated(start))
    }

    fn unterminated(&self, start: usize) -> ScanError {
        let tokens = self.stream.tokens();
        let first = tokens.get(start);
        let begin = first.map_or(0, |t| t.span().start);
        let end = self
            .stream
            .end()
            .checked_sub(1)
            .and_then(|last| tokens.get(last))
            .map_or(begin, |t| t.span().end);
        UnterminatedConstructError::new(
            self.state.describe(),
            begin..end,
            first.map_or(1, Token::line),
        )
        .into()
    }

    fn push(&mut self, extent: Extent, nested: Vec<Item>) {
        debug!(
            "{} spans tokens {}..={} ({} nested)",
            extent.kind,
            extent.first,
            extent.last,
            nested.len()
        );
        self.items.push(Item::Construct(Construct { extent, nested }));
        self.stream.seek(extent.last + 1);
        self.state = ScanState::AtTopLevel;
    }
}
