//! Error types reported by a scan.
//!
//! Every failure is fatal to the scan that raised it. Each error carries the
//! byte offset and span of the token that opened (or broke) the offending
//! construct so callers can point at the source precisely.

use thiserror::Error;

use super::cst_builder::UnitSpanValidationError;
use crate::tokenizer::LexError;
use crate::Span;

/// A closing delimiter with no matching opener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unbalanced `{delimiter}` at line {line} (offset {offset})")]
pub struct StructuralError {
    delimiter: char,
    offset: usize,
    span: Span,
    line: usize,
}

impl StructuralError {
    pub(crate) fn new(delimiter: char, span: Span, line: usize) -> Self {
        Self {
            delimiter,
            offset: span.start,
            span,
            line,
        }
    }

    /// The unmatched delimiter, `}` or `)`.
    #[must_use]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Byte offset of the unmatched delimiter.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Span of the unmatched delimiter.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 1-based line of the unmatched delimiter.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

/// A construct still open when the buffer ran out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unterminated {context} starting at line {line} (offset {offset})")]
pub struct UnterminatedConstructError {
    context: &'static str,
    offset: usize,
    span: Span,
    line: usize,
}

impl UnterminatedConstructError {
    pub(crate) fn new(context: &'static str, span: Span, line: usize) -> Self {
        Self {
            context,
            offset: span.start,
            span,
            line,
        }
    }

    /// What the scanner was inside when input ended, e.g. `function body`.
    #[must_use]
    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Byte offset of the construct's first token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Span from the construct's first token to the end of the scanned range.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 1-based line of the construct's first token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

/// Any failure of [`parse`](crate::parse) and friends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The lexer hit an unterminated comment, literal or continuation.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Brace or paren depth went negative.
    #[error(transparent)]
    Structural(#[from] StructuralError),
    /// End of input inside an open construct.
    #[error(transparent)]
    UnterminatedConstruct(#[from] UnterminatedConstructError),
    /// The requested start offset is not a character boundary of the buffer.
    #[error("start offset {offset} is not a character boundary in a buffer of {len} bytes")]
    InvalidOffset {
        /// The rejected offset.
        offset: usize,
        /// Length of the buffer in bytes.
        len: usize,
    },
    /// The emitted units do not partition the buffer.
    #[error("internal scanner error: {0}")]
    Internal(#[from] UnitSpanValidationError),
}

impl ScanError {
    /// Byte offset the error points at.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::Lex(e) => e.offset(),
            Self::Structural(e) => e.offset(),
            Self::UnterminatedConstruct(e) => e.offset(),
            Self::InvalidOffset { offset, .. } => *offset,
            Self::Internal(e) => e.issues().first().map_or(0, |issue| issue.next().start),
        }
    }

    /// Span of the offending token or construct.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span().clone(),
            Self::Structural(e) => e.span().clone(),
            Self::UnterminatedConstruct(e) => e.span().clone(),
            Self::InvalidOffset { offset, .. } => *offset..*offset,
            Self::Internal(e) => e
                .issues()
                .first()
                .map_or(0..0, |issue| issue.next().clone()),
        }
    }
}
