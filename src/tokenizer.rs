//! Lexical analysis for C source.
//!
//! This module exposes the lazy [`Lexer`] together with the eager
//! `tokenize_with_trivia` and `tokenize_without_trivia` helpers which convert
//! raw source text into a sequence of [`Token`]s. It uses the `logos` crate to
//! recognise tokens so that every byte of the input lands in exactly one token
//! and the unit tree can mirror the input exactly.
//!
//! Comments, literals and preprocessor lines need context that a plain regex
//! cannot express (escapes, terminators, line starts, continuations), so they
//! are matched on their opening character and finished by callbacks that walk
//! the remainder of the buffer.

use logos::Logos;
use thiserror::Error;

use crate::SyntaxKind;

/// Byte range for a token within the source.
pub type Span = std::ops::Range<usize>;

/// Failure raised by a token callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RawFault {
    /// Input matched no rule. The catch-all rule makes this unreachable for
    /// valid UTF-8, but `logos` requires a default error.
    #[default]
    Unrecognised,
    Unterminated(LexErrorKind),
}

/// Whether a `#` opens a directive or is an ordinary character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HashRole {
    Directive,
    Stray,
}

/// The extras flag records whether the lexed slice starts after non-blank text
/// on the same line, so a `#` at the very start of the slice is not a
/// directive.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = RawFault)]
#[logos(extras = bool)]
enum RawToken {
    #[regex(r"[ \t\r\n\x0B\x0C]+")]
    Whitespace,
    #[token("/*", block_comment)]
    BlockComment,
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("\"", string_literal)]
    String,
    #[token("'", char_literal)]
    Char,
    #[token("#", hash)]
    Hash(HashRole),
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,
    #[regex(r"[0-9][A-Za-z0-9_.]*")]
    Number,
    #[token("/")]
    Slash,
    #[regex(r"[^ \t\r\n\x0B\x0C(){};,\x22'#/A-Za-z0-9_]")]
    Punct,
}

impl RawToken {
    fn kind(self) -> SyntaxKind {
        match self {
            Self::Whitespace => SyntaxKind::T_WHITESPACE,
            Self::BlockComment => SyntaxKind::T_BLOCK_COMMENT,
            Self::LineComment => SyntaxKind::T_LINE_COMMENT,
            Self::String => SyntaxKind::T_STRING,
            Self::Char => SyntaxKind::T_CHAR,
            Self::Hash(HashRole::Directive) => SyntaxKind::T_PREPROCESSOR,
            Self::LBrace => SyntaxKind::T_LBRACE,
            Self::RBrace => SyntaxKind::T_RBRACE,
            Self::LParen => SyntaxKind::T_LPAREN,
            Self::RParen => SyntaxKind::T_RPAREN,
            Self::Semi => SyntaxKind::T_SEMI,
            Self::Comma => SyntaxKind::T_COMMA,
            Self::Hash(HashRole::Stray)
            | Self::Ident
            | Self::Number
            | Self::Slash
            | Self::Punct => SyntaxKind::T_WORD,
        }
    }
}

fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> Result<(), RawFault> {
    let rest = lex.remainder();
    let Some(end) = rest.find("*/") else {
        lex.bump(rest.len());
        return Err(RawFault::Unterminated(
            LexErrorKind::UnterminatedBlockComment,
        ));
    };
    lex.bump(end + 2);
    Ok(())
}

fn string_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Result<(), RawFault> {
    quoted(lex, b'"', LexErrorKind::UnterminatedString)
}

fn char_literal(lex: &mut logos::Lexer<'_, RawToken>) -> Result<(), RawFault> {
    quoted(lex, b'\'', LexErrorKind::UnterminatedChar)
}

fn quoted(
    lex: &mut logos::Lexer<'_, RawToken>,
    quote: u8,
    fault: LexErrorKind,
) -> Result<(), RawFault> {
    let rest = lex.remainder();
    let Some(close) = find_closing_quote(rest.as_bytes(), 0, quote, false) else {
        lex.bump(rest.len());
        return Err(RawFault::Unterminated(fault));
    };
    lex.bump(close + 1);
    Ok(())
}

/// Find the index of the quote closing a literal whose body starts at `from`.
///
/// Backslash escapes the following byte. With `stop_at_newline` an unescaped
/// line break ends the search without a match.
fn find_closing_quote(bytes: &[u8], from: usize, quote: u8, stop_at_newline: bool) -> Option<usize> {
    let mut idx = from;
    while let Some(&byte) = bytes.get(idx) {
        match byte {
            b'\\' => idx += 2,
            b'\n' if stop_at_newline => return None,
            b if b == quote => return Some(idx),
            _ => idx += 1,
        }
    }
    None
}

fn hash(lex: &mut logos::Lexer<'_, RawToken>) -> Result<HashRole, RawFault> {
    let before = lex.source().get(..lex.span().start).unwrap_or("");
    let (line_prefix, starts_mid_line) = before
        .rfind('\n')
        .map_or((before, lex.extras), |nl| (before.get(nl + 1..).unwrap_or(""), false));
    if starts_mid_line || !is_blank(line_prefix) {
        return Ok(HashRole::Stray);
    }
    let rest = lex.remainder();
    let len = match directive_len(rest.as_bytes()) {
        Ok(len) => len,
        Err(fault) => {
            lex.bump(rest.len());
            return Err(fault);
        }
    };
    lex.bump(len);
    Ok(HashRole::Directive)
}

fn is_blank(text: &str) -> bool {
    text.bytes().all(is_inline_space)
}

fn is_inline_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | 0x0B | 0x0C)
}

/// Length of a directive body following its `#`.
///
/// The body runs to the end of the logical line, excluding trailing
/// whitespace. A comment that closes the final physical line is left out so
/// that it becomes a token of its own.
fn directive_len(bytes: &[u8]) -> Result<usize, RawFault> {
    let mut idx = 0;
    let mut end = 0;
    loop {
        match bytes.get(idx) {
            None | Some(b'\n') => return Ok(end),
            Some(b'\\') => {
                let mut next = idx + 1;
                while bytes.get(next).copied().is_some_and(is_inline_space) {
                    next += 1;
                }
                match bytes.get(next) {
                    Some(b'\n') if next + 1 < bytes.len() => {
                        end = idx + 1;
                        idx = next + 1;
                    }
                    Some(b'\n') | None => {
                        return Err(RawFault::Unterminated(
                            LexErrorKind::UnterminatedContinuation,
                        ));
                    }
                    Some(_) => {
                        idx += 1;
                        end = idx;
                    }
                }
            }
            Some(b'/') if bytes.get(idx + 1) == Some(&b'/') => return Ok(end),
            Some(b'/') if bytes.get(idx + 1) == Some(&b'*') => {
                let Some(close) = find_comment_close(bytes, idx + 2) else {
                    // Leave the unterminated comment to be reported on its own.
                    return Ok(end);
                };
                if rest_of_line_is_blank(bytes, close) {
                    return Ok(end);
                }
                idx = close;
                end = close;
            }
            Some(&quote @ (b'"' | b'\'')) => {
                idx = find_closing_quote(bytes, idx + 1, quote, true).map_or(idx + 1, |q| q + 1);
                end = idx;
            }
            Some(&byte) if is_inline_space(byte) => idx += 1,
            Some(_) => {
                idx += 1;
                end = idx;
            }
        }
    }
}

/// Index just past the `*/` that closes a block comment body starting at `from`.
fn find_comment_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut idx = from;
    while let Some(&byte) = bytes.get(idx) {
        if byte == b'*' && bytes.get(idx + 1) == Some(&b'/') {
            return Some(idx + 2);
        }
        idx += 1;
    }
    None
}

fn rest_of_line_is_blank(bytes: &[u8], from: usize) -> bool {
    let mut idx = from;
    loop {
        match bytes.get(idx) {
            None | Some(b'\n') => return true,
            Some(&byte) if is_inline_space(byte) => idx += 1,
            Some(_) => return false,
        }
    }
}

/// What went wrong while lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A `/*` without a matching `*/`.
    #[error("unterminated block comment")]
    UnterminatedBlockComment,
    /// A string literal reaching the end of the buffer.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A character literal reaching the end of the buffer.
    #[error("unterminated character literal")]
    UnterminatedChar,
    /// A preprocessor line ending in `\` at the end of the buffer.
    #[error("unterminated preprocessor continuation")]
    UnterminatedContinuation,
}

/// A lexing failure, located at the opening token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line} (offset {offset})")]
pub struct LexError {
    kind: LexErrorKind,
    offset: usize,
    span: Span,
    line: usize,
}

impl LexError {
    fn new(kind: LexErrorKind, span: Span, line: usize) -> Self {
        Self {
            kind,
            offset: span.start,
            span,
            line,
        }
    }

    /// The failure category.
    #[must_use]
    pub fn kind(&self) -> LexErrorKind {
        self.kind
    }

    /// Byte offset of the opening token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Span from the opening token to the end of the buffer.
    ///
    /// Every unterminated construct runs to the end of input, so the span
    /// always ends at the buffer length.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 1-based line of the opening token.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

/// One classified slice of the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: SyntaxKind,
    span: Span,
    line: usize,
}

impl Token {
    /// Construct a token directly, mainly for tests and tree building.
    #[must_use]
    pub fn new(kind: SyntaxKind, span: Span, line: usize) -> Self {
        Self { kind, span, line }
    }

    /// The token classification.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    /// Byte range within the source.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 1-based line on which the token starts.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Borrow the token text from `src`.
    #[must_use]
    pub fn text<'src>(&self, src: &'src str) -> &'src str {
        src.get(self.span.clone()).unwrap_or("")
    }
}

/// Lazy token iterator over a source buffer.
///
/// Scanning stops after the first [`LexError`]; the iterator is fused from
/// then on.
///
/// # Examples
///
/// ```rust
/// use cscan::{Lexer, SyntaxKind};
///
/// let kinds: Vec<SyntaxKind> = Lexer::new("int x;")
///     .map(|tok| tok.map(|t| t.kind()))
///     .collect::<Result<_, _>>()
///     .unwrap_or_default();
/// assert_eq!(kinds.last(), Some(&SyntaxKind::T_SEMI));
/// ```
#[derive(Debug)]
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    src: &'src str,
    offset: usize,
    line: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    /// Lex `src` from its first byte.
    #[must_use]
    pub fn new(src: &'src str) -> Self {
        Self {
            inner: RawToken::lexer(src),
            src,
            offset: 0,
            line: 1,
            done: false,
        }
    }

    /// Lex `src` starting at byte `offset`.
    ///
    /// Returns `None` when `offset` is past the end of `src` or not on a
    /// character boundary. Spans and line numbers stay relative to the whole
    /// buffer.
    #[must_use]
    pub fn with_offset(src: &'src str, offset: usize) -> Option<Self> {
        let tail = src.get(offset..)?;
        let before = src.get(..offset)?;
        let starts_mid_line = before.rsplit('\n').next().is_some_and(|line| !is_blank(line));
        Some(Self {
            inner: RawToken::lexer_with_extras(tail, starts_mid_line),
            src,
            offset,
            line: 1 + count_newlines(before),
            done: false,
        })
    }
}

fn count_newlines(text: &str) -> usize {
    text.bytes().filter(|b| *b == b'\n').count()
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.inner.next()?;
        let local = self.inner.span();
        let span = local.start + self.offset..local.end + self.offset;
        let line = self.line;
        let kind = match result {
            Ok(raw) => raw.kind(),
            Err(RawFault::Unrecognised) => SyntaxKind::T_WORD,
            Err(RawFault::Unterminated(kind)) => {
                self.done = true;
                return Some(Err(LexError::new(kind, span, line)));
            }
        };
        let text = self.src.get(span.clone()).unwrap_or("");
        self.line += count_newlines(text);
        Some(Ok(Token::new(kind, span, line)))
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenise the source, excluding whitespace and comments.
///
/// Returns only significant tokens, which is what classification helpers
/// work on.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
///
/// # Examples
///
/// ```rust
/// use cscan::{tokenize_without_trivia, SyntaxKind};
///
/// let tokens = tokenize_without_trivia("int x; /* c */").unwrap_or_default();
/// assert!(!tokens.iter().any(|t| t.kind().is_trivia()));
/// ```
pub fn tokenize_without_trivia(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src)
        .filter(|tok| tok.as_ref().map_or(true, |t| !t.kind().is_trivia()))
        .collect()
}

/// Tokenise the provided C source.
///
/// This variant retains whitespace and comment tokens; concatenating the
/// token texts reproduces `src`.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
///
/// # Examples
///
/// ```rust
/// use cscan::{tokenize_with_trivia, SyntaxKind};
///
/// let tokens = tokenize_with_trivia("int x;").unwrap_or_default();
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].kind(), SyntaxKind::T_WORD);
/// ```
pub fn tokenize_with_trivia(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src).collect()
}
