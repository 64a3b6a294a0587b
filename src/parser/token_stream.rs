//! Token stream utilities.
//!
//! Provides a cursor over a bounded window of a token slice so the boundary
//! scanner can walk one body without index arithmetic scattered through it.
//! Indices returned by the stream are always positions in the full slice.
//!
//! ```rust,ignore
//! use cscan::tokenize_with_trivia;
//! use cscan::parser::token_stream::TokenStream;
//!
//! let src = "int x; /* c */";
//! let tokens = tokenize_with_trivia(src)?;
//! let mut stream = TokenStream::bounded(&tokens, src, 0, tokens.len());
//! assert_eq!(stream.next_significant(0), Some(0));
//! stream.seek(tokens.len());
//! assert!(stream.peek().is_none());
//! ```

use crate::SyntaxKind;
use crate::tokenizer::Token;

#[derive(Debug, Clone)]
pub(crate) struct TokenStream<'a> {
    tokens: &'a [Token],
    src: &'a str,
    cursor: usize,
    end: usize,
}

impl<'a> TokenStream<'a> {
    /// Constructs a stream over `tokens[start..end]`.
    ///
    /// Used for the inside of aggregate and `extern` bodies, where `end` is the
    /// index of the closing brace.
    #[must_use]
    pub(crate) fn bounded(tokens: &'a [Token], src: &'a str, start: usize, end: usize) -> Self {
        let end = end.min(tokens.len());
        Self {
            tokens,
            src,
            cursor: start.min(end),
            end,
        }
    }

    #[must_use]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index one past the last token in the window.
    #[must_use]
    pub(crate) fn end(&self) -> usize {
        self.end
    }

    /// Returns the token at the cursor, or `None` at the end of the window.
    #[must_use]
    pub(crate) fn peek(&self) -> Option<&'a Token> {
        self.get(self.cursor)
    }

    /// Returns the token at `idx` when it lies inside the window.
    #[must_use]
    pub(crate) fn get(&self, idx: usize) -> Option<&'a Token> {
        if idx < self.end {
            self.tokens.get(idx)
        } else {
            None
        }
    }

    /// Moves the cursor forward by one token unless already at the end.
    pub(crate) fn advance(&mut self) {
        if self.cursor < self.end {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to `idx`, clamped to the window.
    pub(crate) fn seek(&mut self, idx: usize) {
        self.cursor = idx.min(self.end);
    }

    /// The underlying token slice, including tokens outside the window.
    #[must_use]
    pub(crate) fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    #[must_use]
    pub(crate) fn src(&self) -> &'a str {
        self.src
    }

    /// First index at or after `from` holding a token that is neither
    /// whitespace nor a comment.
    #[must_use]
    pub(crate) fn next_significant(&self, from: usize) -> Option<usize> {
        (from..self.end).find(|&idx| self.get(idx).is_some_and(|t| !t.kind().is_trivia()))
    }

    /// Whether the next significant token after `idx` is the word `word`.
    #[must_use]
    pub(crate) fn next_word_is(&self, idx: usize, word: &str) -> bool {
        self.next_significant(idx + 1)
            .and_then(|next| self.get(next))
            .is_some_and(|t| t.kind() == SyntaxKind::T_WORD && t.text(self.src) == word)
    }
}
