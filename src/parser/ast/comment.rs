//! Comments attached to units.

use crate::tokenizer::Token;
use crate::{Span, SyntaxKind};

/// Lexical form of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentStyle {
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
}

/// A comment token lifted out of the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    style: CommentStyle,
    text: String,
    span: Span,
    line: usize,
}

impl Comment {
    pub(crate) fn from_token(token: &Token, src: &str) -> Self {
        let style = if token.kind() == SyntaxKind::T_LINE_COMMENT {
            CommentStyle::Line
        } else {
            CommentStyle::Block
        };
        Self {
            style,
            text: token.text(src).to_string(),
            span: token.span().clone(),
            line: token.line(),
        }
    }

    /// Block or line comment.
    #[must_use]
    pub fn style(&self) -> CommentStyle {
        self.style
    }

    /// Full comment text including its delimiters.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte range in the source.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// 1-based line on which the comment starts.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize_with_trivia;
    use rstest::rstest;

    #[rstest]
    #[case("/* a */", CommentStyle::Block)]
    #[case("// a", CommentStyle::Line)]
    fn style_follows_token_kind(#[case] src: &str, #[case] style: CommentStyle) {
        let tokens = tokenize_with_trivia(src).unwrap_or_default();
        let comment = tokens
            .first()
            .map(|t| Comment::from_token(t, src))
            .expect("comment token");
        assert_eq!(comment.style(), style);
        assert_eq!(comment.text(), src);
        assert_eq!(comment.span(), &(0..src.len()));
        assert_eq!(comment.line(), 1);
    }
}
