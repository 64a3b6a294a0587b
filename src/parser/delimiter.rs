//! Brace and paren depth tracking.
//!
//! The boundary scanner never parses C grammar; it only needs to know when a
//! body or argument group has closed. [`DepthTracker`] keeps the two counters
//! and refuses to let either go negative.

use crate::parser::errors::StructuralError;
use crate::tokenizer::Token;
use crate::SyntaxKind;

/// Tracks nested delimiter depth while scanning tokens.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DepthTracker {
    paren: usize,
    brace: usize,
}

impl DepthTracker {
    /// Update the counters for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] when a closing delimiter arrives at depth 0.
    pub(crate) fn apply(&mut self, token: &Token) -> Result<(), StructuralError> {
        match token.kind() {
            SyntaxKind::T_LPAREN => self.paren += 1,
            SyntaxKind::T_LBRACE => self.brace += 1,
            SyntaxKind::T_RPAREN => {
                self.paren = self
                    .paren
                    .checked_sub(1)
                    .ok_or_else(|| unbalanced(')', token))?;
            }
            SyntaxKind::T_RBRACE => {
                self.brace = self
                    .brace
                    .checked_sub(1)
                    .ok_or_else(|| unbalanced('}', token))?;
            }
            _ => {}
        }
        Ok(())
    }

    #[must_use]
    pub(crate) fn is_top_level(&self) -> bool {
        self.paren == 0 && self.brace == 0
    }
}

fn unbalanced(delimiter: char, token: &Token) -> StructuralError {
    StructuralError::new(delimiter, token.span().clone(), token.line())
}

/// Index of the token closing the group opened at `open`.
///
/// Only tokens in `tokens[open..end]` are considered. Returns `Ok(None)` when
/// the group is still open at `end`.
///
/// # Errors
///
/// Returns [`StructuralError`] for a mismatched closer inside the group.
pub(crate) fn matching_close(
    tokens: &[Token],
    open: usize,
    end: usize,
) -> Result<Option<usize>, StructuralError> {
    let mut depths = DepthTracker::default();
    for (idx, token) in tokens.iter().enumerate().take(end).skip(open) {
        depths.apply(token)?;
        if depths.is_top_level() {
            return Ok(Some(idx));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize_with_trivia;
    use rstest::rstest;

    fn tokens(src: &str) -> Vec<Token> {
        tokenize_with_trivia(src).unwrap_or_else(|e| panic!("lex failed: {e}"))
    }

    #[test]
    fn tracks_nested_depths() {
        let mut depths = DepthTracker::default();
        for token in tokens("{ ( {") {
            assert!(depths.apply(&token).is_ok());
        }
        assert_eq!(depths, DepthTracker { paren: 1, brace: 2 });
        assert!(!depths.is_top_level());
        for token in tokens(") } }") {
            assert!(depths.apply(&token).is_ok());
        }
        assert!(depths.is_top_level());
    }

    #[rstest]
    #[case("}", '}')]
    #[case(")", ')')]
    #[case("( ) )", ')')]
    fn negative_depth_is_structural_error(#[case] src: &str, #[case] delimiter: char) {
        let mut depths = DepthTracker::default();
        let err = tokens(src)
            .iter()
            .find_map(|t| depths.apply(t).err())
            .expect("expected structural error");
        assert_eq!(err.delimiter(), delimiter);
    }

    #[test]
    fn matching_close_skips_nested_groups() {
        let toks = tokens("{ a ( b ) { c } } d");
        let close = matching_close(&toks, 0, toks.len()).unwrap_or_default();
        assert_eq!(close.and_then(|i| toks.get(i)).map(Token::kind), Some(SyntaxKind::T_RBRACE));
        assert_eq!(close, Some(16));
    }

    #[test]
    fn matching_close_reports_open_group() {
        let toks = tokens("( a ( b )");
        assert_eq!(matching_close(&toks, 0, toks.len()), Ok(None));
    }

    #[test]
    fn matching_close_rejects_mismatch() {
        let toks = tokens("( }");
        assert!(matching_close(&toks, 0, toks.len()).is_err());
    }
}
