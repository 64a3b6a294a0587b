//! Helpers used by the boundary scanner and signature extraction.
//!
//! Each submodule covers one concern, keeping the state machine in
//! `span_scanner` focused on boundaries: keyword tables, declarator analysis,
//! directive headers and the classification of `;`-terminated constructs.

use std::ops::Range;

use crate::tokenizer::Token;
use crate::SyntaxKind;

pub(crate) mod classify;
pub(crate) mod declarators;
pub(crate) mod directives;
pub(crate) mod keywords;

#[cfg(test)]
mod tests;

/// Tokens in `range` that take part in classification: everything except
/// whitespace, comments and embedded directives.
pub(crate) fn significant_tokens(tokens: &[Token], range: Range<usize>) -> Vec<Token> {
    tokens
        .get(range)
        .unwrap_or_default()
        .iter()
        .filter(|t| !t.kind().is_trivia() && t.kind() != SyntaxKind::T_PREPROCESSOR)
        .cloned()
        .collect()
}
