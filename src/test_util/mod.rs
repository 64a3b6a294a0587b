//! Helpers for tokenising fixtures and asserting over scanned units in tests.
//!
//! These functions reduce boilerplate when checking unit kinds, comment
//! attachment and error locations.

mod assertions;

pub use assertions::{assert_scan_error, assert_unit, kinds, units};

use crate::tokenizer::Token;
use crate::tokenize_with_trivia;

/// Tokenize `src` with [`tokenize_with_trivia`], panicking on lex errors.
///
/// # Examples
///
/// ```rust,no_run
/// # #[cfg(feature = "test-support")]
/// # {
/// use cscan::test_util::tokenize;
/// assert!(tokenize("int x;").len() > 0);
/// # }
/// ```
///
/// # Panics
/// Panics if `src` does not lex.
#[must_use]
#[track_caller]
pub fn tokenize(src: &str) -> Vec<Token> {
    tokenize_with_trivia(src).unwrap_or_else(|e| panic!("lex failed: {e}"))
}
