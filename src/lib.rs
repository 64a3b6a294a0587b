//! Library crate for cscan.
//!
//! Splits C source into top-level declaration units, attaches the comments
//! that belong to each unit and keeps every byte of the input. No C semantics
//! are involved: boundaries come from brace and paren depth and terminator
//! tokens only.
//!
//! ```rust
//! use cscan::{scan_units, UnitKind};
//!
//! let units = scan_units("struct {\n  int a;\n} aaa, *bbb;").expect("valid C");
//! assert_eq!(units.len(), 1);
//! assert_eq!(units[0].kind(), UnitKind::StructDefinition);
//! assert_eq!(units[0].nested_units().len(), 1);
//! assert_eq!(units[0].signature().declarators(), ["aaa", "bbb"]);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod language;
pub mod parser;
pub mod syntax_utils;
pub mod tokenizer;

// Only expose test utilities to tests and opt-in consumers.
#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_util;

pub use config::{ScanOptions, ScanOptionsBuilder};
pub use language::{CLanguage, SyntaxKind};
pub use parser::ast::{Comment, CommentStyle, Signature, UnitKind};
pub use parser::errors::{StructuralError, UnterminatedConstructError};
pub use parser::{Parsed, ScanError, Unit, ast, line_col, parse, parse_with, scan_units};
pub use syntax_utils::parse_parenthesized_list;
pub use tokenizer::{
    LexError, LexErrorKind, Lexer, Span, Token, tokenize_with_trivia, tokenize_without_trivia,
};
