//! `rowan` integration and C syntax kinds.
//!
//! This module defines the `SyntaxKind` enum covering every token produced by
//! the lexer and every node emitted into the unit tree. The enumeration is
//! used by `rowan` to tag syntax tree elements. The `CLanguage` newtype
//! implements `rowan::Language` using conversions provided by `num_derive`.

use num_derive::{FromPrimitive as FromPrimitiveDerive, ToPrimitive as ToPrimitiveDerive};
use num_traits::{FromPrimitive, ToPrimitive};
use rowan::Language as RowanLanguage;
use rowan::SyntaxKind as RowanSyntaxKind;

/// Every possible token or node in the C unit tree.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitiveDerive, ToPrimitiveDerive,
)]
#[repr(u16)]
#[expect(non_camel_case_types, reason = "kind names mirror the rowan T_/N_ convention")]
pub enum SyntaxKind {
    // Tokens
    T_WHITESPACE,
    T_LINE_COMMENT,
    T_BLOCK_COMMENT,
    T_STRING,
    T_CHAR,
    T_PREPROCESSOR,
    T_LBRACE,
    T_RBRACE,
    T_LPAREN,
    T_RPAREN,
    T_SEMI,
    T_COMMA,
    T_WORD,
    // Nodes
    N_TRANSLATION_UNIT,
    N_FUNCTION_DEFINITION,
    N_FUNCTION_PROTOTYPE,
    N_VARIABLE_DECLARATION,
    N_STRUCT_DEFINITION,
    N_UNION_DEFINITION,
    N_ENUM_DEFINITION,
    N_TYPEDEF,
    N_MACRO_DEFINE_PLAIN,
    N_MACRO_DEFINE_FUNCTION_LIKE,
    N_PREPROCESSOR_DIRECTIVE,
    N_EXTERN_BLOCK,
    N_STATEMENT,
    N_OTHER,
    N_PRE_COMMENT,
    N_BODY,
    N_POST_COMMENT,
    // Special
    N_ERROR,
}

impl SyntaxKind {
    /// Whether this kind is a comment token of either style.
    #[must_use]
    pub fn is_comment(self) -> bool {
        matches!(self, Self::T_LINE_COMMENT | Self::T_BLOCK_COMMENT)
    }

    /// Whether this kind is skipped by every stage after the lexer.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        self == Self::T_WHITESPACE || self.is_comment()
    }
}

/// Newtype wrapper allowing `rowan` to store `SyntaxKind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CLanguage;

impl RowanLanguage for CLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: RowanSyntaxKind) -> Self::Kind {
        SyntaxKind::from_u16(raw.0).unwrap_or(SyntaxKind::N_ERROR)
    }

    fn kind_to_raw(kind: Self::Kind) -> RowanSyntaxKind {
        RowanSyntaxKind(
            kind.to_u16()
                .unwrap_or_else(|| unreachable!("all SyntaxKind variants map to u16")),
        )
    }
}
