//! Keyword tables consulted by the classifiers.
//!
//! The scanner does not need a closed keyword set to find boundaries; these
//! tables only refine the kind assigned to a construct once it is closed.

use phf::{phf_map, phf_set};

use crate::parser::ast::UnitKind;

/// Words that start a statement rather than a declaration.
static STATEMENT_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "if", "else", "for", "while", "do", "switch", "case", "default",
    "return", "goto", "break", "continue",
};

/// Statement words followed by a block that may end the construct.
static BLOCK_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "if", "else", "for", "while", "switch",
};

static AGGREGATE_KEYWORDS: phf::Map<&'static str, UnitKind> = phf_map! {
    "struct" => UnitKind::StructDefinition,
    "union" => UnitKind::UnionDefinition,
    "enum" => UnitKind::EnumDefinition,
};

/// Words that never name a parameter on their own.
static TYPE_WORDS: phf::Set<&'static str> = phf_set! {
    "void", "char", "short", "int", "long", "float", "double", "signed",
    "unsigned", "_Bool", "bool", "_Complex", "const", "volatile", "restrict",
    "register", "struct", "union", "enum",
};

/// Single-character words that mark an expression.
static EXPRESSION_OPERATORS: phf::Set<&'static str> = phf_set! {
    "+", "-", "%", "&", "|", "^", "~", ".", "?", "!", "<", ">", "/",
};

#[must_use]
pub(crate) fn is_statement_keyword(word: &str) -> bool {
    STATEMENT_KEYWORDS.contains(word)
}

#[must_use]
pub(crate) fn is_block_keyword(word: &str) -> bool {
    BLOCK_KEYWORDS.contains(word)
}

#[must_use]
pub(crate) fn aggregate_kind(word: &str) -> Option<UnitKind> {
    AGGREGATE_KEYWORDS.get(word).copied()
}

#[must_use]
pub(crate) fn is_type_word(word: &str) -> bool {
    TYPE_WORDS.contains(word)
}

#[must_use]
pub(crate) fn is_expression_operator(word: &str) -> bool {
    EXPRESSION_OPERATORS.contains(word)
}

/// Whether `word` is a C identifier (or keyword).
#[must_use]
pub(crate) fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
