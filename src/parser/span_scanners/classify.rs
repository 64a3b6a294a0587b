//! Classification of constructs that end at a top-level `;`.
//!
//! The decision uses structural cues only: an aggregate body, a `typedef`, a
//! leading statement keyword, a top-level assignment, a function declarator
//! and the number of identifiers outside groups. Unknown words are accepted
//! anywhere in the type prefix, so project macros such as `WT_INLINE` do not
//! block a declaration from being recognised.

use crate::config::ScanOptions;
use crate::parser::ast::UnitKind;
use crate::tokenizer::Token;

use super::declarators::{
    count_identifiers, function_declarator, has_nested_declarator, top_level_aggregate,
    top_level_assignment, top_level_indices, word,
};
use super::keywords::{is_expression_operator, is_statement_keyword};

/// Whether a top-level word of `sig` equals `expected`.
pub(crate) fn has_top_level_word(sig: &[Token], src: &str, expected: &str) -> bool {
    top_level_indices(sig, src)
        .into_iter()
        .any(|idx| sig.get(idx).and_then(|t| word(t, src)) == Some(expected))
}

/// The first word of the construct, if it starts with one.
pub(crate) fn leading_word<'s>(sig: &[Token], src: &'s str) -> Option<&'s str> {
    sig.first().and_then(|t| word(t, src))
}

fn has_expression_operator(sig: &[Token], src: &str) -> bool {
    top_level_indices(sig, src).into_iter().any(|idx| {
        sig.get(idx)
            .and_then(|t| word(t, src))
            .is_some_and(is_expression_operator)
    })
}

/// Kind of a construct whose significant tokens are `sig` (without the final
/// `;`). `body` is the aggregate kind when a struct, union or enum body was
/// consumed along the way.
#[must_use]
pub(crate) fn classify_terminated(
    sig: &[Token],
    src: &str,
    options: &ScanOptions,
    body: Option<UnitKind>,
) -> UnitKind {
    if let Some(kind) = body {
        return kind;
    }
    if has_top_level_word(sig, src, "typedef") {
        return UnitKind::Typedef;
    }
    if leading_word(sig, src).is_some_and(is_statement_keyword) {
        return UnitKind::Statement;
    }
    let head = top_level_assignment(sig, src)
        .and_then(|eq| sig.get(..eq))
        .unwrap_or(sig);
    if has_expression_operator(head, src) {
        return UnitKind::Statement;
    }
    if head.len() < sig.len() {
        let identifiers = count_identifiers(head, src);
        return if identifiers >= 2 || (identifiers == 1 && has_nested_declarator(head, src)) {
            UnitKind::VariableDeclaration
        } else {
            UnitKind::Statement
        };
    }
    if let Some(decl) = function_declarator(sig, src, options) {
        let leading = sig.get(..decl.name).map_or(0, |before| count_identifiers(before, src));
        return if leading >= 1 || decl.nested {
            UnitKind::FunctionPrototype
        } else {
            UnitKind::Statement
        };
    }
    if top_level_aggregate(sig, src).is_some() || count_identifiers(sig, src) >= 2 {
        UnitKind::VariableDeclaration
    } else {
        UnitKind::Statement
    }
}
