//! Preprocessor directive classification.
//!
//! A directive token is classified by its directive word. For `#define` the
//! header is parsed with `chumsky` over tokens re-lexed from the directive
//! text, which tells plain macros from function-like ones: only a `(` glued
//! to the macro name opens a parameter list.

use chumsky::Stream;
use chumsky::prelude::*;

use crate::parser::ast::UnitKind;
use crate::tokenizer::{Lexer, Token};
use crate::{Span, SyntaxKind};

use super::keywords::is_identifier;

/// Name and parameter list of a `#define`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefineHeader {
    pub(crate) name: String,
    /// `Some` only for function-like macros.
    pub(crate) parameters: Option<Vec<String>>,
}

/// The word following `#`, e.g. `include` in `#  include <x.h>`.
#[must_use]
pub(crate) fn directive_word<'s>(token: &Token, src: &'s str) -> &'s str {
    let rest = token.text(src).trim_start_matches('#').trim_start();
    let end = rest
        .find(|c: char| c != '_' && !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    rest.get(..end).unwrap_or("")
}

/// Classify a `T_PREPROCESSOR` token.
#[must_use]
pub(crate) fn classify_directive(token: &Token, src: &str) -> UnitKind {
    if directive_word(token, src) != "define" {
        return UnitKind::PreprocessorDirective;
    }
    match define_header(token, src) {
        Some(DefineHeader {
            parameters: Some(_),
            ..
        }) => UnitKind::MacroDefineFunctionLike,
        _ => UnitKind::MacroDefinePlain,
    }
}

/// Parse the header of a `#define` directive.
///
/// Returns `None` when the directive is not a well-formed `#define NAME`.
#[must_use]
pub(crate) fn define_header(token: &Token, src: &str) -> Option<DefineHeader> {
    let end = token.span().end;
    let tokens: Vec<(SyntaxKind, Span)> = Lexer::with_offset(src, token.span().start + 1)?
        .map_while(Result::ok)
        .take_while(|t| t.span().end <= end)
        .map(|t| (t.kind(), t.span().clone()))
        .collect();
    let stream = Stream::from_iter(end..end, tokens.into_iter());
    define_parser(src).parse(stream).ok()
}

fn define_parser(src: &str) -> impl Parser<SyntaxKind, DefineHeader, Error = Simple<SyntaxKind>> + '_ {
    let text = move |span: &Span| src.get(span.clone()).unwrap_or("");
    let ws = just(SyntaxKind::T_WHITESPACE).repeated();
    let word = move |expected: &'static str| {
        filter_map(move |span: Span, kind: SyntaxKind| {
            if kind == SyntaxKind::T_WORD && text(&span) == expected {
                Ok(span)
            } else {
                Err(Simple::expected_input_found(span, [Some(SyntaxKind::T_WORD)], Some(kind)))
            }
        })
    };
    let ident = filter_map(move |span: Span, kind: SyntaxKind| {
        if kind == SyntaxKind::T_WORD && is_identifier(text(&span)) {
            Ok(span)
        } else {
            Err(Simple::expected_input_found(span, [Some(SyntaxKind::T_WORD)], Some(kind)))
        }
    });
    let ellipsis = word(".")
        .then(word("."))
        .then(word("."))
        .to("...".to_string());
    let param = ident
        .clone()
        .map(move |span| text(&span).to_string())
        .or(ellipsis)
        .padded_by(ws.clone());
    let params = just(SyntaxKind::T_LPAREN)
        .map_with_span(|_, span: Span| span)
        .then(param.separated_by(just(SyntaxKind::T_COMMA)))
        .then_ignore(ws.clone())
        .then_ignore(just(SyntaxKind::T_RPAREN));

    ws.clone()
        .ignore_then(word("define"))
        .ignore_then(ws)
        .ignore_then(ident)
        .then(params.or_not())
        .map(move |(name, params)| DefineHeader {
            name: text(&name).to_string(),
            parameters: params
                .filter(|(open, _)| open.start == name.end)
                .map(|(_, list)| list),
        })
}
