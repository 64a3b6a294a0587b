//! Token-level declarator analysis.
//!
//! These helpers work on the significant tokens of one construct (no
//! whitespace, comments or directives). They locate function declarators and
//! extract declared names without parsing C declarator grammar: groups are
//! matched by depth and names are found by stripping suffixes.

use crate::config::ScanOptions;
use crate::parser::delimiter::matching_close;
use crate::tokenizer::Token;
use crate::SyntaxKind;

use super::keywords::{aggregate_kind, is_identifier, is_type_word};

/// Text of `token` when it is a word.
pub(crate) fn word<'s>(token: &Token, src: &'s str) -> Option<&'s str> {
    (token.kind() == SyntaxKind::T_WORD).then(|| token.text(src))
}

fn is_word(token: Option<&Token>, src: &str, expected: &str) -> bool {
    token.and_then(|t| word(t, src)) == Some(expected)
}

fn is_identifier_token(token: &Token, src: &str) -> bool {
    word(token, src).is_some_and(is_identifier)
}

/// Index of the `)` or `}` closing the group opened at `open`.
pub(crate) fn group_end(sig: &[Token], open: usize) -> Option<usize> {
    matching_close(sig, open, sig.len()).ok().flatten()
}

fn bracket_end(sig: &[Token], open: usize, src: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in sig.iter().enumerate().skip(open) {
        match word(token, src) {
            Some("[") => depth += 1,
            Some("]") => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index of the opener matching the closer at `close`, walking backwards.
fn group_start(sig: &[Token], close: usize, src: &str) -> Option<usize> {
    let closing = sig.get(close)?;
    let (opens, closes): (fn(&Token, &str) -> bool, fn(&Token, &str) -> bool) =
        if closing.kind() == SyntaxKind::T_RPAREN {
            (
                |t, _| t.kind() == SyntaxKind::T_LPAREN,
                |t, _| t.kind() == SyntaxKind::T_RPAREN,
            )
        } else {
            (|t, s| word(t, s) == Some("["), |t, s| word(t, s) == Some("]"))
        };
    let mut depth = 0usize;
    for idx in (0..=close).rev() {
        let token = sig.get(idx)?;
        if closes(token, src) {
            depth += 1;
        } else if opens(token, src) {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Indices of tokens outside every paren, brace and bracket group.
///
/// Opening delimiters are included; their contents and closers are not.
pub(crate) fn top_level_indices(sig: &[Token], src: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut idx = 0;
    while let Some(token) = sig.get(idx) {
        out.push(idx);
        let end = match token.kind() {
            SyntaxKind::T_LPAREN | SyntaxKind::T_LBRACE => group_end(sig, idx),
            SyntaxKind::T_WORD if token.text(src) == "[" => bracket_end(sig, idx, src),
            _ => None,
        };
        idx = end.map_or(idx + 1, |close| close + 1);
    }
    out
}

/// Whether the `=` at `idx` is an assignment rather than part of `==`, `<=`,
/// `>=` or `!=`.
pub(crate) fn is_assignment(sig: &[Token], idx: usize, src: &str) -> bool {
    let Some(token) = sig.get(idx) else {
        return false;
    };
    if word(token, src) != Some("=") {
        return false;
    }
    let glued = |other: Option<&Token>, texts: &[&str]| {
        other.is_some_and(|o| {
            (o.span().end == token.span().start || o.span().start == token.span().end)
                && word(o, src).is_some_and(|w| texts.contains(&w))
        })
    };
    !glued(sig.get(idx + 1), &["="])
        && !glued(idx.checked_sub(1).and_then(|p| sig.get(p)), &["=", "!", "<", ">"])
}

/// Index of the first top-level assignment `=`.
pub(crate) fn top_level_assignment(sig: &[Token], src: &str) -> Option<usize> {
    top_level_indices(sig, src)
        .into_iter()
        .find(|&idx| is_assignment(sig, idx, src))
}

/// Top-level aggregate keyword and its index.
pub(crate) fn top_level_aggregate(
    sig: &[Token],
    src: &str,
) -> Option<(usize, crate::parser::ast::UnitKind)> {
    top_level_indices(sig, src).into_iter().find_map(|idx| {
        sig.get(idx)
            .and_then(|t| word(t, src))
            .and_then(aggregate_kind)
            .map(|kind| (idx, kind))
    })
}

/// Count identifiers at top level, skipping the argument groups of
/// attribute words but counting the words themselves.
pub(crate) fn count_identifiers(sig: &[Token], src: &str) -> usize {
    top_level_indices(sig, src)
        .into_iter()
        .filter(|&idx| sig.get(idx).is_some_and(|t| is_identifier_token(t, src)))
        .count()
}

/// A function name followed by its parameter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FunctionDeclarator {
    /// Index of the name.
    pub(crate) name: usize,
    /// Index of the `(` opening the parameter list.
    pub(crate) open: usize,
    /// Index of the matching `)`.
    pub(crate) close: usize,
    /// Whether the name sits inside a parenthesised pointer declarator.
    pub(crate) nested: bool,
}

impl FunctionDeclarator {
    fn shifted(self, by: usize) -> Self {
        Self {
            name: self.name + by,
            open: self.open + by,
            close: self.close + by,
            nested: true,
        }
    }
}

/// Find `name(params)` in a declaration, looking inside `(*...)` pointer
/// declarators and ignoring attribute argument groups.
///
/// # Examples
///
/// ```rust,ignore
/// // `qwe * (* asd(void))(int aa, int bb)` finds `asd` with `(void)`.
/// let decl = function_declarator(&sig, src, &ScanOptions::default());
/// ```
pub(crate) fn function_declarator(
    sig: &[Token],
    src: &str,
    options: &ScanOptions,
) -> Option<FunctionDeclarator> {
    let mut idx = 0;
    while let Some(token) = sig.get(idx) {
        match token.kind() {
            SyntaxKind::T_LPAREN => {
                let close = group_end(sig, idx)?;
                let prev = idx.checked_sub(1).and_then(|p| sig.get(p));
                let prev_word = prev.and_then(|t| word(t, src));
                if prev_word.is_some_and(|w| options.is_attribute_word(w)) {
                    idx = close + 1;
                    continue;
                }
                let inner = sig.get(idx + 1..close).unwrap_or_default();
                if is_word(inner.first(), src, "*") || is_word(inner.first(), src, "^") {
                    if let Some(found) = function_declarator(inner, src, options) {
                        return Some(found.shifted(idx + 1));
                    }
                } else if prev_word.is_some_and(is_identifier)
                    && !is_prefix_macro(sig, idx - 1, close, src, options)
                {
                    return Some(FunctionDeclarator {
                        name: idx - 1,
                        open: idx,
                        close,
                        nested: false,
                    });
                }
                idx = close + 1;
            }
            SyntaxKind::T_LBRACE => idx = group_end(sig, idx)? + 1,
            _ => idx += 1,
        }
    }
    None
}

/// Top-level identifiers after `after` that are not attribute words, each
/// paired with whether a `(` group follows it.
fn trailing_identifiers(sig: &[Token], after: usize, src: &str, options: &ScanOptions) -> Vec<bool> {
    let rest = sig.get(after + 1..).unwrap_or_default();
    let top = top_level_indices(rest, src);
    top.iter()
        .enumerate()
        .filter(|&(_, &idx)| {
            rest.get(idx)
                .and_then(|t| word(t, src))
                .is_some_and(|w| is_identifier(w) && !options.is_attribute_word(w))
        })
        .map(|(pos, _)| {
            top.get(pos + 1)
                .and_then(|&next| rest.get(next))
                .is_some_and(|t| t.kind() == SyntaxKind::T_LPAREN)
        })
        .collect()
}

/// Whether `name(...)`, closing at `close`, belongs to the type prefix rather
/// than being the declarator.
///
/// It does when declarator words follow it (`DECLSPEC(x) int f(void)`,
/// `WT_PACKED(8) struct s`) or when it opens the construct and another
/// `ident(` group follows (`STACK_OF(X) *get(void)`).
fn is_prefix_macro(
    sig: &[Token],
    name: usize,
    close: usize,
    src: &str,
    options: &ScanOptions,
) -> bool {
    let trailing = trailing_identifiers(sig, close, src, options);
    trailing.iter().any(|call| !call)
        || (trailing.iter().any(|call| *call)
            && count_identifiers(sig.get(..name).unwrap_or_default(), src) == 0)
}

/// Whether the name declared by `seg` sits inside a parenthesised pointer
/// declarator, as in `int (*fp)(void)`.
pub(crate) fn has_nested_declarator(seg: &[Token], src: &str) -> bool {
    name_index(seg, src).is_some_and(|idx| !top_level_indices(seg, src).contains(&idx))
}

/// Drop attribute words together with their argument groups.
pub(crate) fn strip_attributes(sig: &[Token], src: &str, options: &ScanOptions) -> Vec<Token> {
    let mut out = Vec::with_capacity(sig.len());
    let mut idx = 0;
    while let Some(token) = sig.get(idx) {
        if word(token, src).is_some_and(|w| options.is_attribute_word(w)) {
            idx += 1;
            if sig.get(idx).is_some_and(|t| t.kind() == SyntaxKind::T_LPAREN) {
                idx = group_end(sig, idx).map_or(sig.len(), |close| close + 1);
            }
            continue;
        }
        out.push(token.clone());
        idx += 1;
    }
    out
}

/// Split at top-level commas.
pub(crate) fn split_top_level_commas<'t>(sig: &'t [Token], src: &str) -> Vec<&'t [Token]> {
    let mut parts = Vec::new();
    let mut start = 0;
    for idx in top_level_indices(sig, src) {
        if sig.get(idx).is_some_and(|t| t.kind() == SyntaxKind::T_COMMA) {
            parts.push(sig.get(start..idx).unwrap_or_default());
            start = idx + 1;
        }
    }
    parts.push(sig.get(start..).unwrap_or_default());
    parts
}

/// Name declared by one declarator, e.g. `x` in `*x[3] = {0}` or `fn` in
/// `int (*fn)(int)`.
pub(crate) fn declarator_name(seg: &[Token], src: &str, options: &ScanOptions) -> Option<String> {
    let seg = strip_attributes(seg, src, options);
    let cut = top_level_indices(&seg, src)
        .into_iter()
        .find(|&idx| is_assignment(&seg, idx, src) || is_word(seg.get(idx), src, ":"))
        .unwrap_or(seg.len());
    let seg = seg.get(..cut).unwrap_or_default();
    name_index(seg, src).and_then(|idx| seg.get(idx)).map(|t| t.text(src).to_string())
}

fn name_index(seg: &[Token], src: &str) -> Option<usize> {
    let mut end = seg.len();
    loop {
        let last_idx = end.checked_sub(1)?;
        let last = seg.get(last_idx)?;
        match last.kind() {
            SyntaxKind::T_RPAREN => {
                let open = group_start(seg, last_idx, src)?;
                let inner = seg.get(open + 1..last_idx).unwrap_or_default();
                if open == 0 || is_word(inner.first(), src, "*") || is_word(inner.first(), src, "^") {
                    return name_index(inner, src).map(|idx| idx + open + 1);
                }
                end = open;
            }
            SyntaxKind::T_WORD if last.text(src) == "]" => end = group_start(seg, last_idx, src)?,
            SyntaxKind::T_WORD if is_identifier(last.text(src)) => return Some(last_idx),
            _ => end = last_idx,
        }
    }
}

/// Names declared by a comma-separated declarator list.
pub(crate) fn declarator_names(sig: &[Token], src: &str, options: &ScanOptions) -> Vec<String> {
    split_top_level_commas(sig, src)
        .into_iter()
        .filter_map(|seg| declarator_name(seg, src, options))
        .collect()
}

/// Declared parameter names inside the group `sig[open..=close]`.
///
/// `void`, `...` and type-only parameters contribute nothing.
pub(crate) fn parameter_names(
    sig: &[Token],
    open: usize,
    close: usize,
    src: &str,
    options: &ScanOptions,
) -> Vec<String> {
    let inner = sig.get(open + 1..close).unwrap_or_default();
    split_top_level_commas(inner, src)
        .into_iter()
        .filter(|param| param.iter().filter(|t| is_identifier_token(t, src)).count() >= 2)
        .filter_map(|param| {
            let stripped = strip_attributes(param, src, options);
            let idx = name_index(&stripped, src)?;
            let name = stripped.get(idx)?.text(src);
            let after_tag = idx
                .checked_sub(1)
                .and_then(|p| stripped.get(p))
                .and_then(|t| word(t, src))
                .is_some_and(|w| aggregate_kind(w).is_some());
            (!is_type_word(name) && !after_tag).then(|| name.to_string())
        })
        .collect()
}

/// Tag name of an aggregate whose keyword sits at `keyword` and whose body
/// opens at `open` (or the end of `sig` for a bodiless reference).
pub(crate) fn aggregate_tag(
    sig: &[Token],
    keyword: usize,
    open: usize,
    src: &str,
    options: &ScanOptions,
) -> Option<String> {
    let between = sig.get(keyword + 1..open).unwrap_or_default();
    strip_attributes(between, src, options)
        .iter()
        .find(|t| is_identifier_token(t, src))
        .map(|t| t.text(src).to_string())
}
