//! Utilities for traversing the syntax tree.
//!
//! These helpers provide small parsing-related operations that work
//! on `rowan` syntax elements without constructing additional nodes.
//! They are used by the CST wrappers when extracting text from a unit body.

use crate::{CLanguage, SyntaxKind};
use rowan::{NodeOrToken, SyntaxElement};

/// Text between the first `(` and its matching `)`, or `None` when the
/// elements hold no complete group.
fn extract_parenthesized(tokens: impl Iterator<Item = SyntaxElement<CLanguage>>) -> Option<String> {
    let mut depth = 0usize;
    let mut buf = String::new();
    for element in tokens {
        let token = match element {
            NodeOrToken::Token(token) => token,
            NodeOrToken::Node(node) => {
                if depth > 0 {
                    buf.push_str(&node.text().to_string());
                }
                continue;
            }
        };
        match token.kind() {
            SyntaxKind::T_LPAREN => {
                if depth > 0 {
                    buf.push_str(token.text());
                }
                depth += 1;
            }
            SyntaxKind::T_RPAREN if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(buf);
                }
                buf.push_str(token.text());
            }
            _ if depth > 0 => buf.push_str(token.text()),
            _ => {}
        }
    }
    None
}

/// Skips to the first `(` then collects comma separated substrings while
/// preserving nested parentheses.
///
/// # Examples
///
/// ```
/// use cscan::ast::AstNode;
/// use cscan::parse;
/// use cscan::syntax_utils::parse_parenthesized_list;
///
/// let parsed = parse("foo(bar, baz(1, 2));").expect("valid C");
/// let unit = &parsed.root().units()[0];
/// let result = parse_parenthesized_list(unit.syntax().descendants_with_tokens()
///     .filter(|e| e.as_token().is_some()));
/// assert_eq!(result, vec!["bar".to_string(), "baz(1, 2)".to_string()]);
/// ```
#[must_use]
pub fn parse_parenthesized_list(
    tokens: impl Iterator<Item = SyntaxElement<CLanguage>>,
) -> Vec<String> {
    extract_parenthesized(tokens).map_or_else(Vec::new, |text| {
        split_top_level(&text)
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}

fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth > 0 => depth -= 1,
            ',' if depth == 0 => {
                let segment = s.get(start..i).unwrap_or("");
                parts.push(segment.trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if let Some(segment) = s.get(start..) {
        parts.push(segment.trim());
    }
    parts
}
