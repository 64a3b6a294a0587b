//! Comment attachment.
//!
//! The boundary scanner leaves comments between constructs as standalone
//! items. This pass walks each nesting level in source order and assigns
//! every such comment to exactly one place:
//!
//! - the post-comment of the preceding unit when it starts on the line of
//!   that unit's terminator,
//! - the pre-comment of the following unit when no blank line separates them
//!   (only the nearest of several candidates),
//! - otherwise a floating slot of its own.

use crate::tokenizer::Token;

use super::span_scanner::{Extent, Item};

/// A resolved element at one nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Token index of a comment attached to nothing.
    Floating(usize),
    Unit(UnitSlot),
}

/// A construct with the token indices of its attached comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnitSlot {
    pub(crate) pre: Option<usize>,
    pub(crate) extent: Extent,
    pub(crate) post: Option<usize>,
    pub(crate) nested: Vec<Slot>,
}

fn newlines_between(src: &str, start: usize, end: usize) -> usize {
    src.as_bytes()
        .get(start..end)
        .map_or(0, |gap| gap.iter().filter(|&&b| b == b'\n').count())
}

fn end_of(tokens: &[Token], idx: usize) -> usize {
    tokens.get(idx).map_or(0, |t| t.span().end)
}

fn start_of(tokens: &[Token], idx: usize) -> usize {
    tokens.get(idx).map_or(0, |t| t.span().start)
}

/// Attach the comments in `items` to their neighbouring constructs.
pub(crate) fn resolve(items: Vec<Item>, tokens: &[Token], src: &str) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(items.len());
    let mut pending: Vec<usize> = Vec::new();
    let mut awaiting_post = false;

    for item in items {
        match item {
            Item::Comment(idx) => {
                if pending.is_empty()
                    && std::mem::take(&mut awaiting_post)
                    && let Some(Slot::Unit(unit)) = slots.last_mut()
                    && newlines_between(src, end_of(tokens, unit.extent.last), start_of(tokens, idx))
                        == 0
                {
                    unit.post = Some(idx);
                } else {
                    awaiting_post = false;
                    pending.push(idx);
                }
            }
            Item::Construct(construct) => {
                let start = start_of(tokens, construct.extent.first);
                let pre = match pending.last() {
                    Some(&idx) if newlines_between(src, end_of(tokens, idx), start) < 2 => {
                        pending.pop()
                    }
                    _ => None,
                };
                slots.extend(pending.drain(..).map(Slot::Floating));
                slots.push(Slot::Unit(UnitSlot {
                    pre,
                    extent: construct.extent,
                    post: None,
                    nested: resolve(construct.nested, tokens, src),
                }));
                awaiting_post = true;
            }
        }
    }
    slots.extend(pending.into_iter().map(Slot::Floating));
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanOptions;
    use crate::parser::span_scanner::scan_items;
    use crate::test_util::tokenize;
    use rstest::rstest;

    /// Render slots as a compact string: `F` for floating, `[pre U post]`.
    fn layout(src: &str) -> String {
        let tokens = tokenize(src);
        let items = scan_items(&tokens, src, &ScanOptions::default()).expect("scan");
        render(&resolve(items, &tokens, src))
    }

    fn render(slots: &[Slot]) -> String {
        slots
            .iter()
            .map(|slot| match slot {
                Slot::Floating(_) => "F".to_string(),
                Slot::Unit(unit) => {
                    let nested = if unit.nested.is_empty() {
                        String::new()
                    } else {
                        format!("{{{}}}", render(&unit.nested))
                    };
                    format!(
                        "{}U{}{}",
                        if unit.pre.is_some() { "<" } else { "" },
                        nested,
                        if unit.post.is_some() { ">" } else { "" },
                    )
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[rstest]
    #[case("int x;", "U")]
    #[case("/* pre */\nint *x; /* post */", "<U>")]
    #[case("/* a */ int x;", "<U")]
    #[case("// a\nint x;", "<U")]
    #[case("/* a */\n\nint x;", "F U")]
    #[case("/* a */\n/* b */\nint x;", "F <U")]
    #[case("int x;\n/* trailing */", "U F")]
    #[case("int x; /* a */ /* b */", "U> F")]
    #[case("int x; /* a */\nint y;", "U> U")]
    #[case("int x;\n/* a */\nint y;", "U <U")]
    #[case("int x; /* a */ /* b */\nint y;", "U> <U")]
    #[case("#define A 1 /* post */", "U>")]
    #[case("/* only */", "F")]
    #[case("", "")]
    fn attaches(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(layout(src), expected);
    }

    #[test]
    fn nested_bodies_resolve_independently() {
        let src = "struct s {\n\t/* a */\n\tint a; /* b */\n\t/* c */\n};";
        assert_eq!(layout(src), "U{<U> F}");
    }

    #[test]
    fn post_comment_needs_same_line_as_terminator() {
        let src = "void f(void)\n{\n}\n/* next */\nint y;";
        assert_eq!(layout(src), "U <U");
    }
}
