//! Integration tests for the unit tree.
//!
//! These tests verify the CST construction: the round-trip property, node
//! nesting and the typed wrappers over unit nodes.

use cscan::{SyntaxKind, UnitKind, ast::AstNode, parse, parse_with, ScanOptions};
use rstest::{fixture, rstest};

/// Collect the text of a syntax subtree.
///
/// This helper iteratively traverses the tree using an explicit stack so
/// deeply nested inputs do not risk recursion overflow. It enables
/// round-trip tests that assert the printed output matches the original
/// source.
fn pretty_print(node: &rowan::SyntaxNode<cscan::CLanguage>) -> String {
    let mut out = String::new();
    let mut stack = vec![rowan::SyntaxElement::Node(node.clone())];

    while let Some(item) = stack.pop() {
        match item {
            rowan::SyntaxElement::Token(t) => out.push_str(t.text()),
            rowan::SyntaxElement::Node(n) => {
                let children: Vec<rowan::SyntaxElement<cscan::CLanguage>> =
                    n.children_with_tokens().collect();
                for child in children.into_iter().rev() {
                    stack.push(child);
                }
            }
        }
    }

    out
}

#[fixture]
fn simple_prog() -> &'static str {
    "int func(int a, int b);"
}

#[fixture]
fn commented_prog() -> &'static str {
    "/* header */\n\n/* pre */\nstatic int x = 1; /* post */\n\nvoid f(void)\n{\n}\n"
}

#[fixture]
fn nested_prog() -> &'static str {
    "typedef struct outer {\n\t/* a */\n\tint a;\n\tunion {\n\t\tint b;\n\t} u;\n} outer_t;\n"
}

#[fixture]
fn empty_prog() -> &'static str {
    ""
}

/// Verifies that scanning and pretty-printing preserves the original input
/// text and produces the expected root node kind.
#[rstest]
fn parse_round_trip(simple_prog: &str) {
    let parsed = parse(simple_prog).expect("scan");
    let text = pretty_print(parsed.root().syntax());
    assert_eq!(text, simple_prog);
    assert_eq!(parsed.root().kind(), SyntaxKind::N_TRANSLATION_UNIT);
}

#[rstest]
#[case::commented(commented_prog())]
#[case::nested(nested_prog())]
#[case::empty(empty_prog())]
fn round_trip_holds(#[case] src: &str) {
    let parsed = parse(src).expect("scan");
    assert_eq!(pretty_print(parsed.root().syntax()), src);
    assert_eq!(parsed.text(), src);
}

#[rstest]
fn unit_nodes_mirror_units(commented_prog: &str) {
    let parsed = parse(commented_prog).expect("scan");
    let nodes = parsed.root().units();
    assert_eq!(nodes.len(), parsed.units().len());
    for (node, unit) in nodes.iter().zip(parsed.units()) {
        assert_eq!(node.kind(), Some(unit.kind()));
        assert_eq!(node.pre_comment().as_deref(), unit.pre_comment().map(|c| c.text()));
        assert_eq!(node.post_comment().as_deref(), unit.post_comment().map(|c| c.text()));
        assert_eq!(node.body_text(), unit.body_text());
    }
}

#[rstest]
fn nested_nodes_sit_inside_body(nested_prog: &str) {
    let parsed = parse(nested_prog).expect("scan");
    let nodes = parsed.root().units();
    let outer = nodes.first().expect("struct");
    assert_eq!(outer.kind(), Some(UnitKind::StructDefinition));
    let inner: Vec<_> = outer.nested().iter().map(|n| n.kind()).collect();
    assert_eq!(
        inner,
        vec![Some(UnitKind::VariableDeclaration), Some(UnitKind::UnionDefinition)]
    );
    let field = outer.nested().into_iter().next().expect("field");
    assert_eq!(field.pre_comment().as_deref(), Some("/* a */"));
    assert_eq!(field.text(), "/* a */\n\tint a;");
    let parent = field.syntax().parent().expect("body node");
    assert_eq!(parent.kind(), SyntaxKind::N_BODY);
}

#[test]
fn offset_scan_covers_only_the_tail() {
    let src = "int a;\n/* b */\nint b;\n";
    let options = ScanOptions::builder().start_offset(7).build();
    let parsed = parse_with(src, &options).expect("scan");
    assert_eq!(pretty_print(parsed.root().syntax()), "/* b */\nint b;\n");
    let unit = parsed.units().first().expect("unit");
    assert_eq!(unit.pre_comment().map(|c| c.span().clone()), Some(7..14));
    assert_eq!(unit.line(), 3);
}
