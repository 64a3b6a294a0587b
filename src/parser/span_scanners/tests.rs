//! Tests for the boundary scanner.

use crate::config::ScanOptions;
use crate::parser::ast::UnitKind;
use crate::parser::errors::ScanError;
use crate::parser::span_scanner::{scan_items, Item};
use crate::test_util::tokenize;
use rstest::rstest;

/// Kind and source text of each top-level construct, comments excluded.
fn constructs(src: &str) -> Vec<(UnitKind, String)> {
    let tokens = tokenize(src);
    let items = scan_items(&tokens, src, &ScanOptions::default())
        .unwrap_or_else(|e| panic!("scan failed: {e}"));
    items
        .iter()
        .filter_map(|item| match item {
            Item::Construct(c) => {
                let start = tokens.get(c.extent.first).map(|t| t.span().start)?;
                let end = tokens.get(c.extent.last).map(|t| t.span().end)?;
                Some((c.extent.kind, src.get(start..end)?.to_string()))
            }
            Item::Comment(_) => None,
        })
        .collect()
}

fn kinds(src: &str) -> Vec<UnitKind> {
    constructs(src).into_iter().map(|(kind, _)| kind).collect()
}

fn scan_error(src: &str) -> ScanError {
    let tokens = tokenize(src);
    match scan_items(&tokens, src, &ScanOptions::default()) {
        Ok(items) => panic!("expected failure, got {items:?}"),
        Err(e) => e,
    }
}

#[rstest]
#[case("int main(void) { return 0; }", UnitKind::FunctionDefinition)]
#[case("static int *f(int a)\n{\n\tif (a) { return 0; }\n\treturn &a;\n}", UnitKind::FunctionDefinition)]
#[case("qwe * (* asd(void))(int aa, int bb) {}", UnitKind::FunctionDefinition)]
#[case("struct S { int a; };", UnitKind::StructDefinition)]
#[case("typedef union { int a; float b; } u_t;", UnitKind::UnionDefinition)]
#[case("enum E { A = 1, B };", UnitKind::EnumDefinition)]
#[case("extern \"C\" { int a; }", UnitKind::ExternBlock)]
#[case("int x[] = { 1, 2, 3 };", UnitKind::VariableDeclaration)]
#[case("if (x) { a(); } else { b(); }", UnitKind::Statement)]
#[case("if (x) a(); else b();", UnitKind::Statement)]
#[case("do { x++; } while (x < 3);", UnitKind::Statement)]
#[case("while (x) { x--; }", UnitKind::Statement)]
#[case("for (i = 0; i < n; i++) {}", UnitKind::Statement)]
#[case("{ nested(); }", UnitKind::Statement)]
#[case("#include <stdio.h>", UnitKind::PreprocessorDirective)]
#[case("#define N 10", UnitKind::MacroDefinePlain)]
#[case("#define MAX(a, b) ((a) > (b) ? (a) : (b))", UnitKind::MacroDefineFunctionLike)]
#[case("WT_PACKED(8) struct s { int a; };", UnitKind::StructDefinition)]
#[case("DECLSPEC(dllexport) int f(void) { return 0; }", UnitKind::FunctionDefinition)]
#[case("int (*fp)(void) = &g;", UnitKind::VariableDeclaration)]
fn single_construct_kind(#[case] src: &str, #[case] expected: UnitKind) {
    let found = constructs(src);
    assert_eq!(found.len(), 1, "{found:?}");
    assert_eq!(found.first().map(|(kind, _)| *kind), Some(expected));
    assert_eq!(found.first().map(|(_, text)| text.as_str()), Some(src));
}

#[test]
fn splits_sequence_of_constructs() {
    let src = "#include <a.h>\nint x;\nvoid f(void);\nvoid f(void) {}\nstruct s { int a; };\n";
    assert_eq!(
        kinds(src),
        vec![
            UnitKind::PreprocessorDirective,
            UnitKind::VariableDeclaration,
            UnitKind::FunctionPrototype,
            UnitKind::FunctionDefinition,
            UnitKind::StructDefinition,
        ]
    );
}

#[test]
fn function_body_ends_at_matching_brace() {
    let src = "void f(void) { if (a) { b(); } }\nint y;";
    let found = constructs(src);
    assert_eq!(
        found.first().map(|(_, text)| text.as_str()),
        Some("void f(void) { if (a) { b(); } }")
    );
    assert_eq!(found.get(1).map(|(kind, _)| *kind), Some(UnitKind::VariableDeclaration));
}

#[test]
fn semicolons_inside_parens_do_not_terminate() {
    let src = "for (i = 0; i < n; i++) x += i;";
    assert_eq!(kinds(src), vec![UnitKind::Statement]);
}

#[test]
fn else_if_chain_is_one_statement() {
    let src = "if (a) x(); else if (b) y(); else { z(); }\nw();";
    let found = constructs(src);
    assert_eq!(found.len(), 2);
    assert_eq!(
        found.first().map(|(_, text)| text.as_str()),
        Some("if (a) x(); else if (b) y(); else { z(); }")
    );
}

#[test]
fn struct_body_is_rescanned() {
    let src = "struct outer {\n\tint a;\n\tstruct inner { int b; } in;\n\tvoid (*cb)(int);\n};";
    let tokens = tokenize(src);
    let items = scan_items(&tokens, src, &ScanOptions::default()).expect("scan");
    let Some(Item::Construct(outer)) = items.first() else {
        panic!("expected a construct, got {items:?}");
    };
    let nested: Vec<_> = outer
        .nested
        .iter()
        .filter_map(|item| match item {
            Item::Construct(c) => Some(c.extent.kind),
            Item::Comment(_) => None,
        })
        .collect();
    assert_eq!(
        nested,
        vec![
            UnitKind::VariableDeclaration,
            UnitKind::StructDefinition,
            UnitKind::VariableDeclaration,
        ]
    );
}

#[test]
fn enum_body_is_a_leaf() {
    let src = "enum e { A, B };";
    let tokens = tokenize(src);
    let items = scan_items(&tokens, src, &ScanOptions::default()).expect("scan");
    assert!(matches!(items.as_slice(), [Item::Construct(c)] if c.nested.is_empty()));
}

#[test]
fn comments_between_constructs_are_items() {
    let src = "/* a */\nint x;\n// b\n";
    let tokens = tokenize(src);
    let items = scan_items(&tokens, src, &ScanOptions::default()).expect("scan");
    assert!(matches!(
        items.as_slice(),
        [Item::Comment(_), Item::Construct(_), Item::Comment(_)]
    ));
}

#[test]
fn comments_inside_construct_stay_in_body() {
    let src = "int /* inner */ x;";
    let tokens = tokenize(src);
    let items = scan_items(&tokens, src, &ScanOptions::default()).expect("scan");
    assert!(matches!(items.as_slice(), [Item::Construct(_)]));
}

#[test]
fn directive_inside_function_is_body_text() {
    let src = "void f(void)\n{\n#ifdef X\n\tx();\n#endif\n}";
    assert_eq!(kinds(src), vec![UnitKind::FunctionDefinition]);
}

#[test]
fn attribute_macro_from_options_is_skipped() {
    let src = "void f(void) MY_ATTR(cold);";
    let tokens = tokenize(src);
    let options = ScanOptions::builder().attribute_macro("MY_ATTR").build();
    let items = scan_items(&tokens, src, &options).expect("scan");
    assert!(matches!(
        items.as_slice(),
        [Item::Construct(c)] if c.extent.kind == UnitKind::FunctionPrototype
    ));
}

#[rstest]
#[case("int x; }", '}')]
#[case(")", ')')]
#[case("f(a));", ')')]
fn stray_close_is_structural(#[case] src: &str, #[case] delimiter: char) {
    match scan_error(src) {
        ScanError::Structural(e) => assert_eq!(e.delimiter(), delimiter),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
#[case("int x", "declaration")]
#[case("void f(void) { return;", "function body")]
#[case("struct s { int a;", "aggregate body")]
#[case("int f(int a", "declaration")]
fn eof_inside_construct_is_unterminated(#[case] src: &str, #[case] context: &str) {
    match scan_error(src) {
        ScanError::UnterminatedConstruct(e) => {
            assert_eq!(e.context(), context);
            assert_eq!(e.offset(), 0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}
