//! Comment attachment through the public API.

mod test_util;

use cscan::{CommentStyle, UnitKind};
use rstest::rstest;
use test_util::{assert_unit, units};

#[test]
fn blank_line_makes_comment_float() {
    let all = units("/* alone */\n\nint x;");
    assert_eq!(all.len(), 2);
    let floating = all.first().expect("floating");
    assert!(floating.is_floating_comment());
    assert_eq!(floating.kind(), UnitKind::Other);
    assert_eq!(floating.body_text(), "/* alone */");
    assert_unit(all.get(1).expect("decl"), UnitKind::VariableDeclaration, None, None);
}

#[test]
fn nearer_of_two_candidates_wins() {
    let all = units("/* far */\n/* near */\nint x;");
    assert_eq!(all.len(), 2);
    assert_eq!(all.first().map(cscan::Unit::body_text), Some("/* far */"));
    assert_unit(
        all.get(1).expect("decl"),
        UnitKind::VariableDeclaration,
        Some("/* near */"),
        None,
    );
}

#[test]
fn post_comment_takes_precedence_over_next_pre() {
    let all = units("int a; /* after a */\nint b;");
    assert_unit(
        all.first().expect("a"),
        UnitKind::VariableDeclaration,
        None,
        Some("/* after a */"),
    );
    assert_unit(all.get(1).expect("b"), UnitKind::VariableDeclaration, None, None);
}

#[test]
fn only_first_same_line_comment_is_post() {
    let all = units("int a; /* one */ /* two */\nint b;");
    assert_unit(all.first().expect("a"), UnitKind::VariableDeclaration, None, Some("/* one */"));
    assert_unit(
        all.get(1).expect("b"),
        UnitKind::VariableDeclaration,
        Some("/* two */"),
        None,
    );
}

#[test]
fn trailing_comment_at_end_of_buffer_floats() {
    let all = units("int a;\n/* end */\n");
    assert_eq!(all.len(), 2);
    assert!(all.get(1).is_some_and(cscan::Unit::is_floating_comment));
}

#[test]
fn first_comment_in_file_is_pre_candidate() {
    let all = units("// header\nint a;");
    let unit = all.first().expect("unit");
    assert_unit(unit, UnitKind::VariableDeclaration, Some("// header"), None);
    assert_eq!(unit.pre_comment().map(cscan::Comment::style), Some(CommentStyle::Line));
}

#[test]
fn comments_inside_construct_stay_in_body() {
    let all = units("int /* inner */ x;");
    let unit = all.first().expect("unit");
    assert_unit(unit, UnitKind::VariableDeclaration, None, None);
    assert_eq!(unit.body_text(), "int /* inner */ x;");
}

#[test]
fn function_post_comment_follows_closing_brace() {
    let all = units("void f(void)\n{\n} /* end f */\n");
    assert_unit(
        all.first().expect("f"),
        UnitKind::FunctionDefinition,
        None,
        Some("/* end f */"),
    );
}

#[test]
fn comment_after_last_field_floats_inside_body() {
    let all = units("struct s {\n  int a;\n  /* reserved */\n};");
    let nested = all.first().expect("struct").nested_units();
    assert_eq!(nested.len(), 2);
    assert!(nested.get(1).is_some_and(cscan::Unit::is_floating_comment));
}

#[rstest]
#[case("/* a */\nint x;", 1)]
#[case("/* a */\n\t\nint x;", 2)]
#[case("/* a */\r\n\r\nint x;", 2)]
fn whitespace_only_lines_count_as_blank(#[case] src: &str, #[case] expected_units: usize) {
    assert_eq!(units(src).len(), expected_units);
}

#[test]
fn comment_in_string_is_not_a_comment() {
    let all = units("char *s = \"/* not */\"; /* real */");
    assert_unit(
        all.first().expect("decl"),
        UnitKind::VariableDeclaration,
        None,
        Some("/* real */"),
    );
}
