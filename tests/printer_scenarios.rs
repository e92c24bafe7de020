//! End-to-end pretty-printing scenarios

use rstest::rstest;
use srcprint::srcprint::formats::{render_tag, CustomFormatter, Formatter, Handlers};
use srcprint::srcprint::printer::Printer;
use srcprint::{prettyprint, prettyprint_str, LatexFormatter, PlainFormatter, TagFormatter, TokenKind};

#[rstest]
#[case::assignment("x = 1\n")]
#[case::function("def f(a, b=2):\n    return a ** b  # pow\n\nprint(f(3))\n")]
#[case::continuation("x = 1 + \\\n    2\n")]
#[case::chained_continuation("x = \\\n\\\n1\n")]
#[case::indented_chained_continuation("total = a + \\\n    \\\n        b\n")]
#[case::trailing_whitespace_line("x = 1\n    ")]
#[case::bracketed_list("items = [\n    1,\n    2,\n]\n")]
#[case::nested_blocks("if a:\n    if b:\n        c\nd\n")]
#[case::whitespace_only_line("a\n   \nb\n")]
#[case::tab_indent("if a:\n\tb\n")]
#[case::no_final_newline("x = 1")]
#[case::comment_only("# only a comment\n")]
#[case::multiline_string("doc = \"\"\"first\n   second\n\"\"\"\n")]
#[case::empty("")]
fn test_plain_output_reproduces_source(#[case] source: &str) {
    assert_eq!(prettyprint_str(source, None).unwrap(), source);
    assert_eq!(
        prettyprint_str(source, Some(&PlainFormatter::new())).unwrap(),
        source
    );
}

#[test]
fn test_tag_output_for_block() {
    let out = prettyprint_str("if x:\n    y\n", Some(&TagFormatter::new())).unwrap();
    insta::assert_snapshot!(out, @r"
    [name]if [name]x[op]:[newline]

    [indent]    [name]y[newline]

    [dedent][endmarker]
    ");
}

#[test]
fn test_tag_output_for_assignment() {
    let out = prettyprint_str("x = 1\n", Some(&TagFormatter::new())).unwrap();
    assert_eq!(out, "[name]x [op]= [number]1[newline]\n\n[endmarker]");
}

#[test]
fn test_latex_output_for_string_assignment() {
    let out = prettyprint_str("x = 'a b'\n", Some(&LatexFormatter::new())).unwrap();
    assert_eq!(out, r#"\textbf{x}~=~\textit{\char"27 a~b\char"27 }\\"#.to_string() + "\n");
}

#[test]
fn test_latex_encodes_comment_text() {
    let out = prettyprint_str("# 50%\n", Some(&LatexFormatter::new())).unwrap();
    assert_eq!(out, r#"\char"23 ~50\char"25 \\"#.to_string() + "\n");
}

#[test]
fn test_custom_formatter_through_printer() {
    let base = TagFormatter::new();
    let shouting = CustomFormatter::extending("shout", &base)
        .with_default(render_tag)
        .with_handler(TokenKind::Name, |token| token.text().to_uppercase());
    let out = prettyprint_str("a = b\n", Some(&shouting)).unwrap();
    assert_eq!(out, "A [op]= B[newline]\n\n[endmarker]");
}

#[test]
fn test_handlers_without_encodings() {
    let handlers = Handlers::new().with(TokenKind::Op, |_| "<op>".to_string());
    let formatter = CustomFormatter::new("ops").with_handlers(&handlers);
    assert_eq!(formatter.name(), "ops");
    let out = prettyprint_str("a+b\n", Some(&formatter)).unwrap();
    assert_eq!(out, "a<op>b\n");
}

#[test]
fn test_output_goes_to_any_writer() {
    let mut out: Vec<u8> = Vec::new();
    prettyprint("pass\n".as_bytes(), &mut out, Some(&TagFormatter::new())).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "[name]pass[newline]\n\n[endmarker]"
    );
}

#[test]
fn test_printer_is_reusable() {
    let printer = Printer::new();
    let tag = TagFormatter::new();
    let first = printer.print_str("a\n", Some(&tag)).unwrap();
    let second = printer.print_str("a\n", Some(&tag)).unwrap();
    assert_eq!(first, second);
}
