use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

use js_fmt::{format_source, format_source_with_map, Options};

fn fmt(src: &str) -> String {
    format_source(src, Options::default())
}

#[test_case("if(true){var x=1;}", "if (true) {\n    var x = 1;\n}" ; "if block gets braces and indentation")]
#[test_case("var a=1,b=2,c=3;", "var a = 1,\nb = 2,\nc = 3;" ; "var list commas break lines")]
#[test_case(
    "var obj={a:1,b:2};",
    "var obj = {\n    a: 1,\n    b: 2\n};"
    ; "object literal colon has no leading space"
)]
#[test_case(
    "do{x();}while(condition);",
    "do {\n    x();\n} while (condition);"
    ; "do-while keeps the closing brace and while on one line"
)]
#[test_case(
    "var r=/[a-z\\/]+/gi;",
    "var r = /[a-z\\/]+/gi;"
    ; "regex with escaped slash in character class is preserved verbatim"
)]
#[test_case("var x=true?1:2;", "var x = true ? 1 : 2;" ; "ternary colon gets a leading space")]
#[test_case(
    "function f(){return -1;}",
    "function f() {\n    return -1;\n}"
    ; "unary minus after return hugs its operand"
)]
#[test_case("Foo::bar();", "Foo::bar();" ; "double colon is never surrounded by spaces")]
fn scenarios(input: &str, expected: &str) {
    assert_eq!(fmt(input), expected);
}

#[test]
fn script_tag_envelope_is_preserved() {
    let src = r#"<script type="text/javascript">var x=1;</script>"#;
    let expected = r#"<script type="text/javascript">var x = 1;</script>"#;
    assert_eq!(fmt(src), expected);
}

#[test]
fn indent_size_two() {
    let opts = Options {
        indent_size: 2,
        ..Options::default()
    };
    let out = format_source("if(true){var x=1;}", opts);
    assert_eq!(out, "if (true) {\n  var x = 1;\n}");
}

#[test]
fn bad_indent_size_falls_back_to_default() {
    let map = json!({ "indent_size": "bad" }).as_object().unwrap().clone();
    let out = format_source_with_map("if(true){var x=1;}", &map);
    assert_eq!(out, "if (true) {\n    var x = 1;\n}");
}

#[test]
fn tab_indent() {
    let opts = Options {
        indent_size: 1,
        indent_char: String::from("\t"),
        ..Options::default()
    };
    let out = format_source("if(true){var x=1;}", opts);
    assert_eq!(out, "if (true) {\n\tvar x = 1;\n}");
}

#[test]
fn empty_and_whitespace_only_input_formats_to_empty_string() {
    assert_eq!(fmt(""), "");
    assert_eq!(fmt("   \n\t\r\n  "), "");
}

#[test]
fn single_semicolon_round_trips() {
    assert_eq!(fmt(";"), ";");
}

#[test]
fn escaped_quotes_survive_unchanged() {
    let src = r#"var s="a \"b\" c";"#;
    let out = fmt(src);
    assert!(out.contains(r#""a \"b\" c""#));
}

#[test]
fn idempotent_fixed_point() {
    let src = "if(a){b();}else if(c){d();}else{e();}";
    let once = fmt(src);
    let twice = fmt(&once);
    assert_eq!(once, twice);
}

#[test]
fn bracket_balance_preserved() {
    fn bracket_count(s: &str) -> (usize, usize, usize) {
        (
            s.matches(['{', '}']).count(),
            s.matches(['(', ')']).count(),
            s.matches(['[', ']']).count(),
        )
    }

    let src = "function f(a,b){return [a,(b+1)];}";
    assert_eq!(bracket_count(src), bracket_count(&fmt(src)));
}

#[test]
fn malformed_input_does_not_panic() {
    let _ = fmt("function f( {{{ var x = ");
    let _ = fmt("var s = \"unterminated");
    let _ = fmt("/* unterminated block comment");
    let _ = fmt("}}}");
}

#[test]
fn line_comment_and_block_comment_both_end_with_newline() {
    let out = fmt("var x=1;//comment\nvar y=2;");
    assert!(out.contains("//comment\nvar y = 2;"));
}

#[test]
fn preserve_newlines_keeps_a_single_blank_line() {
    let opts = Options {
        preserve_newlines: true,
        ..Options::default()
    };
    let out = format_source("var a=1;\n\nvar b=2;", opts);
    assert_eq!(out, "var a = 1;\n\nvar b = 2;");
}
