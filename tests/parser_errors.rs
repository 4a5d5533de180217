// Additional parser error path tests
// These systematically test unhappy paths; each one also checks that the
// lenient `read` entry point collapses the failure to Null.

use jot_core::{read, try_read};

fn assert_fails(source: &str) {
    assert!(try_read(source).is_err(), "Should fail: {source:?}");
    assert!(read(source).is_null(), "Lenient read should be Null: {source:?}");
}

#[test]
fn test_parser_error_missing_closing_brace() {
    assert_fails(r#"{"key": 123"#);
}

#[test]
fn test_parser_error_missing_closing_bracket() {
    assert_fails(r#"{"arr": [1, 2, 3}"#);
}

#[test]
fn test_parser_error_missing_colon() {
    assert_fails(r#"{"key" 123}"#);
}

#[test]
fn test_parser_error_missing_member_value() {
    assert_fails(r#"{"a": }"#);
}

#[test]
fn test_parser_error_unexpected_eof() {
    assert_fails(r#"{"key": "#);
    assert_fails("[");
    assert_fails("{");
}

#[test]
fn test_parser_error_bare_garbage() {
    assert_fails("garbage");
    assert_fails(",");
    assert_fails("}");
}

#[test]
fn test_parser_error_unfinished_literal() {
    assert_fails("nul");
    assert_fails("nullx");
    assert_fails("falsehood");
}

#[test]
fn test_parser_error_unterminated_string() {
    assert_fails(r#""abc"#);
    assert_fails(r#"{"a": "b"#);
}

#[test]
fn test_parser_error_raw_control_byte_in_string() {
    assert_fails("\"line\nbreak\"");
    assert_fails("\"tab\there\"");
}

#[test]
fn test_parser_error_bad_escape() {
    assert_fails(r#""\q""#);
    assert_fails(r#""\x41""#);
}

#[test]
fn test_parser_error_bad_unicode_escape() {
    assert_fails(r#""\u12""#);
    assert_fails(r#""\uGGGG""#);
    // a lone or mispaired surrogate half never decodes
    assert_fails(r#""\uD800""#);
    assert_fails(r#""\uDC00""#);
    assert_fails(r#""\uDE00\uD83D""#);
}

#[test]
fn test_parser_error_whitespace_only_input() {
    assert_fails("   \t\r\n");
}

#[test]
fn test_empty_input_is_not_an_error() {
    assert!(try_read("").unwrap().is_null());
}

#[test]
fn test_failure_is_indistinguishable_from_null_at_read() {
    // the documented limitation of the lenient entry point
    assert_eq!(read("null"), read(r#"{"broken"#));
}

#[test]
fn test_nested_failure_aborts_the_whole_parse() {
    assert_fails(r#"{"ok": [1, 2], "bad": [1, }"#);
}
