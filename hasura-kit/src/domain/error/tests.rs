//! Tests for error rendering and the JSON wire shape.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use super::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn not_found() -> Error {
    Error::new("missing", Some(ErrorCode::Numeric(404)))
}

#[rstest]
#[case::numeric(Some(ErrorCode::Numeric(404)), "[404] missing")]
#[case::text(Some(ErrorCode::Text("validation-failed".into())), "[validation-failed] missing")]
#[case::zero_is_a_real_code(Some(ErrorCode::Numeric(0)), "[0] missing")]
#[case::no_code(None, "missing")]
fn display_prefixes_the_code_when_present(
    #[case] code: Option<ErrorCode>,
    #[case] expected: &str,
) {
    assert_eq!(Error::new("missing", code).to_string(), expected);
}

#[rstest]
fn from_error_without_a_cause_has_an_empty_message() {
    let cause: Option<&std::io::Error> = None;
    let error = Error::from_error(cause, Some(ErrorCode::Numeric(500)));

    assert_eq!(error.message(), "");
    assert_eq!(error.to_string(), "[500] ");
}

#[rstest]
fn from_error_copies_the_cause_message() {
    let cause = std::io::Error::other("disk full");
    let error = Error::from_error(Some(&cause), None);
    assert_eq!(error.message(), "disk full");
    assert!(error.code().is_none());
}

#[rstest]
fn shorthands_build_code_less_errors() {
    assert_eq!(err("boom"), Error::new("boom", None));
    let cause = std::fmt::Error;
    assert_eq!(err_from(&cause).message(), cause.to_string());
}

#[rstest]
fn encodes_numeric_code_as_text(not_found: Error) {
    let json = serde_json::to_value(&not_found).expect("serializes");
    assert_eq!(json, json!({"message": "missing", "code": "404"}));
    assert!(matches!(json.get("code"), Some(Value::String(_))));
}

#[rstest]
fn omits_code_when_absent() {
    let json = serde_json::to_value(err("plain")).expect("serializes");
    assert_eq!(json, json!({"message": "plain"}));
}

#[rstest]
#[case::string_code(json!({"message": "missing", "code": "404"}))]
#[case::number_code(json!({"message": "missing", "code": 404}))]
fn decodes_string_and_numeric_codes_alike(#[case] body: Value, not_found: Error) {
    let decoded: Error = serde_json::from_value(body).expect("deserializes");
    assert_eq!(decoded, not_found);
}

#[rstest]
fn decodes_empty_code_as_absent() {
    let decoded: Error =
        serde_json::from_value(json!({"message": "m", "code": ""})).expect("deserializes");
    assert!(decoded.code().is_none());
}

#[rstest]
#[case("404", ErrorCode::Numeric(404))]
#[case("0404", ErrorCode::Text("0404".into()))]
#[case("70000", ErrorCode::Text("70000".into()))]
#[case("not-found", ErrorCode::Text("not-found".into()))]
fn parse_normalizes_only_canonical_numbers(#[case] raw: &str, #[case] expected: ErrorCode) {
    assert_eq!(ErrorCode::parse(raw), expected);
}

#[rstest]
#[case(ErrorCode::Numeric(404), Some(404))]
#[case(ErrorCode::Numeric(503), Some(503))]
#[case(ErrorCode::Numeric(200), None)]
#[case(ErrorCode::Numeric(600), None)]
#[case(ErrorCode::Text("oops".into()), None)]
fn http_status_is_limited_to_error_statuses(
    #[case] code: ErrorCode,
    #[case] expected: Option<u16>,
) {
    assert_eq!(code.http_status(), expected);
}

#[rstest]
fn convenience_constructors_set_numeric_codes() {
    let cases = [
        (Error::bad_request("x"), 400),
        (Error::unauthorized("x"), 401),
        (Error::forbidden("x"), 403),
        (Error::not_found("x"), 404),
        (Error::conflict("x"), 409),
        (Error::internal("x"), 500),
    ];
    for (error, code) in cases {
        assert_eq!(error.code(), Some(&ErrorCode::Numeric(code)));
    }
}

#[rstest]
fn with_code_replaces_existing_code(not_found: Error) {
    let error = not_found.with_code("gone");
    assert_eq!(error.to_string(), "[gone] missing");
}

#[rstest]
#[case::constructor(Error::new("m", Some(ErrorCode::parse(""))))]
#[case::with_code(err("m").with_code(""))]
#[case::replacing_a_code(Error::not_found("m").with_code(String::new()))]
fn empty_codes_are_stored_as_no_code(#[case] error: Error) {
    assert!(error.code().is_none());
    assert_eq!(error.to_string(), "m");

    let json = serde_json::to_value(&error).expect("serializes");
    assert_eq!(json, json!({"message": "m"}));
    let decoded: Error = serde_json::from_value(json).expect("deserializes");
    assert_eq!(decoded, error);
}

#[rstest]
#[case::negative(json!(-1), "-1")]
#[case::fractional(json!(4.5), "4.5")]
#[case::above_u16(json!(70000), "70000")]
fn out_of_range_numeric_codes_are_kept_as_text(#[case] code: Value, #[case] expected: &str) {
    let decoded: Error =
        serde_json::from_value(json!({"message": "m", "code": code})).expect("deserializes");
    assert_eq!(decoded.code(), Some(&ErrorCode::Text(expected.to_owned())));
}
