//! Integration tests for the validation engine.
//!
//! Character-class tables cover strings outside ASCII, numeric values that
//! render with signs or fractions, and punctuation.

use fieldcheck::prelude::*;
use fieldcheck::{PatternLibrary, SchemaError};
use std::sync::Arc;
use std::thread;

fn check_one(build: impl Fn(&mut RuleChain), value: Value) -> bool {
    let mut validator = Validator::new();
    build(validator.add_field("t1", ""));
    validator.validate(&record! { "t1" => value }).is_valid()
}

fn run_table(name: &str, build: impl Fn(&mut RuleChain), table: &[(Value, bool)]) {
    for (value, expected) in table {
        assert_eq!(
            check_one(&build, value.clone()),
            *expected,
            "{name}({value:?})"
        );
    }
}

fn s(text: &str) -> Value {
    Value::from(text)
}

/// Inputs shared by the character-class tables, in the same order as the
/// expectation arrays below.
fn char_class_inputs() -> Vec<Value> {
    vec![
        s("\n"),
        s("\r"),
        s("Ⅸ"),
        s(""),
        s("   fooo   "),
        s("abc!!!"),
        s("abc1"),
        s("abc〩"),
        s("abc"),
        s("소주"),
        s("ABC"),
        s("FoObAr"),
        s("소aBC"),
        s("소"),
        s("달기&Co."),
        s("〩Hours"),
        s("\u{fff0}"),
        s("\u{0070}"),
        s("\u{0026}"),
        s("\u{0030}"),
        s("123"),
        s("0123"),
        s("-00123"),
        s("0"),
        s("-0"),
        s("123.123"),
        Value::Int(123),
        Value::Int(-83),
        Value::Int(0),
        Value::Float(123.123),
        s(" "),
        s("."),
        s("-1¾"),
        s("1¾"),
        s("〥〩"),
        s("모자"),
        s("ix"),
        s("۳۵۶۰"),
        s("1--"),
        s("1-1"),
        s("-"),
        s("--"),
        s("1++"),
        s("1+1"),
        s("+"),
        s("++"),
        s("+1"),
    ]
}

fn table(expected: &[bool]) -> Vec<(Value, bool)> {
    let inputs = char_class_inputs();
    assert_eq!(inputs.len(), expected.len());
    inputs.into_iter().zip(expected.iter().copied()).collect()
}

#[rustfmt::skip]
const ALPHA: [bool; 47] = [
    false, false, false, false, false, false, false, false, true, false,
    true, true, false, false, false, false, false, true, false, false,
    false, false, false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, true, false, false, false,
    false, false, false, false, false, false, false,
];

#[rustfmt::skip]
const ALPHA_NUMERIC: [bool; 47] = [
    false, false, false, false, false, false, true, false, true, false,
    true, true, false, false, false, false, false, true, false, true,
    true, true, false, true, false, false, true, false, true, false,
    false, false, false, false, false, false, true, false, false, false,
    false, false, false, false, false, false, false,
];

#[rustfmt::skip]
const ALPHA_DASH: [bool; 47] = [
    false, false, false, false, false, false, true, false, true, false,
    true, true, false, false, false, false, false, true, false, true,
    true, true, true, true, true, false, true, true, true, false,
    false, false, false, false, false, false, true, false, true, true,
    true, true, false, false, false, false, false,
];

#[test]
fn alpha_table() {
    run_table("alpha", |c| { c.alpha(""); }, &table(&ALPHA));
}

#[test]
fn alpha_numeric_table() {
    run_table("alphaNumeric", |c| { c.alpha_numeric(""); }, &table(&ALPHA_NUMERIC));
}

#[test]
fn alpha_dash_table() {
    run_table("alphaDash", |c| { c.alpha_dash(""); }, &table(&ALPHA_DASH));
}

#[test]
fn between_table() {
    let cases = [
        (Value::Int(2), false),
        (Value::Int(-2), false),
        (Value::Int(0), true),
        (Value::Int(1), true),
        (Value::Int(-1), true),
        (s("2"), false),
        (s("-2"), false),
        (s("0"), true),
        (s("1"), true),
        (s("-1"), true),
        (s("aa"), false),
    ];
    run_table("between", |c| { c.between(-1, 1, ""); }, &cases);
}

#[test]
fn mixed_record_passes() {
    let mut validator = Validator::new();
    validator
        .add_field("username", "")
        .required("")
        .alpha_numeric("")
        .length(4, "");
    validator.add_field("password", "").required("").alpha_dash("");
    validator.add_field("status", "").required("").boolean("");
    validator.add_field("other", "");

    let result = validator.validate(&record! {
        "username" => "test",
        "password" => 12345,
        "status" => false,
    });

    assert!(result.is_valid(), "{:?}", result.error());
    let keys: Vec<_> = result.validated().keys().collect();
    assert_eq!(keys, ["username", "password", "status"]);
}

#[test]
fn missing_required_field_fails() {
    let mut validator = Validator::new();
    validator.add_field("username", "username").required("username is required");

    let result = validator.validate(&record! { "user" => "test" });
    let err = result.error().expect("validation should fail");
    assert_eq!(err.field(), "username");
    assert_eq!(err.alias(), "username");
    assert_eq!(err.rule(), &RuleKind::Required);
    assert_eq!(err.message(), "username is required");
    assert!(err.field_value().is_none());
}

#[test]
fn both_fields_failing_reports_the_first_declared() {
    let mut validator = Validator::new();
    validator.add_field("b", "").numeric("b must be numeric");
    validator.add_field("a", "").numeric("a must be numeric");

    let result = validator.validate(&record! { "a" => "x", "b" => "y" });
    assert_eq!(result.error().unwrap().field(), "b");
}

#[test]
fn rules_in_a_chain_stop_at_the_first_failure() {
    let mut validator = Validator::new();
    validator
        .add_field("code", "")
        .length(3, "wrong length")
        .numeric("not numeric");

    let err = validator
        .validate(&record! { "code" => "abcd" })
        .into_result()
        .unwrap_err();
    assert_eq!(err.message(), "wrong length");
    assert_eq!(err.args(), &[Value::UInt(3)]);
}

#[test]
fn redeclared_fields_share_one_chain() {
    let mut validator = Validator::new();
    validator.add_field("name", "Name").required("missing");
    validator.add_field("name", "").alpha("letters only");

    assert_eq!(validator.schema().len(), 1);
    let err = validator
        .validate(&record! { "name" => "r2d2" })
        .into_result()
        .unwrap_err();
    assert_eq!(err.message(), "letters only");
    assert_eq!(err.alias(), "Name");
}

#[test]
fn password_confirmation() {
    let mut validator = Validator::new();
    validator.add_field("password", "").required("").length_min(8, "too short");
    validator
        .add_field("confirm", "")
        .required("")
        .equal_with_column("password", "passwords differ");
    validator
        .add_field("old_password", "")
        .different_with_column("password", "choose a new password");

    let ok = record! {
        "password" => "correct horse",
        "confirm" => "correct horse",
        "old_password" => "hunter22",
    };
    assert!(validator.validate(&ok).is_valid());

    let mismatch = record! { "password" => "correct horse", "confirm" => "correct hose" };
    assert_eq!(
        validator.validate(&mismatch).error().unwrap().message(),
        "passwords differ"
    );

    let reused = record! {
        "password" => "correct horse",
        "confirm" => "correct horse",
        "old_password" => "correct horse",
    };
    assert_eq!(
        validator.validate(&reused).error().unwrap().message(),
        "choose a new password"
    );
}

#[test]
fn json_records_validate_like_literal_ones() {
    let mut validator = Validator::new();
    validator.add_field("email", "").required("").email("bad email");
    validator.add_field("age", "").integer("").min(18, "too young");
    validator.add_field("site", "").url("bad url");

    let record = Record::from_json_str(
        r#"{"email": "ada@example.com", "age": 36, "site": "https://example.com/about"}"#,
    )
    .unwrap();
    assert!(validator.validate(&record).is_valid());

    let record = Record::from_json_str(r#"{"email": "ada@example.com", "age": 12}"#).unwrap();
    let err = validator.validate(&record).into_result().unwrap_err();
    assert_eq!(err.message(), "too young");

    let body = serde_json::to_value(err.to_api_error()).unwrap();
    assert_eq!(body["error"]["fields"][0]["code"], "min");
    assert_eq!(body["error"]["fields"][0]["params"]["value"], 12);
}

#[test]
fn custom_pattern_library() {
    let library = PatternLibrary::builtin()
        .with_pattern("alpha", "^[a-z]+$")
        .unwrap();
    let mut validator = Validator::with_patterns(library);
    validator.add_field("slug", "").alpha("lowercase only");

    assert!(validator.validate(&record! { "slug" => "abc" }).is_valid());
    assert!(!validator.validate(&record! { "slug" => "Abc" }).is_valid());
}

#[test]
fn definition_and_builder_agree() {
    let json = r#"{
        "fields": [
            { "name": "username", "rules": [
                { "rule": "required" },
                { "rule": "alphaNumeric" },
                { "rule": "length", "args": [4] }
            ]},
            { "name": "color", "rules": [
                { "rule": "in", "args": ["red", "green", "blue"] }
            ]}
        ]
    }"#;
    let loaded = Validator::from_schema(Schema::from_json_str(json).unwrap());

    let mut built = Validator::new();
    built.add_field("username", "").required("").alpha_numeric("").length(4, "");
    built.add_field("color", "").is_in(["red", "green", "blue"], "");

    assert_eq!(
        SchemaDefinition::from_schema(loaded.schema()).pretty_print(),
        SchemaDefinition::from_schema(built.schema()).pretty_print()
    );

    for record in [
        record! { "username" => "test", "color" => "red" },
        record! { "username" => "tes", "color" => "red" },
        record! { "username" => "test", "color" => "pink" },
        record! { "color" => "blue" },
    ] {
        assert_eq!(
            loaded.validate(&record).is_valid(),
            built.validate(&record).is_valid()
        );
    }
}

#[test]
fn schema_errors_are_reported_at_load_time() {
    let json = r#"{"fields":[{"name":"a","rules":[{"rule":"regexp","args":["[unclosed"]}]}]}"#;
    let err = Schema::from_json_str(json).unwrap_err();
    assert!(matches!(err, SchemaError::Pattern { .. }));
    assert!(err.to_string().contains("regexp"));
}

#[test]
fn one_validator_many_threads() {
    let mut validator = Validator::new();
    validator.add_field("n", "").required("").integer("").between(0, 100, "");
    let validator = Arc::new(validator);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                (0..50).all(|j| {
                    let n = i * 50 + j;
                    validator.validate(&record! { "n" => n }).is_valid() == (n <= 100)
                })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
