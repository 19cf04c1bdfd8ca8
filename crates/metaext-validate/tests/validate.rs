//! Rule evaluation tests.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use metaext_model::{CellValue, ErrorItem, FieldMap, Row, Violation};
use metaext_validate::{
    ValidateError, ValidationContext, flatten_violations, render_report, validate_row,
    validate_rows,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn ctx() -> ValidationContext {
    ValidationContext::new(now())
}

fn schema(value: serde_json::Value) -> FieldMap {
    serde_json::from_value(value).expect("valid field map")
}

fn row(pairs: &[(&str, &str)]) -> Row {
    Row::from_pairs(pairs.iter().copied())
}

fn messages(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .flat_map(|v| v.error_message.iter().map(ToString::to_string))
        .collect()
}

#[test]
fn future_dates_are_rejected() {
    let schema = schema(json!({
        "collection_date": {"type": "string", "check_with": "date_not_in_future"}
    }));
    let rows = vec![
        row(&[("sample_name", "s1"), ("collection_date", "2027-10-19")]),
        row(&[("sample_name", "s2"), ("collection_date", "2026-10-19")]),
        row(&[("sample_name", "s3"), ("collection_date", "soon")]),
    ];

    let violations = validate_rows(&rows, &schema, &ctx()).unwrap();
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].sample_name, "s1");
    assert_eq!(
        violations[0].error_message,
        vec![ErrorItem::message("Date cannot be in the future")]
    );
    assert_eq!(violations[1].sample_name, "s3");
    assert_eq!(
        violations[1].error_message,
        vec![ErrorItem::message("Must be a valid date")]
    );
}

#[test]
fn failed_anyof_reports_every_branch() {
    let schema = schema(json!({
        "status": {"anyof": [
            {"type": "string", "allowed": ["active", "inactive"]},
            {"type": "integer", "allowed": [0, 1]}
        ]}
    }));
    let violations = validate_row(
        &row(&[("sample_name", "s1"), ("status", "invalid")]),
        &schema,
        &ctx(),
    )
    .unwrap();

    assert_eq!(violations.len(), 1);
    let rendered = serde_json::to_value(&violations[0].error_message).unwrap();
    assert_eq!(
        rendered,
        json!([
            "no definitions validate",
            {"0": ["unallowed value invalid"], "1": ["must be of integer type"]}
        ])
    );

    let records = flatten_violations(&violations);
    insta::assert_snapshot!(render_report(&records), @r"
    s1 | status | branch 0: unallowed value invalid; branch 1: must be of integer type
    s1 | status | no definitions validate
    ");
}

#[test]
fn anyof_passes_when_one_branch_does() {
    let schema = schema(json!({
        "host_life_stage": {"anyof": [
            {"type": "integer"},
            {"type": "string", "allowed": ["adult", "child"]}
        ]}
    }));
    let rows = vec![
        row(&[("sample_name", "a"), ("host_life_stage", "adult")]),
        row(&[("sample_name", "b"), ("host_life_stage", "12")]),
    ];
    assert!(validate_rows(&rows, &schema, &ctx()).unwrap().is_empty());
}

#[test]
fn required_fields_must_be_present_but_may_be_blank() {
    let schema = schema(json!({
        "country": {"type": "string", "required": true, "allowed": ["USA"]}
    }));
    let mut blank = row(&[("sample_name", "blank")]);
    blank.set("country", CellValue::LeaveBlank);
    let mut spaces = row(&[("sample_name", "spaces")]);
    spaces.set("country", CellValue::text("   "));
    let rows = vec![row(&[("sample_name", "absent")]), blank, spaces];

    let violations = validate_rows(&rows, &schema, &ctx()).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].sample_name, "absent");
    assert_eq!(messages(&violations), vec!["required field"]);
}

#[test]
fn regex_must_match_the_whole_value() {
    let schema = schema(json!({
        "sample_name": {"type": "string", "regex": "[a-z]+"}
    }));
    let rows = vec![row(&[("sample_name", "abc")]), row(&[("sample_name", "abc_1")])];

    let violations = validate_rows(&rows, &schema, &ctx()).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].sample_name, "abc_1");
    assert_eq!(messages(&violations), vec!["value does not match regex '[a-z]+'"]);
}

#[test]
fn allowed_numbers_compare_by_value() {
    let schema = schema(json!({
        "ph": {"type": "float", "allowed": [7, 7.5]},
        "flag": {"type": "integer", "allowed": [0, 1]}
    }));
    let rows = vec![
        row(&[("sample_name", "ok"), ("ph", "7.0"), ("flag", "1")]),
        row(&[("sample_name", "bad"), ("ph", "8.50"), ("flag", "2")]),
    ];

    let violations = validate_rows(&rows, &schema, &ctx()).unwrap();
    assert_eq!(
        messages(&violations),
        vec!["unallowed value 2", "unallowed value 8.5"]
    );
}

#[test]
fn type_mismatch_stops_remaining_rules() {
    let schema = schema(json!({
        "code": {"anyof": [
            {"type": "integer", "allowed": [1]},
            {"type": "bool", "allowed": [true]}
        ]}
    }));
    let violations =
        validate_row(&row(&[("sample_name", "s"), ("code", "7")]), &schema, &ctx()).unwrap();
    let records = flatten_violations(&violations);
    insta::assert_snapshot!(render_report(&records), @r"
    s | code | branch 0: unallowed value 7; branch 1: must be of bool type
    s | code | no definitions validate
    ");
}

#[test]
fn unknown_row_fields_and_annotations_are_ignored() {
    let schema = schema(json!({
        "host_age": {"type": "integer", "units": "years", "is_phi": true, "min_exclusive": 0}
    }));
    let violations = validate_row(
        &row(&[("sample_name", "s"), ("host_age", "-3"), ("notes", "anything")]),
        &schema,
        &ctx(),
    )
    .unwrap();
    assert!(violations.is_empty());
}

#[test]
fn uncastable_cells_are_errors() {
    let schema = schema(json!({"host_age": {"type": "integer"}}));
    let err = validate_row(
        &row(&[("sample_name", "s9"), ("host_age", "abc")]),
        &schema,
        &ctx(),
    )
    .unwrap_err();
    assert!(matches!(err, ValidateError::UncastableValue { .. }));
    assert_eq!(
        err.to_string(),
        "value 'abc' of field host_age in sample s9 cannot be cast to any of [integer]"
    );
}

#[test]
fn untyped_fields_fail_only_when_a_value_is_present() {
    let schema = schema(json!({"description": {"default": "none"}}));
    let empty = row(&[("sample_name", "s")]);
    assert!(validate_row(&empty, &schema, &ctx()).unwrap().is_empty());

    let filled = row(&[("sample_name", "s"), ("description", "x")]);
    assert!(matches!(
        validate_row(&filled, &schema, &ctx()),
        Err(ValidateError::UntypedField { field }) if field == "description"
    ));
}

#[test]
fn schema_problems_are_reported_before_rows_are_read() {
    let unknown = schema(json!({"d": {"type": "string", "check_with": "is_prime"}}));
    assert!(matches!(
        validate_rows(&[], &unknown, &ctx()),
        Err(ValidateError::UnknownPredicate { name, .. }) if name == "is_prime"
    ));

    let bad_regex = schema(json!({"d": {"type": "string", "regex": "([a-z"}}));
    assert!(matches!(
        validate_rows(&[], &bad_regex, &ctx()),
        Err(ValidateError::InvalidRegex { .. })
    ));
}

#[test]
fn report_records_are_sorted() {
    let violations = vec![
        Violation {
            sample_name: "b".to_string(),
            field_name: "x".to_string(),
            error_message: vec![ErrorItem::message("required field")],
        },
        Violation {
            sample_name: "a".to_string(),
            field_name: "y".to_string(),
            error_message: vec![
                ErrorItem::message("unallowed value 3"),
                ErrorItem::message("must be of integer type"),
            ],
        },
    ];
    let records = flatten_violations(&violations);
    let keys: Vec<(&str, &str, &str)> = records
        .iter()
        .map(|r| {
            (
                r.sample_name.as_str(),
                r.field_name.as_str(),
                r.error_message.as_str(),
            )
        })
        .collect();
    assert_eq!(
        keys,
        vec![
            ("a", "y", "must be of integer type"),
            ("a", "y", "unallowed value 3"),
            ("b", "x", "required field"),
        ]
    );
}
