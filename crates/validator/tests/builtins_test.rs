//! Table-driven checks of the built-in validators through the public API.

use formtree_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn kinds_of(result: Result<(), FieldErrors>) -> Vec<String> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => errors.kinds().map(str::to_owned).collect(),
    }
}

#[rstest]
#[case::undefined(Value::Undefined, false)]
#[case::null(Value::Null, false)]
#[case::nan(Value::Number(f64::NAN), false)]
#[case::empty_text(Value::from(""), false)]
#[case::whitespace(Value::from(" \t "), false)]
#[case::empty_files(Value::Files(vec![]), false)]
#[case::invalid_date(Value::parse_date("2024-13-45"), false)]
#[case::zero(Value::from(0), true)]
#[case::false_flag(Value::from(false), true)]
#[case::text(Value::from("x"), true)]
#[case::date(Value::parse_date("2024-02-29"), true)]
#[case::files(Value::Files(vec![BlobRef::new("cv.pdf", 1024)]), true)]
fn required_matrix(#[case] value: Value, #[case] passes: bool) {
    assert_eq!(required().validate(&value).is_ok(), passes, "{value:?}");
}

#[rstest]
#[case::below(Value::from(-1), vec!["min"])]
#[case::lower_edge(Value::from(0), vec![])]
#[case::upper_edge(Value::from(10), vec![])]
#[case::above(Value::from(11), vec!["max"])]
#[case::numeric_text(Value::from("11"), vec!["max"])]
#[case::padded_text(Value::from("  5 "), vec![])]
#[case::garbage_text(Value::from("five"), vec![])]
#[case::nil(Value::Null, vec![])]
#[case::infinite(Value::from(f64::NEG_INFINITY), vec![])]
fn number_range_cases(#[case] value: Value, #[case] expected: Vec<&str>) {
    assert_eq!(kinds_of(number_range(Some(0.0), Some(10.0)).validate(&value)), expected);
}

#[rstest]
#[case("4111111111111111", true)]
#[case("4111-1111-1111-1111", true)]
#[case("4012888888881881", true)]
#[case("6011111111111117", true)]
#[case("4111111111111121", false)]
#[case("1234567", false)]
#[case("123456", false)]
#[case("", false)]
fn luhn_cases(#[case] number: &str, #[case] valid: bool) {
    assert_eq!(is_luhn_valid(number), valid, "{number}");
}

#[test]
fn validators_compose_into_one_record() {
    let validators = [
        required().shared(),
        length_range(Some(8), None).shared(),
        pattern("[0-9]").unwrap().shared(),
        email().shared(),
    ];

    let errors = run_all(&validators, &Value::from("short")).unwrap();
    assert_eq!(
        errors.kinds().collect::<Vec<_>>(),
        vec![kinds::MIN_LENGTH, kinds::PATTERN, kinds::EMAIL]
    );

    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "minLength": true, "pattern": true, "email": true })
    );
}

#[test]
fn attributes_fold_across_validators() {
    let validators = [
        required().shared(),
        number_range(Some(1.0), Some(5.0)).shared(),
        number_range(None, Some(3.0)).shared(),
        email().shared(),
        from_fn(|_: &Value| Ok(()))
            .with_attributes(NativeAttributes::new().with_pattern("^x$"))
            .shared(),
    ];

    let attrs = attributes_of(&validators);
    assert_eq!(
        attrs,
        NativeAttributes {
            required: Some(true),
            min: Some(1.0),
            max: Some(3.0),
            min_length: None,
            max_length: None,
            pattern: Some("^x$".to_owned()),
        }
    );
}
