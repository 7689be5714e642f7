//! Assertion entry points over trees, raw JSON text, and serializable
//! values.

use jdeq_diff::{diff_json, diff_values, DiffOptions};
use jdeq_serde::{diff_serializables, DeepEqualOptions};
use jdeq_value::Value;
use serde::Serialize;

use crate::error::{AssertError, EqualError, NotEqualError};

/// Verify that two trees are equal under the options.
pub fn equal(expected: &Value, actual: &Value, options: &DiffOptions) -> Result<(), EqualError> {
    match EqualError::collect(diff_values(expected, actual, options)) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Verify that two trees are not equal under the options.
pub fn not_equal(
    expected: &Value,
    actual: &Value,
    options: &DiffOptions,
) -> Result<(), NotEqualError> {
    if diff_values(expected, actual, options).next().is_none() {
        return Err(NotEqualError);
    }
    Ok(())
}

/// Verify that two raw JSON documents are equal under the options.
pub fn equal_json(expected: &str, actual: &str, options: &DiffOptions) -> Result<(), AssertError> {
    match EqualError::collect(diff_json(expected, actual, options)?) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Verify that two raw JSON documents are not equal under the options.
pub fn not_equal_json(
    expected: &str,
    actual: &str,
    options: &DiffOptions,
) -> Result<(), AssertError> {
    if diff_json(expected, actual, options)?.next().is_none() {
        return Err(NotEqualError.into());
    }
    Ok(())
}

/// Verify that two serializable values are equal under the options.
pub fn equal_serializables<E, A>(
    expected: &E,
    actual: &A,
    options: &DeepEqualOptions,
) -> Result<(), AssertError>
where
    E: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    match EqualError::collect(diff_serializables(expected, actual, options)?) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Verify that two serializable values are not equal under the options.
pub fn not_equal_serializables<E, A>(
    expected: &E,
    actual: &A,
    options: &DeepEqualOptions,
) -> Result<(), AssertError>
where
    E: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    if diff_serializables(expected, actual, options)?.next().is_none() {
        return Err(NotEqualError.into());
    }
    Ok(())
}

/// Panicking form of [`equal`]; the panic message is the full report.
#[track_caller]
pub fn assert_equal(expected: &Value, actual: &Value, options: &DiffOptions) {
    if let Err(error) = equal(expected, actual, options) {
        panic!("{error}");
    }
}

/// Panicking form of [`not_equal`].
#[track_caller]
pub fn assert_not_equal(expected: &Value, actual: &Value, options: &DiffOptions) {
    if let Err(error) = not_equal(expected, actual, options) {
        panic!("{error}");
    }
}

/// Panicking form of [`equal_json`].
#[track_caller]
pub fn assert_equal_json(expected: &str, actual: &str, options: &DiffOptions) {
    if let Err(error) = equal_json(expected, actual, options) {
        panic!("{error}");
    }
}

/// Panicking form of [`equal_serializables`].
#[track_caller]
pub fn assert_equal_serializables<E, A>(expected: &E, actual: &A, options: &DeepEqualOptions)
where
    E: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    if let Err(error) = equal_serializables(expected, actual, options) {
        panic!("{error}");
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::error::MAX_REPORTED_DIFFERENCES;

    fn parse(text: &str) -> Value {
        Value::from_json_str(text).unwrap()
    }

    #[test]
    fn equal_accepts_equivalent_trees() {
        let value = parse(r#"{"Id":1,"Name":"hello"}"#);
        assert!(equal(&value, &value.clone(), &DiffOptions::default()).is_ok());
    }

    #[test]
    fn equal_reports_every_difference_in_the_message() {
        let expected = parse(r#"{"Id":1,"Name":"hello"}"#);
        let actual = parse(r#"{"Id":2,"Name":"world"}"#);
        let error = equal(&expected, &actual, &DiffOptions::default()).unwrap_err();

        let expected_message = "deep equality assertion failed: 2 differences\n\
             /Id:\n\
             \u{20}   Expected: 1\n\
             \u{20}   Actual:   2\n\
             /Name:\n\
             \u{20}              ↓ (pos 1)\n\
             \u{20}   Expected: \"hello\"\n\
             \u{20}   Actual:   \"world\"\n\
             \u{20}              ↑ (pos 1)";
        assert_eq!(error.to_string(), expected_message);
    }

    #[test]
    fn singular_difference_message() {
        let error = equal(
            &parse("[0,1,2]"),
            &parse("[0,1,3]"),
            &DiffOptions::default(),
        )
        .unwrap_err();
        assert!(error
            .to_string()
            .starts_with("deep equality assertion failed: 1 difference\n"));
    }

    #[test]
    fn index_differences_render_like_the_engine_reports_them() {
        let error = equal(&parse("[0,1,2]"), &parse("[1,2]"), &DiffOptions::default()).unwrap_err();
        let expected_message = "deep equality assertion failed: 3 differences\n\
             /0:\n\
             \u{20}   Expected: 0\n\
             \u{20}   Actual:   1\n\
             /1:\n\
             \u{20}   Expected: 1\n\
             \u{20}   Actual:   2\n\
             /2:\n\
             \u{20}   Expected: 2\n\
             \u{20}   Actual:   null";
        assert_eq!(error.to_string(), expected_message);
    }

    #[test]
    fn many_differences_are_capped_at_the_report_limit() {
        let expected = parse(&format!(
            "[{}]",
            (0..512).map(|n| n.to_string()).collect::<Vec<_>>().join(",")
        ));
        let actual = parse(&format!(
            "[{}]",
            (1..513).map(|n| n.to_string()).collect::<Vec<_>>().join(",")
        ));
        let error = equal(&expected, &actual, &DiffOptions::default()).unwrap_err();

        assert_eq!(error.differences().len(), MAX_REPORTED_DIFFERENCES + 1);
        assert_eq!(error.count_display(), "20+");
        assert!(error
            .to_string()
            .starts_with("deep equality assertion failed: 20+ differences\n/0:"));
    }

    #[test]
    fn not_equal_rejects_equivalent_trees() {
        let value = parse(r#"{"Id":1}"#);
        assert!(not_equal(&value, &value.clone(), &DiffOptions::default()).is_err());
        assert!(not_equal(&value, &parse(r#"{"Id":2}"#), &DiffOptions::default()).is_ok());
    }

    #[test]
    fn equal_json_normalizes_before_parsing() {
        let options = DiffOptions {
            ignore_case: true,
            ..Default::default()
        };
        assert!(equal_json(r#"{"A":"X"}"#, r#"{"a":"x"}"#, &options).is_ok());
        assert!(equal_json(r#"{"A":"X"}"#, r#"{"a":"y"}"#, &options).is_err());
    }

    #[test]
    fn equal_json_propagates_parse_errors() {
        let result = equal_json("{", "{}", &DiffOptions::default());
        assert!(matches!(result, Err(AssertError::Parse(_))));
    }

    #[test]
    fn exclusions_make_the_assertion_pass() {
        let expected = parse(r#"{"Id":1,"Name":"a"}"#);
        let actual = parse(r#"{"Id":2,"Name":"a"}"#);
        assert!(equal(&expected, &actual, &DiffOptions::default()).is_err());

        for pattern in ["/Id", "I*"] {
            let options = DiffOptions {
                exclude_paths: vec![pattern.into()],
                ..Default::default()
            };
            assert!(
                equal(&expected, &actual, &options).is_ok(),
                "pattern {pattern} should make the trees equivalent"
            );
        }
    }

    #[test]
    fn serializable_values_assert_end_to_end() {
        #[derive(Serialize)]
        struct Person {
            id: u32,
            full_name: String,
        }
        let a = Person {
            id: 1,
            full_name: "Robert Paulson".into(),
        };
        let b = Person {
            id: 1,
            full_name: "Robert Plant".into(),
        };
        assert!(equal_serializables(&a, &a, &DeepEqualOptions::default()).is_ok());

        let error = equal_serializables(&a, &b, &DeepEqualOptions::default()).unwrap_err();
        let AssertError::Differences(error) = error else {
            panic!("expected a differences failure, got {error:?}");
        };
        assert_eq!(error.differences().len(), 1);
        assert_eq!(error.differences()[0].path(), "/full_name");

        assert!(not_equal_serializables(&a, &b, &DeepEqualOptions::default()).is_ok());
    }

    #[test]
    #[should_panic(expected = "deep equality assertion failed: 1 difference")]
    fn assert_equal_panics_with_the_report() {
        assert_equal(
            &parse(r#"{"a":1}"#),
            &parse(r#"{"a":2}"#),
            &DiffOptions::default(),
        );
    }

    #[test]
    fn assert_not_equal_accepts_differing_trees() {
        assert_not_equal(
            &parse(r#"{"a":1}"#),
            &parse(r#"{"a":2}"#),
            &DiffOptions::default(),
        );
    }
}
