//! The recursive tree diff walk.
//!
//! The walk is expressed as an explicit work stack so the difference
//! sequence is pull-based: taking the first N records performs no more work
//! than producing them requires, and dropping the iterator abandons the
//! rest. Re-running a comparison means calling the entry point again; no
//! state is shared between calls.

use jdeq_value::Value;

use crate::error::DiffResult;
use crate::filter::PathFilter;
use crate::node::DiffNode;
use crate::normalize::{normalize_document, normalize_tree};
use crate::options::DiffOptions;

/// Find the differences between two tree values.
///
/// Returns a lazy sequence of [`DiffNode`] records; an empty sequence means
/// the values are equivalent under the options.
///
/// # Examples
///
/// ```
/// use jdeq_diff::{diff_values, DiffOptions};
/// use jdeq_value::Value;
///
/// let expected = Value::from_json_str(r#"{"id":1,"name":"a"}"#).unwrap();
/// let actual = Value::from_json_str(r#"{"id":1,"name":"b"}"#).unwrap();
///
/// let differences: Vec<_> = diff_values(&expected, &actual, &DiffOptions::default()).collect();
/// assert_eq!(differences.len(), 1);
/// assert_eq!(differences[0].path(), "/name");
/// ```
pub fn diff_values(expected: &Value, actual: &Value, options: &DiffOptions) -> Differences {
    diff_optional_values(Some(expected), Some(actual), options)
}

/// Like [`diff_values`], with either root allowed to be missing.
///
/// A missing root is compared as null: one missing side and one non-null
/// side is an ordinary difference, not an error.
pub fn diff_optional_values(
    expected: Option<&Value>,
    actual: Option<&Value>,
    options: &DiffOptions,
) -> Differences {
    let prepare = |value: Option<&Value>| match value {
        Some(value) if options.has_text_options() => normalize_tree(value, options),
        Some(value) => value.clone(),
        None => Value::Null,
    };
    Differences::new(prepare(expected), prepare(actual), options)
}

/// Find the differences between two raw JSON documents.
///
/// The textual normalization options are applied to the whole document text
/// before parsing, so they also affect inter-token whitespace and property
/// names; escape sequences inside string literals are left as written.
/// Parse failures propagate as errors.
pub fn diff_json(
    expected_json: &str,
    actual_json: &str,
    options: &DiffOptions,
) -> DiffResult<Differences> {
    let (expected_json, actual_json) = if options.has_text_options() {
        tracing::debug!("normalizing both documents before parsing");
        (
            normalize_document(expected_json, options),
            normalize_document(actual_json, options),
        )
    } else {
        (expected_json.to_string(), actual_json.to_string())
    };

    let expected = Value::from_json_str(&expected_json)?;
    let actual = Value::from_json_str(&actual_json)?;
    // Normalization already happened at the text level; build the iterator
    // directly so string values are not transformed a second time.
    Ok(Differences::new(expected, actual, options))
}

/// The lazy sequence of differences for one comparison.
///
/// A `Differences` value is independent of every other: cloning an
/// un-started one snapshots the comparison, and separate calls to the entry
/// points never interfere, so concurrent comparisons from different threads
/// are safe.
#[derive(Clone, Debug)]
pub struct Differences {
    stack: Vec<Task>,
    filter: Option<PathFilter>,
    options: DiffOptions,
}

#[derive(Clone, Debug)]
enum Task {
    /// Compare two values at a path, missing sides already folded to null.
    Compare {
        expected: Value,
        actual: Value,
        path: String,
    },
    /// A fully-formed record awaiting the path filter.
    Emit(DiffNode),
}

impl Differences {
    fn new(expected: Value, actual: Value, options: &DiffOptions) -> Self {
        Self {
            stack: vec![Task::Compare {
                expected,
                actual,
                path: String::new(),
            }],
            filter: PathFilter::from_options(options),
            options: options.clone(),
        }
    }

    fn keep(&self, path: &str) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.keep(path))
    }

    /// Returns `true` when the value is equivalent to null under the
    /// ignore-empty options.
    fn is_null_equivalent(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(elements) => self.options.ignore_empty_arrays && elements.is_empty(),
            Value::Object(members) => self.options.ignore_empty_objects && members.is_empty(),
            _ => false,
        }
    }

    fn expand(&mut self, expected: Value, actual: Value, path: String) {
        if self.is_null_equivalent(&expected) && self.is_null_equivalent(&actual) {
            return;
        }
        match (expected, actual) {
            (Value::Object(expected_members), Value::Object(actual_members)) => {
                self.expand_objects(expected_members, actual_members, &path);
            }
            (Value::Array(expected_elements), Value::Array(actual_elements)) => {
                self.expand_arrays(expected_elements, actual_elements, &path);
            }
            (expected, actual) => {
                if expected != actual {
                    self.stack
                        .push(Task::Emit(DiffNode::new(path, Some(expected), Some(actual))));
                }
            }
        }
    }

    /// Walk expected members in order against an ordinal name lookup in the
    /// actual object, then compare the actual side's extra members against
    /// null. Property order never affects equivalence.
    fn expand_objects(
        &mut self,
        expected_members: Vec<(String, Value)>,
        actual_members: Vec<(String, Value)>,
        path: &str,
    ) {
        let mut actual_slots: Vec<(String, Option<Value>)> = actual_members
            .into_iter()
            .map(|(name, value)| (name, Some(value)))
            .collect();

        let mut tasks = Vec::with_capacity(actual_slots.len());
        for (name, expected_value) in expected_members {
            let actual_value = actual_slots
                .iter_mut()
                .find(|(actual_name, _)| *actual_name == name)
                .and_then(|(_, slot)| slot.take())
                .unwrap_or(Value::Null);
            tasks.push(Task::Compare {
                expected: expected_value,
                actual: actual_value,
                path: format!("{path}/{name}"),
            });
        }
        for (name, slot) in actual_slots {
            if let Some(actual_value) = slot {
                tasks.push(Task::Compare {
                    expected: Value::Null,
                    actual: actual_value,
                    path: format!("{path}/{name}"),
                });
            }
        }

        // Reverse so the first member's task is popped first.
        for task in tasks.into_iter().rev() {
            self.stack.push(task);
        }
    }

    fn expand_arrays(
        &mut self,
        expected_elements: Vec<Value>,
        actual_elements: Vec<Value>,
        path: &str,
    ) {
        if expected_elements.is_empty() && actual_elements.is_empty() {
            return;
        }
        if self.options.ignore_array_element_order {
            self.expand_arrays_unordered(expected_elements, actual_elements, path);
            return;
        }

        // Pairwise by index; the longer side's extras compare against null.
        let expected_len = expected_elements.len();
        let mut actual_iter = actual_elements.into_iter();
        let mut tasks = Vec::new();
        for (index, expected_element) in expected_elements.into_iter().enumerate() {
            tasks.push(Task::Compare {
                expected: expected_element,
                actual: actual_iter.next().unwrap_or(Value::Null),
                path: format!("{path}/{index}"),
            });
        }
        for (offset, actual_element) in actual_iter.enumerate() {
            tasks.push(Task::Compare {
                expected: Value::Null,
                actual: actual_element,
                path: format!("{path}/{}", expected_len + offset),
            });
        }
        for task in tasks.into_iter().rev() {
            self.stack.push(task);
        }
    }

    /// Greedy order-insensitive matching: each expected element, in order,
    /// claims the first not-yet-claimed actual element that compares with
    /// zero differences. Leftovers on both sides are reported together under
    /// the `*` pseudo-segment, and a count mismatch under `length`.
    fn expand_arrays_unordered(
        &mut self,
        expected_elements: Vec<Value>,
        actual_elements: Vec<Value>,
        path: &str,
    ) {
        let bucket_path = format!("{path}/*");
        tracing::trace!(
            path,
            expected = expected_elements.len(),
            actual = actual_elements.len(),
            "matching array elements in any order"
        );

        let mut expected_matched = vec![false; expected_elements.len()];
        let mut actual_matched = vec![false; actual_elements.len()];
        'expected: for (i, expected_element) in expected_elements.iter().enumerate() {
            for (j, actual_element) in actual_elements.iter().enumerate() {
                if actual_matched[j] {
                    continue;
                }
                if !self.has_differences(expected_element, actual_element, &bucket_path) {
                    expected_matched[i] = true;
                    actual_matched[j] = true;
                    break;
                }
            }
            if actual_matched.iter().all(|matched| *matched) {
                break 'expected;
            }
        }

        let expected_len = expected_elements.len();
        let actual_len = actual_elements.len();
        let unmatched_expected: Vec<Value> = expected_elements
            .into_iter()
            .zip(&expected_matched)
            .filter(|(_, matched)| !**matched)
            .map(|(element, _)| element)
            .collect();
        let unmatched_actual: Vec<Value> = actual_elements
            .into_iter()
            .zip(&actual_matched)
            .filter(|(_, matched)| !**matched)
            .map(|(element, _)| element)
            .collect();

        // Push the length record first so the bucket record is popped first.
        if expected_len != actual_len {
            self.stack.push(Task::Emit(DiffNode::new(
                format!("{path}/length"),
                Some(Value::from(expected_len as u64)),
                Some(Value::from(actual_len as u64)),
            )));
        }
        if !unmatched_expected.is_empty() || !unmatched_actual.is_empty() {
            self.stack.push(Task::Emit(DiffNode::new(
                bucket_path,
                Some(Value::Array(unmatched_expected)),
                Some(Value::Array(unmatched_actual)),
            )));
        }
    }

    /// Probe whether two values differ at all under the current options and
    /// filter. Used by unordered matching, where a filtered-out difference
    /// must not prevent a match.
    fn has_differences(&self, expected: &Value, actual: &Value, path: &str) -> bool {
        let mut probe = Differences {
            stack: vec![Task::Compare {
                expected: expected.clone(),
                actual: actual.clone(),
                path: path.to_string(),
            }],
            filter: self.filter.clone(),
            options: self.options.clone(),
        };
        probe.next().is_some()
    }
}

impl Iterator for Differences {
    type Item = DiffNode;

    fn next(&mut self) -> Option<DiffNode> {
        while let Some(task) = self.stack.pop() {
            match task {
                Task::Emit(node) => {
                    if self.keep(node.path()) {
                        return Some(node);
                    }
                }
                Task::Compare {
                    expected,
                    actual,
                    path,
                } => self.expand(expected, actual, path),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;

    fn parse(text: &str) -> Value {
        Value::from_json_str(text).unwrap()
    }

    fn diff_all(expected: &str, actual: &str, options: &DiffOptions) -> Vec<DiffNode> {
        diff_values(&parse(expected), &parse(actual), options).collect()
    }

    fn default_diff(expected: &str, actual: &str) -> Vec<DiffNode> {
        diff_all(expected, actual, &DiffOptions::default())
    }

    #[test]
    fn identical_documents_have_no_differences() {
        let text = r#"{"id":1,"name":"a","tags":[1,2,{"x":null}]}"#;
        assert!(default_diff(text, text).is_empty());
    }

    #[test]
    fn comparing_a_tree_to_a_deep_copy_is_empty() {
        let value = parse(r#"{"a":{"b":[1,2,3]},"c":"text"}"#);
        let copy = value.clone();
        assert!(diff_values(&value, &copy, &DiffOptions::default())
            .next()
            .is_none());
    }

    #[test]
    fn scalar_mismatch_reports_the_root_path() {
        let differences = default_diff("1", "2");
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "");
        assert_eq!(differences[0].expected(), &Value::from(1i64));
        assert_eq!(differences[0].actual(), &Value::from(2i64));
    }

    #[test]
    fn integer_and_float_forms_differ() {
        assert_eq!(default_diff("2", "2.0").len(), 1);
        assert!(default_diff("2.5", "2.5").is_empty());
    }

    #[test]
    fn null_root_against_value_is_a_difference() {
        let value = parse(r#"{"a":1}"#);
        let differences: Vec<_> =
            diff_optional_values(None, Some(&value), &DiffOptions::default()).collect();
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].expected(), &Value::Null);
        assert_eq!(differences[0].actual(), &value);
    }

    #[test]
    fn detection_is_symmetric_with_swapped_display() {
        let a = parse(r#"{"name":"a"}"#);
        let b = parse(r#"{"name":"b"}"#);
        let forward: Vec<_> = diff_values(&a, &b, &DiffOptions::default()).collect();
        let backward: Vec<_> = diff_values(&b, &a, &DiffOptions::default()).collect();
        assert_eq!(forward.len(), 1);
        assert_eq!(backward.len(), 1);
        assert_eq!(forward[0].expected(), backward[0].actual());
        assert_eq!(forward[0].actual(), backward[0].expected());
    }

    #[test]
    fn object_walk_reports_missing_and_extra_members() {
        let differences = default_diff(r#"{"a":1,"b":2}"#, r#"{"b":2,"c":3}"#);
        assert_eq!(differences.len(), 2);
        assert_eq!(differences[0].path(), "/a");
        assert_eq!(differences[0].actual(), &Value::Null);
        assert_eq!(differences[1].path(), "/c");
        assert_eq!(differences[1].expected(), &Value::Null);
    }

    #[test]
    fn property_order_does_not_matter() {
        assert!(default_diff(r#"{"a":1,"b":2}"#, r#"{"b":2,"a":1}"#).is_empty());
    }

    #[test]
    fn nested_differences_carry_full_paths() {
        let differences = default_diff(
            r#"{"company":{"employees":[{"id":1}]}}"#,
            r#"{"company":{"employees":[{"id":2}]}}"#,
        );
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/company/employees/0/id");
    }

    #[test]
    fn arrays_compare_pairwise_by_default() {
        let differences = default_diff("[1,2,3]", "[4,5,6]");
        let paths: Vec<_> = differences.iter().map(|d| d.path().to_string()).collect();
        assert_eq!(paths, vec!["/0", "/1", "/2"]);
    }

    #[test]
    fn longer_side_extras_compare_against_null() {
        let differences = default_diff("[1,2,3]", "[1,2]");
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/2");
        assert_eq!(differences[0].expected(), &Value::from(3i64));
        assert_eq!(differences[0].actual(), &Value::Null);

        let differences = default_diff("[1,2]", "[1,2,5]");
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/2");
        assert_eq!(differences[0].expected(), &Value::Null);
        assert_eq!(differences[0].actual(), &Value::from(5i64));
    }

    #[test]
    fn reordered_arrays_differ_by_default() {
        assert_eq!(default_diff("[1,2,3]", "[3,2,1]").len(), 2);
    }

    #[test]
    fn reordered_arrays_match_when_order_is_ignored() {
        let options = DiffOptions {
            ignore_array_element_order: true,
            ..Default::default()
        };
        assert!(diff_all("[1,2,3]", "[3,2,1]", &options).is_empty());
    }

    #[test]
    fn unordered_leftovers_are_bucketed() {
        let options = DiffOptions {
            ignore_array_element_order: true,
            ..Default::default()
        };
        let differences = diff_all("[1,2,3]", "[4,5,6]", &options);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/*");
        assert_eq!(differences[0].expected(), &parse("[1,2,3]"));
        assert_eq!(differences[0].actual(), &parse("[4,5,6]"));
    }

    #[test]
    fn unordered_length_mismatch_adds_a_length_record() {
        let options = DiffOptions {
            ignore_array_element_order: true,
            ..Default::default()
        };
        let differences = diff_all("[1,2,3]", "[1,2]", &options);
        assert_eq!(differences.len(), 2);
        assert_eq!(differences[0].path(), "/*");
        assert_eq!(differences[0].expected(), &parse("[3]"));
        assert_eq!(differences[0].actual(), &parse("[]"));
        assert_eq!(differences[1].path(), "/length");
        assert_eq!(differences[1].expected(), &Value::from(3u64));
        assert_eq!(differences[1].actual(), &Value::from(2u64));
    }

    #[test]
    fn unordered_duplicates_claim_one_element_each() {
        let options = DiffOptions {
            ignore_array_element_order: true,
            ..Default::default()
        };
        assert!(diff_all("[1,1,2]", "[2,1,1]", &options).is_empty());
        let differences = diff_all("[1,1]", "[1,2]", &options);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/*");
        assert_eq!(differences[0].expected(), &parse("[1]"));
        assert_eq!(differences[0].actual(), &parse("[2]"));
    }

    #[test]
    fn nested_unordered_paths_use_the_star_segment() {
        let options = DiffOptions {
            ignore_array_element_order: true,
            ..Default::default()
        };
        let differences = diff_all(r#"{"tags":[1,2]}"#, r#"{"tags":[2,3]}"#, &options);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/tags/*");
    }

    #[test]
    fn empty_arrays_are_equal_in_both_modes() {
        assert!(default_diff("[]", "[]").is_empty());
        let options = DiffOptions {
            ignore_array_element_order: true,
            ..Default::default()
        };
        assert!(diff_all("[]", "[]", &options).is_empty());
    }

    #[test]
    fn empty_array_against_null_differs_by_default() {
        assert_eq!(default_diff(r#"{"a":[]}"#, r#"{"a":null}"#).len(), 1);
        assert_eq!(default_diff(r#"{"a":[]}"#, r#"{}"#).len(), 1);
    }

    #[test]
    fn ignore_empty_arrays_equates_empty_with_missing() {
        let options = DiffOptions {
            ignore_empty_arrays: true,
            ..Default::default()
        };
        assert!(diff_all(r#"{"a":[]}"#, r#"{"a":null}"#, &options).is_empty());
        assert!(diff_all(r#"{"a":[]}"#, r#"{}"#, &options).is_empty());
        assert_eq!(diff_all(r#"{"a":[]}"#, r#"{"a":[1]}"#, &options).len(), 1);
    }

    #[test]
    fn ignore_empty_objects_equates_empty_with_missing() {
        let options = DiffOptions {
            ignore_empty_objects: true,
            ..Default::default()
        };
        assert!(diff_all(r#"{"a":{}}"#, r#"{}"#, &options).is_empty());
        assert!(diff_all(r#"{"a":{}}"#, r#"{"a":null}"#, &options).is_empty());
        assert_eq!(
            diff_all(r#"{"a":{}}"#, r#"{"a":{"x":1}}"#, &options).len(),
            1
        );
    }

    #[test]
    fn literal_path_exclusion_suppresses_a_difference() {
        let options = DiffOptions {
            exclude_paths: vec!["/Id".into()],
            ..Default::default()
        };
        assert!(diff_all(r#"{"Id":1,"Name":"a"}"#, r#"{"Id":2,"Name":"a"}"#, &options).is_empty());
    }

    #[test]
    fn glob_name_exclusion_suppresses_a_difference() {
        let options = DiffOptions {
            exclude_paths: vec!["I*".into()],
            ..Default::default()
        };
        assert!(diff_all(r#"{"Id":1}"#, r#"{"Id":2}"#, &options).is_empty());
    }

    #[test]
    fn double_star_exclusion_reaches_across_array_indexes() {
        let expected = r#"{"Employees":[{"FullName":"Robert Paulson"},{"FullName":"Jenny Heath"}]}"#;
        let actual = r#"{"Employees":[{"FullName":"Robert Plant"},{"FullName":"Jenny Heath"}]}"#;
        assert_eq!(default_diff(expected, actual).len(), 1);

        for pattern in [
            "/Employees/**",
            "/Employees/*/FullName",
            "**/Employees/*/FullName",
            "**Employees/*/FullName",
            "Employees/0/*Name*",
        ] {
            let options = DiffOptions {
                exclude_paths: vec![pattern.into()],
                ..Default::default()
            };
            assert!(
                diff_all(expected, actual, &options).is_empty(),
                "pattern {pattern} should suppress the difference"
            );
        }
    }

    #[test]
    fn exclusion_does_not_suppress_siblings() {
        let options = DiffOptions {
            exclude_paths: vec!["/a".into()],
            ..Default::default()
        };
        let differences = diff_all(r#"{"a":1,"b":2}"#, r#"{"a":9,"b":3}"#, &options);
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/b");
    }

    #[test]
    fn custom_path_filter_narrows_the_exclusions() {
        let options = DiffOptions {
            exclude_paths: vec!["/a".into()],
            path_filter: Some(Arc::new(|path: &str| path != "/b")),
            ..Default::default()
        };
        let differences = diff_all(
            r#"{"a":1,"b":2,"c":3}"#,
            r#"{"a":9,"b":9,"c":9}"#,
            &options,
        );
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/c");
    }

    #[test]
    fn filtered_differences_allow_unordered_matches() {
        // The elements differ only at an excluded path, so they must still
        // pair up under order-insensitive matching.
        let options = DiffOptions {
            ignore_array_element_order: true,
            exclude_paths: vec!["**/Id".into()],
            ..Default::default()
        };
        assert!(diff_all(
            r#"[{"Id":1,"x":"a"},{"Id":2,"x":"b"}]"#,
            r#"[{"Id":9,"x":"b"},{"Id":8,"x":"a"}]"#,
            &options
        )
        .is_empty());
    }

    #[test]
    fn case_differences_are_significant_by_default() {
        assert_eq!(default_diff(r#""Hello""#, r#""hello""#).len(), 1);
    }

    #[test]
    fn ignore_case_applies_to_values_and_names() {
        let options = DiffOptions {
            ignore_case: true,
            ..Default::default()
        };
        assert!(diff_all(r#""Hello""#, r#""hello""#, &options).is_empty());
        assert!(diff_all(r#"{"Name":"A"}"#, r#"{"name":"a"}"#, &options).is_empty());
    }

    #[test]
    fn line_ending_normalization_is_opt_in() {
        let expected = "\"hello\\nworld\"";
        let actual = "\"hello\\r\\nworld\"";
        assert_eq!(default_diff(expected, actual).len(), 1);
        let options = DiffOptions {
            ignore_line_ending_differences: true,
            ..Default::default()
        };
        assert!(diff_all(expected, actual, &options).is_empty());
    }

    #[test]
    fn whitespace_normalization_is_opt_in() {
        let expected = r#""hello world""#;
        let actual = r#""hello  world""#;
        assert_eq!(default_diff(expected, actual).len(), 1);
        let options = DiffOptions {
            ignore_white_space_differences: true,
            ..Default::default()
        };
        assert!(diff_all(expected, actual, &options).is_empty());
    }

    #[test]
    fn text_options_compose() {
        let options = DiffOptions {
            ignore_case: true,
            ignore_line_ending_differences: true,
            ignore_white_space_differences: true,
            ..Default::default()
        };
        assert!(diff_all(r#""Hello \r\nWorld""#, r#""hello  \nworld""#, &options).is_empty());
    }

    #[test]
    fn diff_json_parses_after_normalizing() {
        let options = DiffOptions {
            ignore_case: true,
            ..Default::default()
        };
        let differences: Vec<_> = diff_json(r#"{"A": "X"}"#, r#"{"a": "x"}"#, &options)
            .unwrap()
            .collect();
        assert!(differences.is_empty());
    }

    #[test]
    fn diff_json_rejects_malformed_documents() {
        assert!(diff_json("{", "{}", &DiffOptions::default()).is_err());
    }

    #[test]
    fn bytes_compare_exactly() {
        let expected = Value::Object(vec![("data".into(), Value::bytes(vec![1u8, 2, 3]))]);
        let actual = Value::Object(vec![("data".into(), Value::bytes(vec![1u8, 2, 2]))]);
        let differences: Vec<_> = diff_values(&expected, &actual, &DiffOptions::default()).collect();
        assert_eq!(differences.len(), 1);
        assert_eq!(differences[0].path(), "/data");
        assert_eq!(differences[0].expected_display(), "\"AQID\"");
        assert_eq!(differences[0].actual_display(), "\"AQIC\"");
    }

    #[test]
    fn taking_a_prefix_does_bounded_work() {
        let expected = parse(&format!(
            "[{}]",
            (0..512).map(|n| n.to_string()).collect::<Vec<_>>().join(",")
        ));
        let actual = parse(&format!(
            "[{}]",
            (1..513).map(|n| n.to_string()).collect::<Vec<_>>().join(",")
        ));
        let mut differences = diff_values(&expected, &actual, &DiffOptions::default());
        let first = differences.next().unwrap();
        assert_eq!(first.path(), "/0");
        // The remaining work stack holds one pending task per untouched
        // element, none of them expanded yet.
        let taken: Vec<_> = differences.take(20).collect();
        assert_eq!(taken.len(), 20);
        assert_eq!(taken[0].path(), "/1");
    }

    #[test]
    fn reiterating_reruns_the_comparison() {
        let expected = parse(r#"{"a":1,"b":2}"#);
        let actual = parse(r#"{"a":9,"b":8}"#);
        let options = DiffOptions::default();
        let first: Vec<_> = diff_values(&expected, &actual, &options).collect();
        let second: Vec<_> = diff_values(&expected, &actual, &options).collect();
        assert_eq!(first, second);

        let snapshot = diff_values(&expected, &actual, &options);
        let replay: Vec<_> = snapshot.clone().collect();
        assert_eq!(replay, first);
    }

    fn arbitrary_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9 ]{0,12}".prop_map(Value::from),
            proptest::collection::vec(any::<u8>(), 0..8).prop_map(Value::bytes),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                proptest::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(|members| {
                    // Deduplicate names: objects require name-unique members.
                    let mut seen = std::collections::HashSet::new();
                    Value::Object(
                        members
                            .into_iter()
                            .filter(|(name, _)| seen.insert(name.clone()))
                            .collect(),
                    )
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn comparison_is_reflexive(value in arbitrary_value()) {
            let options = DiffOptions::default();
            prop_assert!(diff_values(&value, &value, &options).next().is_none());
        }

        #[test]
        fn comparison_is_reflexive_with_unordered_arrays(value in arbitrary_value()) {
            let options = DiffOptions {
                ignore_array_element_order: true,
                ..Default::default()
            };
            prop_assert!(diff_values(&value, &value, &options).next().is_none());
        }
    }
}
