//! Conversion of serializable values into comparable trees.

use jdeq_diff::{diff_values, Differences, ExclusionFilter};
use jdeq_value::Value;
use serde::Serialize;

use crate::error::SerializeResult;
use crate::options::{
    DeepEqualOptions, DefaultValueHandling, NullValueHandling, SerializeOptions,
    TimestampPrecision,
};

/// Convert a serializable value into a tree under the given policy.
///
/// Serialization failures propagate: a cyclic object graph, or a map with
/// non-string keys, is an error here rather than an infinite or malformed
/// tree downstream.
pub fn to_tree<T: Serialize + ?Sized>(
    value: &T,
    options: &SerializeOptions,
) -> SerializeResult<Value> {
    let json = serde_json::to_value(value)?;
    let tree = Value::from_json(json);
    let name_filter = NameFilter::from_options(options);
    Ok(apply_policy(tree, options, name_filter.as_ref()))
}

/// Find the differences between two serializable values.
///
/// Both sides are converted with the same policy, then handed to the diff
/// engine. Returns the lazy difference sequence.
pub fn diff_serializables<E, A>(
    expected: &E,
    actual: &A,
    options: &DeepEqualOptions,
) -> SerializeResult<Differences>
where
    E: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    let expected_tree = to_tree(expected, &options.serialize)?;
    let actual_tree = to_tree(actual, &options.serialize)?;
    Ok(diff_values(&expected_tree, &actual_tree, &options.diff))
}

/// The property-name filter for one conversion: built-in exclusions chained
/// before an optional custom predicate.
struct NameFilter {
    exclusions: ExclusionFilter,
    custom: Option<crate::options::NamePredicate>,
}

impl NameFilter {
    fn from_options(options: &SerializeOptions) -> Option<Self> {
        let exclusions = ExclusionFilter::new(&options.exclude_property_names);
        let custom = options.property_name_filter.clone();
        if exclusions.is_empty() && custom.is_none() {
            return None;
        }
        Some(Self { exclusions, custom })
    }

    fn keep(&self, name: &str) -> bool {
        if !self.exclusions.keep(name) {
            return false;
        }
        match &self.custom {
            Some(predicate) => predicate(name),
            None => true,
        }
    }
}

/// Apply the member-dropping and timestamp policies to a converted tree.
fn apply_policy(value: Value, options: &SerializeOptions, names: Option<&NameFilter>) -> Value {
    match value {
        Value::String(text) => match options.timestamp_precision {
            Some(precision) => Value::String(truncate_timestamp(&text, precision)),
            None => Value::String(text),
        },
        Value::Array(elements) => Value::Array(
            elements
                .into_iter()
                .map(|element| apply_policy(element, options, names))
                .collect(),
        ),
        Value::Object(members) => Value::Object(
            members
                .into_iter()
                .filter(|(name, _)| names.map_or(true, |filter| filter.keep(name)))
                .map(|(name, member)| (name, apply_policy(member, options, names)))
                .filter(|(_, member)| !drops_member(member, options))
                .collect(),
        ),
        other => other,
    }
}

/// Returns `true` when the member value should be dropped under the
/// null/default handling policy.
fn drops_member(value: &Value, options: &SerializeOptions) -> bool {
    if options.null_value_handling == NullValueHandling::Ignore && value.is_null() {
        return true;
    }
    if options.default_value_handling == DefaultValueHandling::Ignore {
        return match value {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => {
                n.as_i64() == Some(0) || n.as_u64() == Some(0) || n.as_f64() == Some(0.0)
            }
            Value::String(s) => s.is_empty(),
            _ => false,
        };
    }
    false
}

/// Truncate an RFC 3339 timestamp string to the requested precision.
///
/// Non-timestamp strings pass through unchanged.
fn truncate_timestamp(text: &str, precision: TimestampPrecision) -> String {
    let Ok(parsed) = chrono::DateTime::parse_from_rfc3339(text) else {
        return text.to_string();
    };
    let format = match precision {
        TimestampPrecision::Seconds => "%Y-%m-%dT%H:%M:%S%:z",
        TimestampPrecision::Milliseconds => "%Y-%m-%dT%H:%M:%S%.3f%:z",
        TimestampPrecision::Microseconds => "%Y-%m-%dT%H:%M:%S%.6f%:z",
    };
    parsed.format(format).to_string()
}
