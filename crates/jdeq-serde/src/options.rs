//! Options that control how values are serialized into comparable trees.

use std::fmt;
use std::sync::Arc;

use jdeq_diff::DiffOptions;

/// A custom filter over property names.
///
/// Returns `true` to keep a property. Only sees names that already survived
/// the built-in exclusions.
pub type NamePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// How null-valued object members are handled during conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullValueHandling {
    /// Drop members whose value is null.
    #[default]
    Ignore,
    /// Keep null members.
    Include,
}

/// How default-valued object members are handled during conversion.
///
/// After serialization the declared type of a member is gone, so "default"
/// means the scalar zero values: null, `false`, numeric zero, and the empty
/// string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefaultValueHandling {
    /// Drop members whose value is a scalar zero value.
    #[default]
    Ignore,
    /// Keep default-valued members.
    Include,
}

/// Precision that RFC 3339 timestamp strings are truncated to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimestampPrecision {
    Seconds,
    Milliseconds,
    Microseconds,
}

/// The conversion policy for [`to_tree`](crate::to_tree).
///
/// Read-only for the duration of one conversion.
#[derive(Clone, Default)]
pub struct SerializeOptions {
    /// Property names to exclude everywhere, with support for glob-style
    /// wildcards (`*`, `**`, and `?`).
    pub exclude_property_names: Vec<String>,
    /// A custom filter over property names, chained after
    /// [`exclude_property_names`](Self::exclude_property_names).
    pub property_name_filter: Option<NamePredicate>,
    /// Null member handling. Subsumed by `default_value_handling` when that
    /// is `Ignore`.
    pub null_value_handling: NullValueHandling,
    /// Default-valued member handling.
    pub default_value_handling: DefaultValueHandling,
    /// When set, string values that parse as RFC 3339 timestamps are
    /// truncated to this precision and re-rendered, so both sides compare
    /// at the same precision. Off by default: after serialization a
    /// timestamp is indistinguishable from any other string, so rewriting
    /// is opt-in.
    pub timestamp_precision: Option<TimestampPrecision>,
}

impl fmt::Debug for SerializeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializeOptions")
            .field("exclude_property_names", &self.exclude_property_names)
            .field(
                "property_name_filter",
                &self.property_name_filter.as_ref().map(|_| "<custom>"),
            )
            .field("null_value_handling", &self.null_value_handling)
            .field("default_value_handling", &self.default_value_handling)
            .field("timestamp_precision", &self.timestamp_precision)
            .finish()
    }
}

/// Options for comparing two serializable values: the conversion policy
/// plus the comparison options.
#[derive(Clone, Debug, Default)]
pub struct DeepEqualOptions {
    /// How each side is converted into a tree.
    pub serialize: SerializeOptions,
    /// How the two trees are compared.
    pub diff: DiffOptions,
}
