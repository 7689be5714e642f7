//! Options that control how two tree values are compared.

use std::fmt;
use std::sync::Arc;

/// A custom filter over difference paths.
///
/// Returns `true` to keep a difference at the given path. The predicate only
/// ever sees paths that already survived the built-in exclusions.
pub type PathPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Options for one comparison.
///
/// A plain configuration value: read-only for the duration of one diff call,
/// with no lifecycle beyond it.
#[derive(Clone, Default)]
pub struct DiffOptions {
    /// Paths to exclude from the comparison, in JSON-pointer notation with
    /// support for glob-style wildcards (`*`, `**`, and `?`).
    pub exclude_paths: Vec<String>,
    /// A custom filter over difference paths, chained after
    /// [`exclude_paths`](Self::exclude_paths).
    pub path_filter: Option<PathPredicate>,
    /// When `true`, two arrays are equal if they contain the same elements
    /// in any order.
    pub ignore_array_element_order: bool,
    /// When `true`, an empty array is equal to a missing or null value.
    pub ignore_empty_arrays: bool,
    /// When `true`, an empty object is equal to a missing or null value.
    pub ignore_empty_objects: bool,
    /// When `true`, ignores case in all string values and property names.
    pub ignore_case: bool,
    /// When `true`, treats `\r\n`, `\r`, and `\n` as equivalent in string
    /// values.
    pub ignore_line_ending_differences: bool,
    /// When `true`, treats any non-empty run of whitespace as a single
    /// space in string values.
    pub ignore_white_space_differences: bool,
}

impl DiffOptions {
    /// Returns `true` if any of the textual normalization options are set.
    pub(crate) fn has_text_options(&self) -> bool {
        self.ignore_case
            || self.ignore_line_ending_differences
            || self.ignore_white_space_differences
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("exclude_paths", &self.exclude_paths)
            .field("path_filter", &self.path_filter.as_ref().map(|_| "<custom>"))
            .field("ignore_array_element_order", &self.ignore_array_element_order)
            .field("ignore_empty_arrays", &self.ignore_empty_arrays)
            .field("ignore_empty_objects", &self.ignore_empty_objects)
            .field("ignore_case", &self.ignore_case)
            .field(
                "ignore_line_ending_differences",
                &self.ignore_line_ending_differences,
            )
            .field(
                "ignore_white_space_differences",
                &self.ignore_white_space_differences,
            )
            .finish()
    }
}
