//! A single difference between two trees and its display rendering.

use std::fmt;
use std::sync::OnceLock;

use jdeq_value::{Value, ValueKind};

/// Characters kept before the difference index in a truncated display.
const BEFORE_DIFF_LEN: usize = 20;
/// Characters kept after the difference index in a truncated display.
const AFTER_DIFF_LEN: usize = 40;
/// Longest serialized text shown without truncation.
const MAX_DISPLAY_LEN: usize = BEFORE_DIFF_LEN + AFTER_DIFF_LEN + 1;

const ELLIPSIS: char = '…';

/// A difference at a path between two trees.
///
/// The path is an RFC-6901-style JSON pointer (`""` for the root, segments
/// joined by `/`), with the non-standard `*` and `length` pseudo-segments
/// used by unordered-array comparison. A missing side is stored as null.
///
/// Records are immutable; the display fields are derived on first use and
/// cached for the life of the record.
#[derive(Clone, Debug)]
pub struct DiffNode {
    path: String,
    expected: Value,
    actual: Value,
    display: OnceLock<NodeDisplay>,
}

#[derive(Clone, Debug)]
struct NodeDisplay {
    diff_index: Option<usize>,
    expected_display: String,
    expected_display_diff_index: Option<usize>,
    actual_display: String,
    actual_display_diff_index: Option<usize>,
    rendered: String,
}

impl DiffNode {
    /// Construct a difference record. A `None` side is recorded as null.
    pub fn new(path: impl Into<String>, expected: Option<Value>, actual: Option<Value>) -> Self {
        Self {
            path: path.into(),
            expected: expected.unwrap_or(Value::Null),
            actual: actual.unwrap_or(Value::Null),
            display: OnceLock::new(),
        }
    }

    /// The path to this difference.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The value from the expected document at the path.
    pub fn expected(&self) -> &Value {
        &self.expected
    }

    /// The value from the actual document at the path.
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// Character index of the first difference between the serialized
    /// values, or `None` when the serialized texts are identical.
    pub fn diff_index(&self) -> Option<usize> {
        self.display().diff_index
    }

    /// Display text for the expected value, possibly truncated.
    pub fn expected_display(&self) -> &str {
        &self.display().expected_display
    }

    /// Index of the first difference within [`expected_display`]
    /// (shifted when the display is truncated).
    ///
    /// [`expected_display`]: Self::expected_display
    pub fn expected_display_diff_index(&self) -> Option<usize> {
        self.display().expected_display_diff_index
    }

    /// Display text for the actual value, possibly truncated.
    pub fn actual_display(&self) -> &str {
        &self.display().actual_display
    }

    /// Index of the first difference within [`actual_display`]
    /// (shifted when the display is truncated).
    ///
    /// [`actual_display`]: Self::actual_display
    pub fn actual_display_diff_index(&self) -> Option<usize> {
        self.display().actual_display_diff_index
    }

    fn display(&self) -> &NodeDisplay {
        self.display
            .get_or_init(|| NodeDisplay::build(&self.path, &self.expected, &self.actual))
    }
}

impl PartialEq for DiffNode {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.expected == other.expected && self.actual == other.actual
    }
}

impl fmt::Display for DiffNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display().rendered)
    }
}

impl NodeDisplay {
    fn build(path: &str, expected: &Value, actual: &Value) -> Self {
        let expected_text = expected.to_string();
        let actual_text = actual.to_string();
        let diff_index = find_diff_index(&expected_text, &actual_text);
        let (expected_display, expected_display_diff_index) =
            display_window(&expected_text, diff_index);
        let (actual_display, actual_display_diff_index) = display_window(&actual_text, diff_index);

        // Pointer lines only make sense when both sides are the same
        // structural kind with character-aligned serialized forms; a number
        // against a string has no meaningful column to point at.
        let show_pointers = diff_index.is_some()
            && expected_display_diff_index.is_some()
            && actual_display_diff_index.is_some()
            && expected.kind() == actual.kind()
            && matches!(
                expected.kind(),
                ValueKind::Object | ValueKind::Array | ValueKind::String | ValueKind::Bytes
            );

        let mut rendered = String::new();
        if !path.is_empty() {
            rendered.push_str(path);
            rendered.push_str(":\n");
        }
        if show_pointers {
            if let (Some(column), Some(position)) = (expected_display_diff_index, diff_index) {
                rendered.push_str(&pointer_line(column, '↓', position));
                rendered.push('\n');
            }
        }
        rendered.push_str("    Expected: ");
        rendered.push_str(&expected_display);
        rendered.push_str("\n    Actual:   ");
        rendered.push_str(&actual_display);
        if show_pointers {
            if let (Some(column), Some(position)) = (actual_display_diff_index, diff_index) {
                rendered.push('\n');
                rendered.push_str(&pointer_line(column, '↑', position));
            }
        }

        Self {
            diff_index,
            expected_display,
            expected_display_diff_index,
            actual_display,
            actual_display_diff_index,
            rendered,
        }
    }
}

/// A pointer line under or over a display value: aligned to the "Expected: "
/// column plus the in-display difference index.
fn pointer_line(column: usize, arrow: char, position: usize) -> String {
    format!("              {}{arrow} (pos {position})", " ".repeat(column))
}

/// First index at which two texts differ, in characters.
///
/// When one text is a strict prefix of the other the index is the shorter
/// length; identical texts have no difference index.
fn find_diff_index(expected: &str, actual: &str) -> Option<usize> {
    let mut expected_chars = expected.chars();
    let mut actual_chars = actual.chars();
    let mut index = 0;
    loop {
        match (expected_chars.next(), actual_chars.next()) {
            (Some(e), Some(a)) if e == a => index += 1,
            (None, None) => return None,
            _ => return Some(index),
        }
    }
}

/// Compute the (possibly truncated) display window for one serialized value
/// and the difference index's position within it.
fn display_window(text: &str, diff_index: Option<usize>) -> (String, Option<usize>) {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= MAX_DISPLAY_LEN {
        return (text.to_string(), diff_index);
    }

    let Some(diff_index) = diff_index else {
        let mut display: String = chars[..MAX_DISPLAY_LEN].iter().collect();
        display.push(ELLIPSIS);
        return (display, None);
    };

    let start = diff_index.saturating_sub(BEFORE_DIFF_LEN);
    let end = (diff_index + AFTER_DIFF_LEN + 1).min(chars.len());
    let mut display = String::new();
    let mut window_index = diff_index;
    if start > 0 {
        display.push(ELLIPSIS);
        window_index = diff_index + 1 - start;
    }
    display.extend(&chars[start..end]);
    if end < chars.len() {
        display.push(ELLIPSIS);
    }
    (display, Some(window_index))
}
