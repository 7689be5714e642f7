//! Textual normalization for the ignore-case, line-ending, and whitespace
//! options.
//!
//! When raw document text is available the transforms run over the whole
//! document before parsing. When only trees are available they run once over
//! both trees before the walk starts: string values are rewritten, and
//! property names are lowercased under `ignore_case`.

use jdeq_value::Value;

use crate::options::DiffOptions;

/// Normalize raw document text according to the options.
pub(crate) fn normalize_document(text: &str, options: &DiffOptions) -> String {
    normalize_text(text, options)
}

/// Normalize a single piece of text according to the options.
pub(crate) fn normalize_text(text: &str, options: &DiffOptions) -> String {
    let mut text = text.to_string();
    if options.ignore_line_ending_differences {
        text = canonicalize_line_endings(&text);
    }
    if options.ignore_white_space_differences {
        text = collapse_whitespace(&text);
    }
    if options.ignore_case {
        text = text.to_lowercase();
    }
    text
}

/// Rebuild a tree with all string values (and, under `ignore_case`, property
/// names) normalized.
pub(crate) fn normalize_tree(value: &Value, options: &DiffOptions) -> Value {
    match value {
        Value::String(s) => Value::String(normalize_text(s, options)),
        Value::Array(elements) => Value::Array(
            elements
                .iter()
                .map(|element| normalize_tree(element, options))
                .collect(),
        ),
        Value::Object(members) => {
            let mut normalized: Vec<(String, Value)> = Vec::with_capacity(members.len());
            for (name, member_value) in members {
                let name = if options.ignore_case {
                    name.to_lowercase()
                } else {
                    name.clone()
                };
                let member_value = normalize_tree(member_value, options);
                // Lowercasing can collide two names; the last occurrence
                // wins, as when re-parsing a lowercased document.
                match normalized.iter_mut().find(|(existing, _)| *existing == name) {
                    Some((_, slot)) => *slot = member_value,
                    None => normalized.push((name, member_value)),
                }
            }
            Value::Object(normalized)
        }
        other => other.clone(),
    }
}

/// Replace `\r\n` and bare `\r` with `\n`.
fn canonicalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Collapse every run of whitespace into a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                collapsed.push(' ');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }
    collapsed
}
