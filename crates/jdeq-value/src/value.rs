//! The JSON-like tree value and its accessors.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::ValueResult;

/// Numeric value, re-exported from `serde_json`.
///
/// Equality is exact and representation-sensitive: the integer `2` and the
/// float `2.0` are different numbers, and both display differently (`2` vs
/// `2.0`). Approximate comparison is an upstream normalization concern, not
/// a model concern.
pub type Number = serde_json::Number;

/// A JSON-like tree value.
///
/// Object properties are an ordered sequence of `(name, value)` pairs with
/// names unique within one object. The model is immutable once constructed
/// and exclusively owned by its container, so a cycle cannot be built.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The null value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A number (integer or float, exact).
    Number(Number),
    /// A text string.
    String(String),
    /// Binary data. Rendered as a base64 string in text form.
    Bytes(Vec<u8>),
    /// An ordered sequence of values.
    Array(Vec<Value>),
    /// An ordered sequence of named properties, names unique.
    Object(Vec<(String, Value)>),
}

/// The structural kind of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Bytes,
    Array,
    Object,
}

impl Value {
    /// Parse a tree value from JSON text.
    pub fn from_json_str(text: &str) -> ValueResult<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from_json(json))
    }

    /// Build a tree value from a `serde_json::Value`.
    ///
    /// Property order is preserved. JSON has no binary type, so this never
    /// produces [`Value::Bytes`]; use [`Value::bytes`] to build one directly.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(elements) => {
                Value::Array(elements.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(name, value)| (name, Self::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Convert to a `serde_json::Value`.
    ///
    /// [`Value::Bytes`] becomes a base64 string, matching how binary data is
    /// displayed in difference reports.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::String(BASE64.encode(b)),
            Value::Array(elements) => {
                serde_json::Value::Array(elements.iter().map(Value::to_json).collect())
            }
            Value::Object(members) => {
                let mut map = serde_json::Map::with_capacity(members.len());
                for (name, value) in members {
                    map.insert(name.clone(), value.to_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }

    /// Build a binary value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// The structural kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Look up an object property by name (exact match).
    ///
    /// Returns `None` for non-objects and for absent names. Case-insensitive
    /// matching is an engine concern, never a model concern.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members
                .iter()
                .find(|(member_name, _)| member_name == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Look up an array element by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(elements) => elements.get(index),
            _ => None,
        }
    }

    /// The members of an object, or `None` for non-objects.
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// The elements of an array, or `None` for non-arrays.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    /// The text of a string value, or `None` for non-strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean value, or `None` for non-booleans.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The number value, or `None` for non-numbers.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Renders the compact JSON text form (no insignificant whitespace).
///
/// This is the serialized form the difference formatter indexes into, so it
/// must match the ecosystem serializer's escaping exactly; rendering routes
/// through `serde_json` for that reason.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        // Non-finite floats have no JSON form; fold them to null like
        // serde_json does.
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
