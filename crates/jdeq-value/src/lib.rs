//! Tree value model for jdeq.
//!
//! A [`Value`] is a JSON-like document tree: null, boolean, number, string,
//! binary data, array, or object with ordered, name-unique properties. The
//! diff engine in `jdeq-diff` compares two of these trees; this crate only
//! provides the data model, parsing, and the compact text rendering used by
//! difference displays.
//!
//! # Key Types
//!
//! - [`Value`] -- the closed variant for a JSON-like tree
//! - [`ValueKind`] -- structural kind discriminant
//! - [`Number`] -- re-exported `serde_json` number (exact equality,
//!   integer/float distinction preserved for display)

pub mod error;
pub mod value;

pub use error::{ValueError, ValueResult};
pub use value::{Number, Value, ValueKind};
