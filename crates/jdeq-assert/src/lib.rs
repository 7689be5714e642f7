//! Deep-equality assertions over JSON-like values.
//!
//! Thin consumer of the diff engine: runs a comparison, caps the lazy
//! difference sequence at a bounded prefix, and renders the failures into a
//! single multi-line message. Functions come in `Result` form (`equal`,
//! `not_equal`, ...) and panicking form (`assert_equal`, ...) for use in
//! tests.
//!
//! # Key Types
//!
//! - [`EqualError`] -- an equality assertion failed; holds the differences
//! - [`NotEqualError`] -- an inequality assertion failed
//! - [`AssertError`] -- either of the above, or a parse/serialization error

pub mod assert;
pub mod error;

pub use assert::{
    assert_equal, assert_equal_json, assert_equal_serializables, assert_not_equal, equal,
    equal_json, equal_serializables, not_equal, not_equal_json, not_equal_serializables,
};
pub use error::{AssertError, EqualError, NotEqualError, MAX_REPORTED_DIFFERENCES};
