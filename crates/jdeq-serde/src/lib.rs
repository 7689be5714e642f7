//! Serialization layer for jdeq.
//!
//! Converts any `serde::Serialize` value into a [`jdeq_value::Value`] tree
//! under a configurable policy (null/default member handling, property-name
//! exclusion, timestamp precision), and composes that conversion with the
//! diff engine. The tree handed to the engine is always finite: a cyclic
//! object graph fails serialization instead of producing an infinite tree.
//!
//! # Key Types
//!
//! - [`SerializeOptions`] -- the conversion policy
//! - [`DeepEqualOptions`] -- conversion policy plus comparison options
//! - [`to_tree`] / [`diff_serializables`] -- the entry points

pub mod convert;
pub mod error;
pub mod options;

pub use convert::{diff_serializables, to_tree};
pub use error::{SerializeError, SerializeResult};
pub use options::{
    DeepEqualOptions, DefaultValueHandling, NamePredicate, NullValueHandling, SerializeOptions,
    TimestampPrecision,
};
