//! Structural diff engine for JSON-like tree values.
//!
//! Compares two [`jdeq_value::Value`] trees in lock-step and yields a lazy
//! sequence of difference records, one per diverging path. An empty sequence
//! means the trees are equivalent under the configured options.
//!
//! # Key Types
//!
//! - [`DiffOptions`] -- comparison toggles, path exclusions, custom filter
//! - [`Differences`] -- pull-based iterator over difference records
//! - [`DiffNode`] -- one difference, with its aligned/truncated display
//! - [`GlobMatcher`] -- compiled wildcard matcher for names and paths
//!
//! Entry points are [`diff_values`] for already-built trees and
//! [`diff_json`] for raw JSON text (which applies the textual normalization
//! options before parsing).

pub mod diff;
pub mod error;
pub mod filter;
pub mod glob;
pub mod node;
pub mod options;

mod normalize;

pub use diff::{diff_json, diff_optional_values, diff_values, Differences};
pub use error::{DiffError, DiffResult};
pub use filter::{ExclusionFilter, PathFilter};
pub use glob::{is_glob_pattern, GlobMatcher};
pub use node::DiffNode;
pub use options::{DiffOptions, PathPredicate};
