//! Exclusion filters over property names and difference paths.
//!
//! A filter is an ordered, conjunctive pipeline: literal exclusions first,
//! then glob exclusions, then an optional custom predicate. A candidate
//! rejected by any stage stays rejected, and the custom predicate only ever
//! sees candidates that survived the built-in exclusions.

use std::fmt;

use crate::glob::{is_glob_pattern, GlobMatcher};
use crate::options::{DiffOptions, PathPredicate};

/// A built-in exclusion list: case-insensitive literals plus compiled globs.
///
/// Used both for difference paths (the diff engine) and for property names
/// (the serialization layer).
#[derive(Clone, Debug, Default)]
pub struct ExclusionFilter {
    /// Non-glob patterns, stored lowercased.
    literals: Vec<String>,
    globs: Vec<GlobMatcher>,
}

impl ExclusionFilter {
    /// Build a filter from exclusion patterns.
    ///
    /// Patterns containing `*` or `?` are compiled as globs; the rest are
    /// case-insensitive literals. Empty patterns are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut literals = Vec::new();
        let mut globs = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if is_glob_pattern(pattern) {
                if let Some(matcher) = GlobMatcher::compile(pattern) {
                    globs.push(matcher);
                }
            } else if !pattern.is_empty() {
                literals.push(pattern.to_lowercase());
            }
        }
        Self { literals, globs }
    }

    /// Returns `true` if the filter has no patterns at all.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.globs.is_empty()
    }

    /// Returns `true` if the candidate survives every exclusion.
    pub fn keep(&self, candidate: &str) -> bool {
        let lowered = candidate.to_lowercase();
        if self.literals.iter().any(|literal| *literal == lowered) {
            return false;
        }
        !self.globs.iter().any(|glob| glob.is_match(candidate))
    }
}

/// The full path filter for one comparison: built-in exclusions chained
/// before an optional custom predicate.
#[derive(Clone)]
pub struct PathFilter {
    exclusions: ExclusionFilter,
    custom: Option<PathPredicate>,
}

impl PathFilter {
    /// Build the filter configured by `options`, or `None` when the options
    /// configure no filtering at all.
    pub fn from_options(options: &DiffOptions) -> Option<Self> {
        let exclusions = ExclusionFilter::new(&options.exclude_paths);
        let custom = options.path_filter.clone();
        if exclusions.is_empty() && custom.is_none() {
            return None;
        }
        Some(Self { exclusions, custom })
    }

    /// Returns `true` if a difference at `path` should be reported.
    pub fn keep(&self, path: &str) -> bool {
        if !self.exclusions.keep(path) {
            return false;
        }
        match &self.custom {
            Some(predicate) => predicate(path),
            None => true,
        }
    }
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("exclusions", &self.exclusions)
            .field("custom", &self.custom.as_ref().map(|_| "<custom>"))
            .finish()
    }
}
