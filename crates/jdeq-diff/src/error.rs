//! Error types for the diff crate.

/// Errors that can occur while preparing a comparison.
///
/// The comparison itself never fails for well-formed trees; a null root on
/// one side is an ordinary difference, not an error.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A JSON document could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] jdeq_value::ValueError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
