//! Error types for the value model.

/// Errors that can occur while building a tree value.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The source text was not valid JSON.
    #[error("invalid JSON document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience alias for value results.
pub type ValueResult<T> = Result<T, ValueError>;
