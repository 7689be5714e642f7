//! Error types for the serialization layer.

/// Errors that can occur while converting a value into a tree.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// The value could not be serialized, for example a cyclic structure or
    /// a map with non-string keys.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias for serialization results.
pub type SerializeResult<T> = Result<T, SerializeError>;
