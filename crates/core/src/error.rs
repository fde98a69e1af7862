use std::fmt;

/// Which lifecycle call a payload was being built for.
///
/// The encoded document is the same for both; the operation only labels
/// failures so the caller can tell a failed create from a failed update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOperation {
    Create,
    Update,
}

impl fmt::Display for PayloadOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadOperation::Create => f.write_str("create"),
            PayloadOperation::Update => f.write_str("update"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Failed to encode {resource} {operation} payload: {source}")]
    Serialization {
        resource: &'static str,
        operation: PayloadOperation,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
