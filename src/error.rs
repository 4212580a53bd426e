use thiserror::Error;

/// Errors produced while building, querying or reporting on a document tree
#[derive(Debug, Error)]
pub enum InductionError {
    /// The HTML input could not be turned into an element tree
    #[error("Failed to parse document: {0}")]
    ParseFailed(String),

    /// A CSS query string was rejected by the selector parser
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The tree violates the element model (dangling id, broken parent link)
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// Induction options are out of range
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// JSON encoding or decoding failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, InductionError>;
