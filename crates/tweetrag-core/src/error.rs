//! Error types for tweetrag

use thiserror::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the indexing and query pipelines.
///
/// Provider adapters collapse their transport and decoding errors into
/// `EmbeddingFailed` or `GenerationFailed`, so callers never see client-library types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Stable short name for the error kind, for callers that map failures to responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidDimension { .. } => "invalid_dimension",
            Error::EmbeddingFailed(_) => "embedding_failed",
            Error::GenerationFailed(_) => "generation_failed",
            Error::MalformedInput(_) => "malformed_input",
            Error::Configuration(_) => "configuration",
        }
    }
}
