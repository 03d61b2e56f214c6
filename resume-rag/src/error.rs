//! Error types for the `resume-rag` crate.

use thiserror::Error;

/// Errors that can occur while segmenting, storing or retrieving resume text.
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding backend failed to produce vectors.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error, or an embedding backend that cannot
    /// be used at all (missing credentials, unset environment).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// No segments are stored under the requested document id.
    #[error("No documents found for document id '{0}'")]
    DocumentNotFound(String),
}

impl RagError {
    /// Returns `true` for errors caused by an unusable configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, RagError::ConfigError(_))
    }
}

/// A convenience result type for resume retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
