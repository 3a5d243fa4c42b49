//! Error types for veritas-core.

use thiserror::Error;

/// Result type alias using veritas-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur inside the trust pipeline.
///
/// None of these escape [`TrustPipeline::verify`](crate::TrustPipeline::verify):
/// each one is turned into a message or an unset field at the component
/// boundary where it happens.
#[derive(Error, Debug)]
pub enum Error {
    /// Knowledge base file missing or corrupt
    #[error("Knowledge base error ({path}): {message}")]
    KnowledgeBase { path: String, message: String },

    /// Network failure while fetching a cited page
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Cited page answered with a non-200 status
    #[error("Fetch for {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Reasoning service failure (bad output, unavailable)
    #[error("Reasoning service error: {0}")]
    Reasoning(String),

    /// LLM transport or API error
    #[error("LLM error: {0}")]
    LLM(String),

    /// Timeout during operation
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a knowledge base error.
    pub fn knowledge_base(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::KnowledgeBase {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a fetch error.
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a reasoning service error.
    pub fn reasoning(message: impl Into<String>) -> Self {
        Self::Reasoning(message.into())
    }

    /// Create a timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }

    /// Whether this error came from the network boundary.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::HttpStatus { .. } | Self::Timeout { .. } | Self::LLM(_)
        )
    }
}
