//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport error (connection failed, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response arrived but not in the expected shape
    #[error("unexpected response shape: {0}")]
    Response(String),
}
