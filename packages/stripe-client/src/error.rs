//! Error types for the Stripe client.

use thiserror::Error;

/// Result type for Stripe client operations.
pub type Result<T> = std::result::Result<T, StripeError>;

/// Stripe client errors.
#[derive(Debug, Error)]
pub enum StripeError {
    /// Configuration error (missing secret key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport error (connection failed, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API error (non-2xx response from Stripe)
    #[error("Stripe API error ({status}): {message}")]
    Api { status: u16, message: String },
}
