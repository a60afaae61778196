//! Typed errors for the report pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Only failures that
//! abort the run live here; classifier-internal failures are absorbed into
//! `Classification::Skipped` and never surface as a `ReportError`.

use thiserror::Error;

use crate::cache::CacheError;

/// Errors that abort a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Billing API call failed
    #[error("billing API error: {0}")]
    Billing(#[from] stripe_client::StripeError),

    /// Cache read or write failed
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// Cached or fetched records failed to (de)serialize
    #[error("record serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
