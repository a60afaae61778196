//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Runtime configuration for one report run.
#[derive(Debug, Clone)]
pub struct Config {
    pub stripe_secret_key: String,
    pub openai_api_key: String,
    pub openai_model: String,
    pub cache_dir: PathBuf,
    pub top_customers: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")
                .context("STRIPE_SECRET_KEY must be set")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            cache_dir: env::var("REPORT_CACHE_DIR")
                .unwrap_or_else(|_| ".".to_string())
                .into(),
            top_customers: env::var("REPORT_TOP_CUSTOMERS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("REPORT_TOP_CUSTOMERS must be a valid number")?,
        })
    }
}
