//! Customer spend categorization report.
//!
//! A one-shot batch pipeline: pull every customer and payment from the
//! billing provider (with flat-file JSON caching), rank customers by
//! lifetime spend, classify each top customer's company industry from its
//! website with a chat model, and aggregate spend per category.
//!
//! # Usage
//!
//! ```rust,ignore
//! use spend_report::{
//!     CompanyClassifier, FileCache, HttpPageFetcher, OpenAIChat,
//! };
//!
//! let stripe = stripe_client::StripeClient::from_env()?;
//! let openai = openai_client::OpenAIClient::from_env()?;
//!
//! let classifier = CompanyClassifier::new(
//!     HttpPageFetcher::new(),
//!     OpenAIChat::new(openai, "gpt-4o"),
//! );
//! let report = spend_report::run(stripe, FileCache::new("."), classifier, 10).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for the external collaborators (billing, model, web, cache)
//! - [`fetcher`] - Cached, paginated record retrieval
//! - [`classifier`] - Website-based industry classification
//! - [`analyzer`] - Spend ranking and category aggregation
//! - [`report`] - End-to-end orchestration
//! - [`testing`] - Mock implementations for tests

pub mod analyzer;
pub mod cache;
pub mod classifier;
pub mod clients;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod report;
pub mod testing;
pub mod traits;
pub mod web;

// Re-export core types at crate root
pub use analyzer::{
    analyze_top, bucket_by_category, rank_by_spend, CategorizedCustomer, CategoryBucket,
    CustomerSpend,
};
pub use cache::{CacheError, FileCache, MemoryCache};
pub use classifier::{Classification, CompanyClassifier, SkipReason, CONSUMER_DOMAINS};
pub use clients::{OpenAIChat, PAGE_LIMIT};
pub use config::Config;
pub use error::ReportError;
pub use fetcher::{RecordFetcher, CUSTOMERS_CACHE_KEY, PAYMENTS_CACHE_KEY};
pub use report::{run, SpendReport};
pub use traits::{BillingApi, ChatModel, PageFetcher, RecordCache};
pub use web::{visible_text, FetchError, HttpPageFetcher, PAGE_FETCH_TIMEOUT};
