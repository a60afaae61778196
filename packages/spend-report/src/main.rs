//! Customer spend categorization report.
//!
//! One-shot batch run: no arguments, no flags. Prints the ranked top
//! customer analysis and the per-category spend buckets, and leaves the
//! two record cache files behind for the next run.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openai_client::OpenAIClient;
use spend_report::{
    report, CompanyClassifier, Config, FileCache, HttpPageFetcher, OpenAIChat,
};
use stripe_client::StripeClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_env()?;

    let stripe = StripeClient::new(config.stripe_secret_key.clone());
    let cache = FileCache::new(&config.cache_dir);
    let openai = OpenAIClient::new(config.openai_api_key.clone());
    let classifier = CompanyClassifier::new(
        HttpPageFetcher::new(),
        OpenAIChat::new(openai, config.openai_model.clone()),
    );

    let report = report::run(stripe, cache, classifier, config.top_customers).await?;

    println!("Top Customers Analysis:");
    println!("{}", serde_json::to_string_pretty(&report.top_customers)?);
    println!();
    println!("Commonalities Among Top Customers:");
    println!("{}", serde_json::to_string_pretty(&report.commonalities)?);

    Ok(())
}
