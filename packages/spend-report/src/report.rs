//! Report orchestration.
//!
//! Wires the pipeline end to end: fetch both record collections, rank and
//! classify the top customers, and bucket them by category. Data flows
//! strictly forward; nothing here feeds back into an earlier stage.

use indexmap::IndexMap;
use serde::Serialize;

use crate::analyzer::{analyze_top, bucket_by_category, CategorizedCustomer, CategoryBucket};
use crate::classifier::CompanyClassifier;
use crate::error::Result;
use crate::fetcher::RecordFetcher;
use crate::traits::{BillingApi, ChatModel, PageFetcher, RecordCache};

/// The finished report.
#[derive(Debug, Serialize)]
pub struct SpendReport {
    /// Top customers in spend order, classification included
    pub top_customers: Vec<CategorizedCustomer>,

    /// Per-category aggregates, keyed by category in first-seen order
    pub commonalities: IndexMap<String, CategoryBucket>,
}

/// Run the full pipeline and return the report.
pub async fn run<A, C, F, M>(
    api: A,
    cache: C,
    classifier: CompanyClassifier<F, M>,
    top_n: usize,
) -> Result<SpendReport>
where
    A: BillingApi,
    C: RecordCache,
    F: PageFetcher,
    M: ChatModel,
{
    let fetcher = RecordFetcher::new(api, cache);
    let customers = fetcher.fetch_customers().await?;
    let payments = fetcher.fetch_payments().await?;

    let top_customers = analyze_top(&classifier, &customers, &payments, top_n).await;
    let commonalities = bucket_by_category(&top_customers);

    Ok(SpendReport {
        top_customers,
        commonalities,
    })
}
