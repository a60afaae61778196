//! Cached, paginated record retrieval.
//!
//! Each record kind is fetched at most once per run: a cache hit returns
//! the stored records verbatim without touching the billing API; a miss
//! walks the paginated list endpoint to the end and writes the full
//! sequence to the cache before returning. Failures propagate; a broken
//! billing call aborts the run.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use stripe_client::{Customer, Payment};

use crate::error::Result;
use crate::traits::{BillingApi, RecordCache};

/// Cache key for the customer collection.
pub const CUSTOMERS_CACHE_KEY: &str = "customers";

/// Cache key for the payment collection.
pub const PAYMENTS_CACHE_KEY: &str = "payments";

/// Retrieves full record collections from the billing API through a cache.
pub struct RecordFetcher<A, C> {
    api: A,
    cache: C,
}

impl<A: BillingApi, C: RecordCache> RecordFetcher<A, C> {
    pub fn new(api: A, cache: C) -> Self {
        Self { api, cache }
    }

    /// Fetch every customer, from cache or by walking all pages.
    pub async fn fetch_customers(&self) -> Result<Vec<Customer>> {
        if let Some(cached) = self.load_cached(CUSTOMERS_CACHE_KEY)? {
            return Ok(cached);
        }

        let mut customers: Vec<Customer> = Vec::new();
        let mut starting_after: Option<String> = None;
        loop {
            let page = self.api.customers_page(starting_after.as_deref()).await?;
            customers.extend(page.data);
            info!(
                count = customers.len(),
                has_more = page.has_more,
                "got customers"
            );
            if !page.has_more {
                break;
            }
            starting_after = customers.last().map(|c| c.id.clone());
        }

        self.store(CUSTOMERS_CACHE_KEY, &customers)?;
        Ok(customers)
    }

    /// Fetch every payment, from cache or by walking all pages.
    pub async fn fetch_payments(&self) -> Result<Vec<Payment>> {
        if let Some(cached) = self.load_cached(PAYMENTS_CACHE_KEY)? {
            return Ok(cached);
        }

        let mut payments: Vec<Payment> = Vec::new();
        let mut starting_after: Option<String> = None;
        loop {
            let page = self.api.payments_page(starting_after.as_deref()).await?;
            payments.extend(page.data);
            info!(
                count = payments.len(),
                has_more = page.has_more,
                "got payments"
            );
            if !page.has_more {
                break;
            }
            starting_after = payments.last().map(|p| p.id.clone());
        }

        self.store(PAYMENTS_CACHE_KEY, &payments)?;
        Ok(payments)
    }

    fn load_cached<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
        match self.cache.get(key)? {
            Some(raw) => {
                debug!(key, "cache hit, skipping live fetch");
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    fn store<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        self.cache
            .put(key, &serde_json::to_string_pretty(records)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::testing::{customer, page, payment, BillingCall, MockBillingApi};
    use crate::traits::RecordCache as _;

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let api = MockBillingApi::new().with_customer_pages(vec![
            page(vec![customer("cus_1", Some("a@a.com")), customer("cus_2", None)], true),
            page(vec![customer("cus_3", None)], false),
        ]);
        let fetcher = RecordFetcher::new(api, MemoryCache::new());

        let customers = fetcher.fetch_customers().await.unwrap();
        let ids: Vec<&str> = customers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["cus_1", "cus_2", "cus_3"]);
    }

    #[tokio::test]
    async fn test_cursor_is_last_id_of_previous_page() {
        let api = MockBillingApi::new().with_customer_pages(vec![
            page(vec![customer("cus_1", None), customer("cus_2", None)], true),
            page(vec![customer("cus_3", None)], true),
            page(vec![], false),
        ]);
        let fetcher = RecordFetcher::new(api, MemoryCache::new());

        fetcher.fetch_customers().await.unwrap();

        assert_eq!(
            fetcher.api.calls(),
            vec![
                BillingCall::Customers { starting_after: None },
                BillingCall::Customers { starting_after: Some("cus_2".into()) },
                BillingCall::Customers { starting_after: Some("cus_3".into()) },
            ]
        );
    }

    #[tokio::test]
    async fn test_cache_hit_makes_zero_api_calls() {
        let cache = MemoryCache::new();
        let records = vec![customer("cus_1", Some("a@a.com"))];
        cache
            .put(
                CUSTOMERS_CACHE_KEY,
                &serde_json::to_string_pretty(&records).unwrap(),
            )
            .unwrap();

        let api = MockBillingApi::new();
        let fetcher = RecordFetcher::new(api, cache);

        let customers = fetcher.fetch_customers().await.unwrap();
        assert_eq!(customers.len(), 1);
        assert_eq!(customers[0].id, "cus_1");
        assert!(fetcher.api.calls().is_empty(), "cache hit must not hit the API");
    }

    #[tokio::test]
    async fn test_writes_pretty_cache_after_fetch() {
        let api = MockBillingApi::new().with_payment_pages(vec![page(
            vec![payment("pi_1", Some("cus_1"), 500)],
            false,
        )]);
        let fetcher = RecordFetcher::new(api, MemoryCache::new());

        fetcher.fetch_payments().await.unwrap();

        let raw = fetcher.cache.get(PAYMENTS_CACHE_KEY).unwrap().unwrap();
        assert!(raw.contains('\n'), "cache payload should be pretty-printed");

        let parsed: Vec<Payment> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0].id, "pi_1");
        assert_eq!(parsed[0].amount, 500);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_opaque_fields() {
        let mut record = customer("cus_1", Some("a@acme.com"));
        record
            .extra
            .insert("currency".into(), serde_json::json!("usd"));
        record.extra.insert(
            "metadata".into(),
            serde_json::json!({"plan": "enterprise"}),
        );

        let api =
            MockBillingApi::new().with_customer_pages(vec![page(vec![record], false)]);
        let fetcher = RecordFetcher::new(api, MemoryCache::new());
        let fetched = fetcher.fetch_customers().await.unwrap();

        // A second fetcher over the same cache sees identical records.
        let reread = RecordFetcher::new(MockBillingApi::new(), fetcher.cache)
            .fetch_customers()
            .await
            .unwrap();
        assert_eq!(reread[0].id, fetched[0].id);
        assert_eq!(reread[0].email, fetched[0].email);
        assert_eq!(reread[0].extra, fetched[0].extra);
    }

    #[tokio::test]
    async fn test_api_failure_propagates() {
        let api = MockBillingApi::new().with_failure();
        let fetcher = RecordFetcher::new(api, MemoryCache::new());

        let result = fetcher.fetch_customers().await;
        assert!(result.is_err(), "billing failures are fatal");
    }
}
