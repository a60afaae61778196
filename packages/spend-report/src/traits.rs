//! Core trait abstractions.
//!
//! The external collaborators (billing API, chat model, website fetcher,
//! record cache) are injected through these seams rather than reached as
//! global state, so every pipeline stage can be tested with the mocks in
//! [`crate::testing`].

use async_trait::async_trait;

use openai_client::OpenAIError;
use stripe_client::{Customer, ListResponse, Payment, StripeError};

use crate::cache::CacheResult;
use crate::web::FetchError;

/// Paginated access to the billing provider's record collections.
///
/// Implementations fix the page size; callers only steer the cursor.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Fetch one page of customers, starting after the given record id.
    async fn customers_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Customer>, StripeError>;

    /// Fetch one page of payments, starting after the given record id.
    async fn payments_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Payment>, StripeError>;
}

// Blanket implementation so callers can hand the pipeline a borrowed API.
#[async_trait]
impl<T: BillingApi + ?Sized> BillingApi for &T {
    async fn customers_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Customer>, StripeError> {
        (**self).customers_page(starting_after).await
    }

    async fn payments_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Payment>, StripeError> {
        (**self).payments_page(starting_after).await
    }
}

/// Single-turn text generation.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send one user message and return the model's text completion.
    async fn complete(&self, prompt: &str) -> Result<String, OpenAIError>;
}

/// Bounded, best-effort retrieval of a web page's body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET the URL and return the response body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Small key-value cache for serialized record collections.
///
/// Presence of a key means the value is trusted verbatim; there is no
/// expiry and no content validation.
pub trait RecordCache: Send + Sync {
    /// Return the cached value for `key`, if one exists.
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> CacheResult<()>;
}

// Blanket implementation mirroring the one for `BillingApi`.
impl<T: RecordCache + ?Sized> RecordCache for &T {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> CacheResult<()> {
        (**self).put(key, value)
    }
}
