//! Pure Stripe REST API client.
//!
//! A minimal client for the Stripe API list endpoints. Supports
//! cursor-paginated listing of customers and payment intents.
//!
//! # Example
//!
//! ```rust,ignore
//! use stripe_client::{ListParams, StripeClient};
//!
//! let client = StripeClient::new("sk_test_...".into());
//!
//! let page = client.list_customers(&ListParams::new(100)).await?;
//! for customer in &page.data {
//!     println!("{}", customer.email.as_deref().unwrap_or("(no email)"));
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, StripeError};
pub use types::{Customer, ListParams, ListResponse, Payment};

use serde::de::DeserializeOwned;

const BASE_URL: &str = "https://api.stripe.com/v1";

pub struct StripeClient {
    client: reqwest::Client,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
        }
    }

    /// Create from environment variable `STRIPE_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_KEY")
            .map_err(|_| StripeError::Config("STRIPE_SECRET_KEY not set".into()))?;
        Ok(Self::new(secret_key))
    }

    /// List one page of customers.
    pub async fn list_customers(&self, params: &ListParams) -> Result<ListResponse<Customer>> {
        self.list("customers", params).await
    }

    /// List one page of payment intents.
    pub async fn list_payment_intents(&self, params: &ListParams) -> Result<ListResponse<Payment>> {
        self.list("payment_intents", params).await
    }

    /// Call a Stripe list endpoint. Stripe authenticates with the secret
    /// key as the basic-auth username and an empty password.
    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<ListResponse<T>> {
        let url = format!("{}/{}", BASE_URL, path);
        tracing::debug!(path, cursor = ?params.starting_after, "Stripe list request");

        let resp = self
            .client
            .get(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .query(params)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let page: ListResponse<T> = resp.json().await?;
        tracing::debug!(path, count = page.data.len(), has_more = page.has_more, "Stripe page received");
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_missing_key() {
        std::env::remove_var("STRIPE_SECRET_KEY");
        assert!(matches!(
            StripeClient::from_env(),
            Err(StripeError::Config(_))
        ));
    }
}
