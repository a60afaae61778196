//! Stripe API list types.
//!
//! Records keep every provider field they arrive with: the handful of
//! fields this client reads are typed, everything else is flattened into
//! an `extra` map and round-trips through serialization unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a Stripe list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Records in API-provided order
    pub data: Vec<T>,

    /// Whether more pages are available after this one
    pub has_more: bool,
}

/// A Stripe customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer identifier (e.g. "cus_...")
    pub id: String,

    /// Billing email, if the customer has one
    pub email: Option<String>,

    /// Remaining provider fields, passed through unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Customer {
    /// Create a customer with just the typed fields (mainly for tests).
    pub fn new(id: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            id: id.into(),
            email: email.map(|e| e.to_string()),
            extra: serde_json::Map::new(),
        }
    }
}

/// A Stripe payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment identifier (e.g. "pi_...")
    pub id: String,

    /// Identifier of the paying customer. May be absent, and may
    /// reference a customer this account no longer knows about.
    pub customer: Option<String>,

    /// Amount in the smallest currency unit (cents for USD)
    pub amount: i64,

    /// Remaining provider fields (status, metadata, ...), passed through
    /// unchanged
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Payment {
    /// Create a payment with just the typed fields (mainly for tests).
    pub fn new(id: impl Into<String>, customer: Option<&str>, amount: i64) -> Self {
        Self {
            id: id.into(),
            customer: customer.map(|c| c.to_string()),
            amount,
            extra: serde_json::Map::new(),
        }
    }
}

/// Query parameters for Stripe list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ListParams {
    /// Page size (Stripe caps this at 100)
    pub limit: u32,

    /// Cursor: id of the last record of the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
}

impl ListParams {
    /// Create params for the first page.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            starting_after: None,
        }
    }

    /// Set the pagination cursor.
    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }
}
