//! Testing utilities including mock implementations.
//!
//! These are useful for testing the pipeline without making real billing,
//! web, or model calls. Every mock records the calls it receives so tests
//! can assert on interaction counts and arguments.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use async_trait::async_trait;

use openai_client::OpenAIError;
use stripe_client::{Customer, ListResponse, Payment, StripeError};

use crate::traits::{BillingApi, ChatModel, PageFetcher};
use crate::web::FetchError;

/// Build a customer record with just the typed fields.
pub fn customer(id: &str, email: Option<&str>) -> Customer {
    Customer::new(id, email)
}

/// Build a payment record with just the typed fields.
pub fn payment(id: &str, customer: Option<&str>, amount: i64) -> Payment {
    Payment::new(id, customer, amount)
}

/// Build one page of a list response.
pub fn page<T>(data: Vec<T>, has_more: bool) -> ListResponse<T> {
    ListResponse { data, has_more }
}

/// Record of a call made to the mock billing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingCall {
    Customers { starting_after: Option<String> },
    Payments { starting_after: Option<String> },
}

/// A mock billing API that serves scripted pages in order.
///
/// With no scripted pages, a call returns one empty final page. With
/// `with_failure`, every call errors.
#[derive(Default)]
pub struct MockBillingApi {
    customer_pages: RwLock<VecDeque<ListResponse<Customer>>>,
    payment_pages: RwLock<VecDeque<ListResponse<Payment>>>,
    fail: bool,
    calls: RwLock<Vec<BillingCall>>,
}

impl MockBillingApi {
    /// Create a mock with no scripted pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the customer pages, served front to back.
    pub fn with_customer_pages(self, pages: Vec<ListResponse<Customer>>) -> Self {
        *self.customer_pages.write().unwrap() = pages.into();
        self
    }

    /// Script the payment pages, served front to back.
    pub fn with_payment_pages(self, pages: Vec<ListResponse<Payment>>) -> Self {
        *self.payment_pages.write().unwrap() = pages.into();
        self
    }

    /// Make every call fail with an API error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<BillingCall> {
        self.calls.read().unwrap().clone()
    }

    fn fail_err(&self) -> StripeError {
        StripeError::Api {
            status: 500,
            message: "mock billing failure".into(),
        }
    }
}

#[async_trait]
impl BillingApi for MockBillingApi {
    async fn customers_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Customer>, StripeError> {
        self.calls.write().unwrap().push(BillingCall::Customers {
            starting_after: starting_after.map(|s| s.to_string()),
        });
        if self.fail {
            return Err(self.fail_err());
        }
        Ok(self
            .customer_pages
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| page(Vec::new(), false)))
    }

    async fn payments_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Payment>, StripeError> {
        self.calls.write().unwrap().push(BillingCall::Payments {
            starting_after: starting_after.map(|s| s.to_string()),
        });
        if self.fail {
            return Err(self.fail_err());
        }
        Ok(self
            .payment_pages
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| page(Vec::new(), false)))
    }
}

/// A mock chat model serving scripted responses in order.
///
/// With no scripted responses (or after they run out), calls fail with an
/// API error, as does a mock configured with `with_failure`.
#[derive(Default)]
pub struct MockChatModel {
    responses: RwLock<VecDeque<String>>,
    fail: bool,
    prompts: RwLock<Vec<String>>,
}

impl MockChatModel {
    /// Create a mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completion to serve.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.write().unwrap().push_back(response.into());
        self
    }

    /// Make every call fail with an API error.
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// All prompts received so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, prompt: &str) -> Result<String, OpenAIError> {
        self.prompts.write().unwrap().push(prompt.to_string());
        if self.fail {
            return Err(OpenAIError::Api {
                status: 500,
                message: "mock model failure".into(),
            });
        }
        self.responses
            .write()
            .unwrap()
            .pop_front()
            .ok_or_else(|| OpenAIError::Api {
                status: 500,
                message: "mock model has no scripted response".into(),
            })
    }
}

/// A mock page fetcher serving pages from a URL map.
///
/// URLs without an entry fail with a 404 status error.
#[derive(Default)]
pub struct MockPageFetcher {
    pages: RwLock<HashMap<String, String>>,
    requests: RwLock<Vec<String>>,
}

impl MockPageFetcher {
    /// Create a mock with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    /// All URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.requests.write().unwrap().push(url.to_string());
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}
