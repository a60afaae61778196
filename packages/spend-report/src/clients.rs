//! Production implementations of the trait seams.

use async_trait::async_trait;

use openai_client::{ChatRequest, Message, OpenAIClient, OpenAIError};
use stripe_client::{Customer, ListParams, ListResponse, Payment, StripeClient, StripeError};

use crate::traits::{BillingApi, ChatModel};

/// Page size for billing list calls.
pub const PAGE_LIMIT: u32 = 100;

fn list_params(starting_after: Option<&str>) -> ListParams {
    let params = ListParams::new(PAGE_LIMIT);
    match starting_after {
        Some(id) => params.starting_after(id),
        None => params,
    }
}

#[async_trait]
impl BillingApi for StripeClient {
    async fn customers_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Customer>, StripeError> {
        self.list_customers(&list_params(starting_after)).await
    }

    async fn payments_page(
        &self,
        starting_after: Option<&str>,
    ) -> Result<ListResponse<Payment>, StripeError> {
        self.list_payment_intents(&list_params(starting_after)).await
    }
}

/// [`ChatModel`] backed by the OpenAI chat completions API.
pub struct OpenAIChat {
    client: OpenAIClient,
    model: String,
}

impl OpenAIChat {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl ChatModel for OpenAIChat {
    async fn complete(&self, prompt: &str) -> Result<String, OpenAIError> {
        let request = ChatRequest::new(&self.model).message(Message::user(prompt));
        let response = self.client.chat_completion(request).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_carry_cursor() {
        let first = list_params(None);
        assert_eq!(first.limit, PAGE_LIMIT);
        assert_eq!(first.starting_after, None);

        let next = list_params(Some("cus_42"));
        assert_eq!(next.starting_after.as_deref(), Some("cus_42"));
    }
}
