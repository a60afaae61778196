//! Company industry classification.
//!
//! Given a customer email, derives the company domain, fetches the
//! company homepage, and asks the chat model for a one-or-two word
//! industry label. Best effort: nothing in here ever fails the run.

use thiserror::Error;
use tracing::{info, warn};

use openai_client::{truncate_to_char_boundary, OpenAIError};

use crate::traits::{ChatModel, PageFetcher};
use crate::web::{visible_text, FetchError};

/// Generic consumer mail providers. Matched as substrings of the domain,
/// not exact domains, so e.g. "gmail.com.br" is also excluded.
pub const CONSUMER_DOMAINS: [&str; 3] = ["gmail.com", "yahoo.com", "hotmail.com"];

/// Homepage text sent to the model is capped at this many characters.
const PAGE_TEXT_LIMIT: usize = 1000;

/// Outcome of classifying one customer email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Lowercase one-or-two word industry label
    Categorized(String),
    /// No label; the customer is left out of the report
    Skipped(SkipReason),
}

impl Classification {
    /// The category, if one was produced.
    pub fn category(self) -> Option<String> {
        match self {
            Classification::Categorized(category) => Some(category),
            Classification::Skipped(_) => None,
        }
    }
}

/// Why a customer was not classified.
///
/// Callers currently treat every reason the same way; the distinction is
/// kept in the type for observability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Email had no domain part
    NoDomain,
    /// Domain belongs to a generic consumer mail provider
    ConsumerDomain,
    /// Fetch, parse, or model call failed
    Failed(String),
}

#[derive(Debug, Error)]
enum ClassifyError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Model(#[from] OpenAIError),

    #[error("model returned an empty category")]
    EmptyResponse,
}

/// Classifies companies by their website content.
pub struct CompanyClassifier<F, M> {
    fetcher: F,
    model: M,
}

impl<F: PageFetcher, M: ChatModel> CompanyClassifier<F, M> {
    pub fn new(fetcher: F, model: M) -> Self {
        Self { fetcher, model }
    }

    /// Classify the company behind an email address.
    ///
    /// Never returns an error: every internal failure is logged and
    /// absorbed into [`Classification::Skipped`].
    pub async fn classify(&self, email: &str) -> Classification {
        let Some(domain) = domain_of(email) else {
            return Classification::Skipped(SkipReason::NoDomain);
        };

        if CONSUMER_DOMAINS.iter().any(|d| domain.contains(d)) {
            return Classification::Skipped(SkipReason::ConsumerDomain);
        }

        match self.classify_domain(&domain).await {
            Ok(category) => Classification::Categorized(category),
            Err(e) => {
                warn!(domain = %domain, error = %e, "classification failed");
                Classification::Skipped(SkipReason::Failed(e.to_string()))
            }
        }
    }

    async fn classify_domain(&self, domain: &str) -> Result<String, ClassifyError> {
        // Bare domain first, one www. fallback, no further retries.
        let html = match self.fetcher.fetch_text(&format!("https://{}", domain)).await {
            Ok(html) => html,
            Err(_) => {
                self.fetcher
                    .fetch_text(&format!("https://www.{}", domain))
                    .await?
            }
        };

        let text = visible_text(&html);
        let text = truncate_to_char_boundary(&text, PAGE_TEXT_LIMIT);

        let category = self.model.complete(&categorize_prompt(domain, text)).await?;
        let category = category.trim().to_lowercase();
        if category.is_empty() {
            return Err(ClassifyError::EmptyResponse);
        }

        info!(domain = %domain, category = %category, "company categorized");
        Ok(category)
    }
}

fn domain_of(email: &str) -> Option<String> {
    email
        .split_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .map(|domain| domain.to_string())
}

fn categorize_prompt(domain: &str, text: &str) -> String {
    format!(
        "Categorize the following company. \
         Exclusively output 1 or 2 words that represent the category of business. \
         For instance 'fintech' or 'crypto'. 'technology' is not specific enough. \
         company url {} company website text: {}.",
        domain, text
    )
}
