//! Homepage fetching and visible-text extraction.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::traits::PageFetcher;

/// Timeout applied to every homepage fetch, including the fallback.
pub const PAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(7);

/// Errors from fetching a web page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request failed in transit (DNS, connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
}

/// Fetches pages over plain HTTPS GET with a bounded timeout.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPageFetcher {
    /// Create a fetcher with the standard 7 second timeout.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(PAGE_FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "page fetch starting");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Extract the visible text of an HTML document.
///
/// Strips `<script>` and `<style>` elements, keeps only the `<body>`
/// content when one is present, drops the remaining tags, decodes common
/// entities, and collapses all whitespace runs to single spaces.
pub fn visible_text(html: &str) -> String {
    let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
    let mut text = script_pattern.replace_all(html, "").to_string();
    text = style_pattern.replace_all(&text, "").to_string();

    let body_pattern = regex::Regex::new(r"(?s)<body[^>]*>(.*?)</body>").unwrap();
    if let Some(cap) = body_pattern.captures(&text) {
        text = cap[1].to_string();
    }

    // Remove remaining tags
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
    text = tag_pattern.replace_all(&text, " ").to_string();

    // Decode HTML entities
    text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    // Collapse whitespace
    let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
    text = whitespace_pattern.replace_all(&text, " ").to_string();

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_strips_script_and_style() {
        let html = r#"
            <html>
            <head><style>body { color: red; }</style></head>
            <body>
                <script>var tracking = true;</script>
                <h1>Acme Payments</h1>
                <p>Modern   billing
                infrastructure.</p>
            </body>
            </html>
        "#;

        let text = visible_text(html);
        assert_eq!(text, "Acme Payments Modern billing infrastructure.");
    }

    #[test]
    fn test_visible_text_decodes_entities() {
        let html = "<body><p>Fish &amp; Chips &#39;n more</p></body>";
        assert_eq!(visible_text(html), "Fish & Chips 'n more");
    }

    #[test]
    fn test_visible_text_without_body_tag() {
        let html = "<div>Fragment only</div>";
        assert_eq!(visible_text(html), "Fragment only");
    }

    #[test]
    fn test_visible_text_multiline_script() {
        let html = "<body><script>\nlet a = 1;\nlet b = 2;\n</script>Kept</body>";
        assert_eq!(visible_text(html), "Kept");
    }
}
