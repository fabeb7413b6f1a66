//! HTTP extractor for the remote scrape endpoint.
//!
//! Sends `POST {base_url}/api/scrape` with body `{"url": ...}` and parses the
//! response body as a [`PageRecord`]. Any non-2xx status is a failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::Extractor;
use crate::types::config::ExtractionConfig;
use crate::types::page::PageRecord;

/// Extractor backed by the scrape HTTP endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use pagesure::{ExtractionConfig, HttpExtractor};
///
/// let extractor = HttpExtractor::new(ExtractionConfig::new("https://scraper.example.com"))?;
/// let record = extractor.extract("https://facebook.com/SomePage").await?;
/// ```
pub struct HttpExtractor {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

impl HttpExtractor {
    /// Create a new HTTP extractor from config.
    pub fn new(config: ExtractionConfig) -> ExtractResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ExtractError::Transport(Box::new(e)))?;

        Ok(Self::with_client(client, config))
    }

    /// Use a preconfigured HTTP client. The config timeout is ignored.
    pub fn with_client(client: Client, config: ExtractionConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint(),
        }
    }

    /// Full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    async fn extract(&self, url: &str) -> ExtractResult<PageRecord> {
        debug!(endpoint = %self.endpoint, url = %url, "Requesting page extraction");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScrapeRequest { url })
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.endpoint, error = %e, "Extraction request failed");
                ExtractError::Transport(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExtractError::Transport(Box::new(e)))?;

        PageRecord::from_slice(&bytes).map_err(|e| ExtractError::Malformed(e.to_string()))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_create_extractor() {
        let extractor = HttpExtractor::new(
            ExtractionConfig::new("https://scraper.example.com/")
                .with_timeout(Duration::from_secs(10)),
        )
        .unwrap();
        assert_eq!(extractor.name(), "http");
        assert_eq!(extractor.endpoint(), "https://scraper.example.com/api/scrape");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ScrapeRequest {
            url: "https://facebook.com/SomePage",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"url": "https://facebook.com/SomePage"}));
    }
}
