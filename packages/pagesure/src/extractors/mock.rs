//! Mock extractor for testing.
//!
//! Provides a configurable mock implementation of the Extractor trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::extractor::Extractor;
use crate::types::page::PageRecord;

/// Canned answer for one URL.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Successful extraction
    Record(PageRecord),
    /// Non-success HTTP status
    Status(u16),
    /// A response body that is not a page record
    Malformed,
}

/// Mock extractor for testing.
///
/// Answers from canned responses and records every URL it is asked for.
/// URLs without a canned response get a 404.
///
/// # Example
///
/// ```rust
/// use pagesure::extractors::MockExtractor;
/// use pagesure::PageRecord;
///
/// let mock = MockExtractor::new()
///     .with_record("https://facebook.com/SomePage", PageRecord::new().with_field("name", "Some Page"));
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Default, Clone)]
pub struct MockExtractor {
    responses: Arc<RwLock<HashMap<String, MockResponse>>>,
    fallback: Arc<RwLock<Option<MockResponse>>>,
    delay: Option<Duration>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockExtractor {
    /// Create a new empty mock extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a record.
    pub fn with_record(self, url: impl Into<String>, record: PageRecord) -> Self {
        self.set_response(url, MockResponse::Record(record));
        self
    }

    /// Answer `url` with an HTTP status failure.
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.set_response(url, MockResponse::Status(status));
        self
    }

    /// Answer `url` with an unparsable body.
    pub fn with_malformed(self, url: impl Into<String>) -> Self {
        self.set_response(url, MockResponse::Malformed);
        self
    }

    /// Answer every URL without a canned response with `response`.
    pub fn with_fallback(self, response: MockResponse) -> Self {
        *self.fallback.write().unwrap_or_else(|e| e.into_inner()) = Some(response);
        self
    }

    /// Sleep before answering, to widen race windows in concurrency tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set or replace the response for a URL.
    pub fn set_response(&self, url: impl Into<String>, response: MockResponse) {
        self.responses
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.into(), response);
    }

    /// Get the number of times extract was called.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Get the URLs that were requested, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Clear all recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn response_for(&self, url: &str) -> Option<MockResponse> {
        let canned = self
            .responses
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(url)
            .cloned();
        canned.or_else(|| self.fallback.read().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, url: &str) -> ExtractResult<PageRecord> {
        self.calls
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.response_for(url) {
            Some(MockResponse::Record(record)) => Ok(record),
            Some(MockResponse::Status(status)) => Err(ExtractError::Status {
                status,
                body: String::new(),
            }),
            Some(MockResponse::Malformed) => Err(ExtractError::Malformed(
                "expected a JSON object".to_string(),
            )),
            None => Err(ExtractError::Status {
                status: 404,
                body: format!("no canned response for {}", url),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
