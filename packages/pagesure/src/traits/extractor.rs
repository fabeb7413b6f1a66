//! Extractor trait for the remote extraction service.
//!
//! An extractor turns a full page URL into a [`PageRecord`]. It receives the
//! original raw URL, never the derived identifier, since the service needs
//! the complete URL to find the page.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::page::PageRecord;

/// Remote page extraction.
///
/// Implementations make exactly one attempt per call: no retries, no
/// backoff.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract the record for `url`.
    async fn extract(&self, url: &str) -> ExtractResult<PageRecord>;

    /// Get the extractor name (for logging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for Arc<T> {
    async fn extract(&self, url: &str) -> ExtractResult<PageRecord> {
        (**self).extract(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
