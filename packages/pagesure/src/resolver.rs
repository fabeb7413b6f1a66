//! The PageResolver - main entry point for page resolution.
//!
//! Coordinates the lookup-or-fetch pipeline:
//!
//! ```text
//! raw URL ──► resolve_page_id ──► store lookup ──hit──► cached record
//!                  │                    │
//!                  ▼                   miss
//!           ValidationError             ▼
//!                             extract(raw URL) ──► store write ──► fresh record
//! ```
//!
//! Failures are terminal for the attempt: no retries, and a failed
//! extraction never touches the store.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::identifier::resolve_page_id;
use crate::inflight::MissLocks;
use crate::traits::{extractor::Extractor, store::DocumentStore};
use crate::types::{
    config::ResolverConfig,
    page::{PageId, PageRecord, RecordSource, Resolution, ResolutionRequest},
};

/// Resolves page URLs to records, caching extractions in a document store.
///
/// # Example
///
/// ```rust,ignore
/// let resolver = PageResolver::new(MemoryStore::new(), HttpExtractor::new(config)?);
///
/// let resolution = resolver
///     .resolve(&ResolutionRequest::new("https://facebook.com/SomePage"))
///     .await?;
/// assert_eq!(resolution.page_id.as_str(), "SomePage");
/// ```
pub struct PageResolver<S: DocumentStore, E: Extractor> {
    store: S,
    extractor: E,
    config: ResolverConfig,
    miss_locks: MissLocks,
}

impl<S: DocumentStore, E: Extractor> PageResolver<S, E> {
    /// Create a new resolver with the default configuration.
    pub fn new(store: S, extractor: E) -> Self {
        Self::with_config(store, extractor, ResolverConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(store: S, extractor: E, config: ResolverConfig) -> Self {
        Self {
            store,
            extractor,
            config,
            miss_locks: MissLocks::new(),
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Resolve a user request end to end.
    ///
    /// Invalid URLs fail before any store or network access.
    pub async fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution> {
        let page_id = resolve_page_id(&request.url).map_err(|e| {
            debug!(error = %e, "Rejected page URL");
            e
        })?;

        self.lookup_or_fetch(&request.url, page_id).await
    }

    /// Convenience wrapper around [`resolve`](Self::resolve) for a bare URL.
    pub async fn resolve_url(&self, raw_url: &str) -> Result<Resolution> {
        self.resolve(&ResolutionRequest::new(raw_url)).await
    }

    /// Return the record cached under `page_id`, extracting and storing it on
    /// a miss.
    ///
    /// `raw_url` is what the extraction service receives; `page_id` is only
    /// the cache key.
    pub async fn lookup_or_fetch(&self, raw_url: &str, page_id: PageId) -> Result<Resolution> {
        let result = self.lookup_or_fetch_inner(raw_url, page_id.clone()).await;

        if let Err(e) = &result {
            warn!(page_id = %page_id, kind = %e.kind(), error = %e, "Page resolution failed");
        }

        result
    }

    /// Read the record stored under `page_id`, if any. Never extracts.
    pub async fn cached(&self, page_id: &PageId) -> Result<Option<PageRecord>> {
        debug!(page_id = %page_id, collection = %self.config.collection, "Store lookup");
        Ok(self
            .store
            .get_document(&self.config.collection, page_id.as_str())
            .await?)
    }

    /// Number of identifiers with a coalesced miss in progress.
    pub fn misses_in_flight(&self) -> usize {
        self.miss_locks.len()
    }

    async fn lookup_or_fetch_inner(&self, raw_url: &str, page_id: PageId) -> Result<Resolution> {
        if let Some(record) = self.cached(&page_id).await? {
            info!(page_id = %page_id, "Cache hit");
            return Ok(Resolution::new(page_id, record, RecordSource::Cache));
        }

        if !self.config.coalesce_misses {
            return self.fetch_and_store(raw_url, page_id).await;
        }

        let _guard = self.miss_locks.acquire(&page_id).await;

        // Another task may have stored the record while we waited.
        if let Some(record) = self.cached(&page_id).await? {
            info!(page_id = %page_id, "Cache hit after waiting on concurrent miss");
            return Ok(Resolution::new(page_id, record, RecordSource::Cache));
        }

        self.fetch_and_store(raw_url, page_id).await
    }

    async fn fetch_and_store(&self, raw_url: &str, page_id: PageId) -> Result<Resolution> {
        info!(
            page_id = %page_id,
            extractor = self.extractor.name(),
            "Cache miss, requesting extraction"
        );

        let record = self.extractor.extract(raw_url).await?;

        self.store
            .set_document(&self.config.collection, page_id.as_str(), &record)
            .await?;

        info!(page_id = %page_id, fields = record.len(), "Stored extracted page record");

        Ok(Resolution::new(page_id, record, RecordSource::Extraction))
    }
}
