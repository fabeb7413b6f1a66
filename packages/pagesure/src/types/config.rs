//! Configuration types for resolution and extraction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default document store collection for page records.
pub const DEFAULT_COLLECTION: &str = "pages";

/// Path of the extraction endpoint, relative to the service base URL.
pub const SCRAPE_PATH: &str = "/api/scrape";

/// Configuration for the resolution orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Store collection that holds page records.
    ///
    /// Default: "pages".
    pub collection: String,

    /// Coalesce concurrent cache misses for the same identifier.
    ///
    /// When true, a per-identifier lock serializes misses and the store is
    /// re-checked after acquiring it, so one extraction call serves all
    /// concurrent callers. When false, concurrent misses each call the
    /// extraction service and the last store write wins.
    ///
    /// Default: false.
    pub coalesce_misses: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            coalesce_misses: false,
        }
    }
}

impl ResolverConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different store collection.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Enable or disable single-flight coalescing of misses.
    pub fn with_coalesce_misses(mut self, coalesce: bool) -> Self {
        self.coalesce_misses = coalesce;
        self
    }
}

/// Configuration for the HTTP extraction client.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Base address of the extraction service, e.g. `https://scraper.example.com`.
    pub base_url: String,

    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ExtractionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of the scrape endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SCRAPE_PATH)
    }
}
