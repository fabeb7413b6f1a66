//! Page Resolution Library
//!
//! Resolves a social page URL to its extracted review data, going to the
//! remote extraction service only when the page is not already cached.
//!
//! # Pipeline
//!
//! 1. [`resolve_page_id`] derives a stable [`PageId`] from the raw URL, or
//!    rejects it before any I/O
//! 2. the [`DocumentStore`] is consulted under that identifier
//! 3. on a miss, the [`Extractor`] is called with the original URL and the
//!    result is written back under the same identifier
//!
//! # Usage
//!
//! ```rust,ignore
//! use pagesure::{ExtractionConfig, HttpExtractor, MemoryStore, PageResolver};
//!
//! let extractor = HttpExtractor::new(ExtractionConfig::new("https://scraper.example.com"))?;
//! let resolver = PageResolver::new(MemoryStore::new(), extractor);
//!
//! let resolution = resolver.resolve_url("https://facebook.com/SomePage").await?;
//! println!("{} ({:?})", resolution.page_id, resolution.source);
//! ```
//!
//! # Modules
//!
//! - [`identifier`] - URL to page identifier derivation
//! - [`resolver`] - Lookup-or-fetch orchestration
//! - [`traits`] - Store and extractor abstractions
//! - [`types`] - Page records, identifiers, configuration
//! - [`stores`] - Storage implementations (MemoryStore, SqliteStore)
//! - [`extractors`] - Extractor implementations (HttpExtractor, MockExtractor)
//! - [`testing`] - Store doubles for testing

pub mod error;
pub mod extractors;
pub mod identifier;
mod inflight;
pub mod resolver;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    ErrorKind, ExtractError, ResolveError, StoreError, ValidationError, GENERIC_USER_MESSAGE,
};
pub use identifier::resolve_page_id;
pub use resolver::PageResolver;
pub use traits::{extractor::Extractor, store::DocumentStore};
pub use types::{
    config::{ExtractionConfig, ResolverConfig, DEFAULT_COLLECTION},
    page::{PageId, PageRecord, RecordSource, Resolution, ResolutionRequest},
};

// Re-export stores
pub use stores::MemoryStore;

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;

// Re-export extractors
pub use extractors::{HttpExtractor, MockExtractor};
