//! Extractor implementations.
//!
//! # Available Extractors
//!
//! - `HttpExtractor` - The remote scrape endpoint over HTTP
//! - `MockExtractor` - For testing

mod http;
mod mock;

pub use http::HttpExtractor;
pub use mock::{MockExtractor, MockResponse};

// Re-export from traits for convenience
pub use crate::traits::extractor::Extractor;
