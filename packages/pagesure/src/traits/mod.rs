//! Core trait abstractions for page resolution.
//!
//! These traits define the two external collaborators the orchestrator
//! depends on: a key-value document store and an extraction service.

pub mod extractor;
pub mod store;
