//! Document store trait.
//!
//! A minimal key-value document interface: read and write a document by
//! `(collection, key)`. Writes overwrite unconditionally; there is no
//! optimistic-concurrency check and no delete.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::page::PageRecord;

/// Key-value document store holding page records.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Get a document by key. `Ok(None)` means absent.
    async fn get_document(&self, collection: &str, key: &str) -> StoreResult<Option<PageRecord>>;

    /// Store a document, replacing any existing value for the key.
    async fn set_document(&self, collection: &str, key: &str, document: &PageRecord)
        -> StoreResult<()>;

    /// Check whether a document exists.
    async fn contains_document(&self, collection: &str, key: &str) -> StoreResult<bool> {
        Ok(self.get_document(collection, key).await?.is_some())
    }
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn get_document(&self, collection: &str, key: &str) -> StoreResult<Option<PageRecord>> {
        (**self).get_document(collection, key).await
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &PageRecord,
    ) -> StoreResult<()> {
        (**self).set_document(collection, key, document).await
    }
}
