//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::store::DocumentStore;
use crate::types::page::PageRecord;

type DocumentKey = (String, String);

/// In-memory document store.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
pub struct MemoryStore {
    documents: RwLock<HashMap<DocumentKey, PageRecord>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("memory store lock poisoned".into())
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-populate a document (builder pattern).
    pub fn with_document(self, collection: &str, key: &str, document: PageRecord) -> Self {
        if let Ok(mut documents) = self.documents.write() {
            documents.insert((collection.to_string(), key.to_string()), document);
        }
        self
    }

    /// Clear all stored data.
    pub fn clear(&self) {
        if let Ok(mut documents) = self.documents.write() {
            documents.clear();
        }
    }

    /// Get the number of stored documents across all collections.
    pub fn document_count(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Get the number of documents in one collection.
    pub fn collection_count(&self, collection: &str) -> usize {
        self.documents
            .read()
            .map(|d| d.keys().filter(|(c, _)| c == collection).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, collection: &str, key: &str) -> StoreResult<Option<PageRecord>> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents
            .get(&(collection.to_string(), key.to_string()))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &PageRecord,
    ) -> StoreResult<()> {
        self.documents
            .write()
            .map_err(|_| poisoned())?
            .insert((collection.to_string(), key.to_string()), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> PageRecord {
        PageRecord::new().with_field("name", name)
    }

    #[tokio::test]
    async fn test_get_set() {
        let store = MemoryStore::new();

        assert!(store.get_document("pages", "SomePage").await.unwrap().is_none());

        store
            .set_document("pages", "SomePage", &record("Some Page"))
            .await
            .unwrap();
        assert_eq!(store.document_count(), 1);

        let retrieved = store.get_document("pages", "SomePage").await.unwrap();
        assert_eq!(retrieved, Some(record("Some Page")));
        assert!(store.contains_document("pages", "SomePage").await.unwrap());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set_document("pages", "p", &record("first")).await.unwrap();
        store.set_document("pages", "p", &record("second")).await.unwrap();

        assert_eq!(store.document_count(), 1);
        assert_eq!(
            store.get_document("pages", "p").await.unwrap(),
            Some(record("second"))
        );
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::new().with_document("pages", "p", record("page"));

        assert!(store.get_document("other", "p").await.unwrap().is_none());
        assert_eq!(store.collection_count("pages"), 1);
        assert_eq!(store.collection_count("other"), 0);

        store.clear();
        assert_eq!(store.document_count(), 0);
    }
}
