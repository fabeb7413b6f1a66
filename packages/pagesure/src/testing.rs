//! Testing utilities including store doubles.
//!
//! These are useful for testing applications that use the resolver
//! without a real database. See also [`MockExtractor`](crate::extractors::MockExtractor).

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::{StoreError, StoreResult};
use crate::stores::MemoryStore;
use crate::traits::store::DocumentStore;
use crate::types::page::PageRecord;

/// Store wrapper that counts reads and writes.
///
/// Wraps a [`MemoryStore`] by default.
pub struct CountingStore<S = MemoryStore> {
    inner: S,
    gets: AtomicUsize,
    sets: AtomicUsize,
}

impl Default for CountingStore<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: DocumentStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
        }
    }

    /// Number of `get_document` calls.
    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of `set_document` calls.
    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: DocumentStore> DocumentStore for CountingStore<S> {
    async fn get_document(&self, collection: &str, key: &str) -> StoreResult<Option<PageRecord>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_document(collection, key).await
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &PageRecord,
    ) -> StoreResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set_document(collection, key, document).await
    }
}

/// Memory store whose reads and/or writes can be switched to fail.
#[derive(Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingStore {
    /// A store that fails every read.
    pub fn failing_reads() -> Self {
        let store = Self::default();
        store.set_fail_reads(true);
        store
    }

    /// A store that fails every write.
    pub fn failing_writes() -> Self {
        let store = Self::default();
        store.set_fail_writes(true);
        store
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// The backing memory store, for assertions.
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get_document(&self, collection: &str, key: &str) -> StoreResult<Option<PageRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated read failure".into()));
        }
        self.inner.get_document(collection, key).await
    }

    async fn set_document(
        &self,
        collection: &str,
        key: &str,
        document: &PageRecord,
    ) -> StoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated write failure".into()));
        }
        self.inner.set_document(collection, key, document).await
    }
}
