//! Per-identifier miss locks for single-flight resolution.
//!
//! Only used when [`ResolverConfig::coalesce_misses`] is enabled. Each
//! identifier with a miss in progress gets an async mutex; entries are
//! removed once the last holder or waiter is gone.
//!
//! [`ResolverConfig::coalesce_misses`]: crate::types::config::ResolverConfig::coalesce_misses

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::types::page::PageId;

#[derive(Default)]
pub(crate) struct MissLocks {
    entries: DashMap<PageId, Arc<Mutex<()>>>,
}

impl MissLocks {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Wait until no other task holds the lock for `page_id`, then take it.
    pub(crate) async fn acquire(&self, page_id: &PageId) -> MissGuard<'_> {
        let lock = self
            .entries
            .entry(page_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let guard = Arc::clone(&lock).lock_owned().await;

        MissGuard {
            locks: self,
            page_id: page_id.clone(),
            lock: Some(lock),
            guard: Some(guard),
        }
    }

    /// Number of identifiers with a lock entry.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Releases the identifier lock on drop and removes the map entry when
/// nobody else references it.
pub(crate) struct MissGuard<'a> {
    locks: &'a MissLocks,
    page_id: PageId,
    lock: Option<Arc<Mutex<()>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for MissGuard<'_> {
    fn drop(&mut self) {
        // Release our references first so only the map's copy can remain.
        self.guard.take();
        self.lock.take();
        self.locks
            .entries
            .remove_if(&self.page_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_removed_after_release() {
        let locks = MissLocks::new();
        let id = PageId::from_key("SomePage");

        {
            let _guard = locks.acquire(&id).await;
            assert_eq!(locks.len(), 1);
        }

        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_same_identifier_is_exclusive() {
        let locks = Arc::new(MissLocks::new());
        let id = PageId::from_key("SomePage");

        let guard = locks.acquire(&id).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            let id = id.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        waiter.await.unwrap();
        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_distinct_identifiers_do_not_block() {
        let locks = MissLocks::new();
        let _a = locks.acquire(&PageId::from_key("a")).await;
        let _b = locks.acquire(&PageId::from_key("b")).await;
        assert_eq!(locks.len(), 2);
    }
}
