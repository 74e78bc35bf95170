//! Storage backing a [`crate::DestinationIndex`].
//!
//! The index only needs `get` and `put_if_absent`, so the map behind it is
//! pluggable. [`BoundedStore`] is the default: a FIFO-bounded map behind a
//! single `RwLock`, read-mostly since deployed code is executed far more
//! often than new code shows up.

use std::collections::VecDeque;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use ethereum_types::H256;
use rustc_hash::FxHashMap;

use crate::bitmap::CodeBitmap;

/// Result of [`AnalysisStore::put_if_absent`].
#[derive(Debug, Clone)]
pub struct PutOutcome {
    /// The bitmap stored under the key once the call returns. Either the
    /// one passed in, or the one another writer published first.
    pub stored: Arc<CodeBitmap>,
    /// Whether the bitmap passed in is the one that got stored.
    pub inserted: bool,
    /// Key dropped to make room for the insertion, if any.
    pub evicted: Option<H256>,
}

/// Map from code hash to published analysis.
///
/// Implementations must never expose a bitmap other than the one a
/// writer handed to `put_if_absent`, and must keep the first value
/// stored for a key until that key is evicted.
pub trait AnalysisStore: Send + Sync {
    fn get(&self, hash: &H256) -> Option<Arc<CodeBitmap>>;

    /// Store `bitmap` under `hash` unless a value is already present.
    fn put_if_absent(&self, hash: H256, bitmap: Arc<CodeBitmap>) -> PutOutcome;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, hash: &H256) -> bool {
        self.get(hash).is_some()
    }

    /// Drop every entry.
    #[cfg(any(test, feature = "test-utils"))]
    fn clear(&self);
}

#[derive(Debug)]
struct BoundedStoreInner {
    entries: FxHashMap<H256, Arc<CodeBitmap>>,
    insertion_order: VecDeque<H256>,
    max_entries: usize,
}

/// Thread-safe store with FIFO eviction.
///
/// When the store holds `max_entries` bitmaps, inserting a new one evicts
/// the oldest by insertion time. `get()` does not update the order, so
/// this is FIFO, not LRU. `max_entries == 0` disables eviction.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct BoundedStore {
    inner: Arc<RwLock<BoundedStoreInner>>,
}

impl BoundedStore {
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedStoreInner {
                entries: FxHashMap::default(),
                insertion_order: VecDeque::new(),
                max_entries,
            })),
        }
    }

    /// Store that never evicts.
    pub fn unbounded() -> Self {
        Self::with_max_entries(0)
    }

    pub fn max_entries(&self) -> usize {
        #[expect(clippy::unwrap_used, reason = "RwLock poisoning is unrecoverable")]
        let inner = self.inner.read().unwrap();
        inner.max_entries
    }
}

impl AnalysisStore for BoundedStore {
    fn get(&self, hash: &H256) -> Option<Arc<CodeBitmap>> {
        #[expect(clippy::unwrap_used, reason = "RwLock poisoning is unrecoverable")]
        let inner = self.inner.read().unwrap();
        inner.entries.get(hash).cloned()
    }

    fn put_if_absent(&self, hash: H256, bitmap: Arc<CodeBitmap>) -> PutOutcome {
        #[expect(clippy::unwrap_used, reason = "RwLock poisoning is unrecoverable")]
        let mut inner = self.inner.write().unwrap();

        // Another writer got here first: keep its value.
        if let Entry::Occupied(existing) = inner.entries.entry(hash) {
            return PutOutcome {
                stored: existing.get().clone(),
                inserted: false,
                evicted: None,
            };
        }

        let mut evicted = None;
        if inner.max_entries > 0
            && inner.entries.len() >= inner.max_entries
            && let Some(oldest) = inner.insertion_order.pop_front()
        {
            inner.entries.remove(&oldest);
            evicted = Some(oldest);
        }

        inner.entries.insert(hash, bitmap.clone());
        inner.insertion_order.push_back(hash);
        PutOutcome {
            stored: bitmap,
            inserted: true,
            evicted,
        }
    }

    fn len(&self) -> usize {
        #[expect(clippy::unwrap_used, reason = "RwLock poisoning is unrecoverable")]
        let inner = self.inner.read().unwrap();
        inner.entries.len()
    }

    #[cfg(any(test, feature = "test-utils"))]
    fn clear(&self) {
        #[expect(clippy::unwrap_used, reason = "RwLock poisoning is unrecoverable")]
        let mut inner = self.inner.write().unwrap();
        inner.entries.clear();
        inner.insertion_order.clear();
    }
}

impl Default for BoundedStore {
    fn default() -> Self {
        Self::with_max_entries(crate::config::DEFAULT_MAX_CACHE_ENTRIES)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    fn bitmap_for(code: &[u8]) -> Arc<CodeBitmap> {
        Arc::new(analyze(code))
    }

    #[test]
    fn test_store_put_and_get() {
        let store = BoundedStore::default();
        let key = H256::zero();

        assert!(store.get(&key).is_none());
        assert!(store.is_empty());

        let outcome = store.put_if_absent(key, bitmap_for(&[0x60, 0x5b]));
        assert!(outcome.inserted);
        assert!(outcome.evicted.is_none());

        assert!(store.contains(&key));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_keeps_first_value() {
        let store = BoundedStore::default();
        let key = H256::from_low_u64_be(7);

        let first = bitmap_for(&[0x60, 0x00]);
        let second = bitmap_for(&[0x5b, 0x5b, 0x5b]);

        store.put_if_absent(key, first.clone());
        let outcome = store.put_if_absent(key, second);

        assert!(!outcome.inserted);
        assert!(Arc::ptr_eq(&outcome.stored, &first));
        assert!(Arc::ptr_eq(&store.get(&key).expect("entry should exist"), &first));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_eviction() {
        let store = BoundedStore::with_max_entries(3);

        let k1 = H256::from_low_u64_be(1);
        let k2 = H256::from_low_u64_be(2);
        let k3 = H256::from_low_u64_be(3);
        let k4 = H256::from_low_u64_be(4);

        // Insert 3 entries (at capacity)
        store.put_if_absent(k1, bitmap_for(&[0x00]));
        store.put_if_absent(k2, bitmap_for(&[0x01]));
        store.put_if_absent(k3, bitmap_for(&[0x02]));
        assert_eq!(store.len(), 3);

        // Insert 4th entry → oldest (k1) should be evicted
        let outcome = store.put_if_absent(k4, bitmap_for(&[0x03]));
        assert_eq!(outcome.evicted, Some(k1));
        assert_eq!(store.len(), 3);
        assert!(store.get(&k1).is_none(), "oldest entry should be evicted");
        assert!(store.get(&k2).is_some());
        assert!(store.get(&k3).is_some());
        assert!(store.get(&k4).is_some());
    }

    #[test]
    fn test_store_reads_do_not_refresh_order() {
        let store = BoundedStore::with_max_entries(2);
        let k1 = H256::from_low_u64_be(1);
        let k2 = H256::from_low_u64_be(2);
        let k3 = H256::from_low_u64_be(3);

        store.put_if_absent(k1, bitmap_for(&[0x00]));
        store.put_if_absent(k2, bitmap_for(&[0x00]));
        assert!(store.get(&k1).is_some());

        let outcome = store.put_if_absent(k3, bitmap_for(&[0x00]));
        assert_eq!(outcome.evicted, Some(k1));
    }

    #[test]
    fn test_store_existing_key_does_not_evict() {
        let store = BoundedStore::with_max_entries(2);
        let k1 = H256::from_low_u64_be(1);
        let k2 = H256::from_low_u64_be(2);

        store.put_if_absent(k1, bitmap_for(&[0x00]));
        store.put_if_absent(k2, bitmap_for(&[0x00]));

        let outcome = store.put_if_absent(k1, bitmap_for(&[0x60, 0x00]));
        assert!(outcome.evicted.is_none());
        assert_eq!(store.len(), 2);
        assert!(store.get(&k2).is_some());
    }

    #[test]
    fn test_unbounded_store_never_evicts() {
        let store = BoundedStore::unbounded();
        for i in 0..100 {
            let outcome = store.put_if_absent(H256::from_low_u64_be(i), bitmap_for(&[0x00]));
            assert!(outcome.evicted.is_none());
        }
        assert_eq!(store.len(), 100);
        assert_eq!(store.max_entries(), 0);
    }

    #[test]
    fn test_store_clear() {
        let store = BoundedStore::default();
        store.put_if_absent(H256::from_low_u64_be(1), bitmap_for(&[0x00]));
        store.put_if_absent(H256::from_low_u64_be(2), bitmap_for(&[0x00]));
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(store.get(&H256::from_low_u64_be(1)).is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = BoundedStore::default();
        let shared = store.clone();
        store.put_if_absent(H256::zero(), bitmap_for(&[0x5b]));
        assert!(shared.contains(&H256::zero()));
    }
}
