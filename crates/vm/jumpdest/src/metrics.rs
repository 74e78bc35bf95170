//! Counters describing how an index is being used.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters updated by [`crate::DestinationIndex`].
#[derive(Debug)]
pub struct IndexMetrics {
    /// Lookups answered from the store.
    pub hits: AtomicU64,
    /// Lookups that had to scan the bytecode.
    pub misses: AtomicU64,
    /// Scans whose bitmap ended up stored.
    pub analyses_published: AtomicU64,
    /// Scans discarded because a concurrent scan of the same hash won.
    pub races_lost: AtomicU64,
    /// Entries dropped to respect the capacity bound.
    pub evictions: AtomicU64,
}

/// Plain copy of [`IndexMetrics`] at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub analyses_published: u64,
    pub races_lost: u64,
    pub evictions: u64,
}

impl IndexMetrics {
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            analyses_published: AtomicU64::new(0),
            races_lost: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub(crate) fn record(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Reset all counters to zero.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.analyses_published.store(0, Ordering::Relaxed);
        self.races_lost.store(0, Ordering::Relaxed);
        self.evictions.store(0, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            analyses_published: self.analyses_published.load(Ordering::Relaxed),
            races_lost: self.races_lost.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}

impl Default for IndexMetrics {
    fn default() -> Self {
        Self::new()
    }
}
