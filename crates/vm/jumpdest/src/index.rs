//! Memoized jump destination analysis keyed by code hash.
//!
//! One [`DestinationIndex`] is meant to live per VM/chain instance and be
//! dropped with it. The index trusts the caller's hash: it never checks
//! that `code` is the preimage of `code_hash`, so the hash must be a
//! collision-resistant digest of exactly those bytes.

use std::sync::Arc;

use ethereum_types::H256;
use tracing::{debug, trace};

use crate::analysis::analyze;
use crate::bitmap::CodeBitmap;
use crate::config::JumpdestConfig;
use crate::metrics::IndexMetrics;
use crate::store::{AnalysisStore, BoundedStore};

/// Cache of [`CodeBitmap`]s in front of [`analyze`].
///
/// Concurrent misses on the same hash each run the scan outside of any
/// lock; the first to reach the store publishes and the others adopt its
/// bitmap. The scan is deterministic so every caller sees the same bits.
#[derive(Debug)]
pub struct DestinationIndex<S = BoundedStore> {
    store: S,
    metrics: IndexMetrics,
}

impl DestinationIndex<BoundedStore> {
    /// Index with the default capacity.
    pub fn new() -> Self {
        Self::with_config(&JumpdestConfig::default())
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self::with_store(BoundedStore::with_max_entries(max_entries))
    }

    pub fn with_config(config: &JumpdestConfig) -> Self {
        Self::with_max_entries(config.max_cache_entries)
    }
}

impl Default for DestinationIndex<BoundedStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalysisStore> DestinationIndex<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            metrics: IndexMetrics::new(),
        }
    }

    /// Return the analysis of `code`, scanning it only if `code_hash` has
    /// not been seen (or was evicted).
    pub fn get_or_compute(&self, code_hash: H256, code: &[u8]) -> Arc<CodeBitmap> {
        if let Some(bitmap) = self.store.get(&code_hash) {
            trace!(%code_hash, "jumpdest analysis cache hit");
            IndexMetrics::record(&self.metrics.hits);
            return bitmap;
        }

        trace!(%code_hash, "jumpdest analysis cache miss");
        IndexMetrics::record(&self.metrics.misses);

        let outcome = self.store.put_if_absent(code_hash, Arc::new(analyze(code)));
        if outcome.inserted {
            debug!(%code_hash, code_len = code.len(), "published jumpdest analysis");
            IndexMetrics::record(&self.metrics.analyses_published);
        } else {
            debug!(%code_hash, "jumpdest analysis already published by another caller");
            IndexMetrics::record(&self.metrics.races_lost);
        }
        if let Some(evicted) = outcome.evicted {
            debug!(%evicted, "evicted jumpdest analysis");
            IndexMetrics::record(&self.metrics.evictions);
        }

        outcome.stored
    }

    pub fn contains(&self, code_hash: &H256) -> bool {
        self.store.contains(code_hash)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn metrics(&self) -> &IndexMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop every cached analysis and zero the metrics.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn clear(&self) {
        self.store.clear();
        self.metrics.reset();
    }
}
