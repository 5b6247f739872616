//! Cache Statistics Module
//!
//! Counts hits, misses, forced refreshes, upstream failures and invalidations.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads served from the cached entry
    pub hits: u64,
    /// Reads that found no fresh entry
    pub misses: u64,
    /// Reads that bypassed the entry on request
    pub forced_refreshes: u64,
    /// Upstream fetches that failed or timed out
    pub failures: u64,
    /// Explicit clears
    pub invalidations: u64,
    /// Whether an entry is currently held
    pub has_entry: bool,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits over all reads, or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.forced_refreshes;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Number of reads that went upstream.
    pub fn upstream_calls(&self) -> u64 {
        self.misses + self.forced_refreshes
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_forced_refresh(&mut self) {
        self.forced_refreshes += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_invalidation(&mut self) {
        self.invalidations += 1;
    }
}
