//! Fetch Cache Module
//!
//! Holds the result of the last successful upstream fetch and serves it while
//! it is fresh.

use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cache::{CacheEntry, CacheStats, Clock, EntryInfo, ExpiryPolicy, SystemClock};
use crate::error::{FetchError, Result};
use crate::upstream::Upstream;

/// Entry and counters, guarded together.
#[derive(Debug)]
struct CacheState<T> {
    entry: Option<CacheEntry<T>>,
    stats: CacheStats,
    /// Bumped on every store and invalidation. A fetch only stores its
    /// result if the generation it started under is still current.
    generation: u64,
}

// == Fetch Cache ==
/// Time-boxed cache in front of an [`Upstream`].
///
/// A read is a hit when an entry exists and the clock is strictly before its
/// expiry. Anything else goes upstream. A failed fetch leaves the previous
/// entry in place and returns the error; stale data is never served.
///
/// The state lock is not held while the upstream call runs, so concurrent
/// misses may each fetch. Only the first to complete stores its result; a
/// fetch that overlaps an invalidation or a newer store still answers its
/// own caller but leaves the cache alone.
pub struct FetchCache<U: Upstream, C: Clock = SystemClock> {
    /// Label used in log lines
    name: String,
    upstream: U,
    clock: C,
    policy: ExpiryPolicy,
    fetch_timeout: Duration,
    state: RwLock<CacheState<U::Item>>,
}

impl<U> FetchCache<U, SystemClock>
where
    U: Upstream,
    U::Item: Clone,
{
    // == Constructor ==
    /// Creates an empty cache using the wall clock.
    ///
    /// # Arguments
    /// * `name` - Label for log lines (e.g. "server", "client")
    /// * `upstream` - Source called on a miss
    /// * `policy` - When entries expire
    /// * `fetch_timeout` - Upper bound for one upstream call
    pub fn new(
        name: impl Into<String>,
        upstream: U,
        policy: ExpiryPolicy,
        fetch_timeout: Duration,
    ) -> Self {
        Self::with_clock(name, upstream, SystemClock, policy, fetch_timeout)
    }
}

impl<U, C> FetchCache<U, C>
where
    U: Upstream,
    U::Item: Clone,
    C: Clock,
{
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(
        name: impl Into<String>,
        upstream: U,
        clock: C,
        policy: ExpiryPolicy,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            upstream,
            clock,
            policy,
            fetch_timeout,
            state: RwLock::new(CacheState {
                entry: None,
                stats: CacheStats::new(),
                generation: 0,
            }),
        }
    }

    // == Get ==
    /// Returns the cached records if fresh, otherwise fetches them.
    ///
    /// With `force_refresh` the entry is ignored and upstream is always
    /// called.
    pub async fn get(&self, force_refresh: bool) -> Result<Vec<U::Item>> {
        let generation = if force_refresh {
            let mut state = self.state.write().await;
            state.stats.record_forced_refresh();
            info!("[{}] forced refresh, fetching from upstream", self.name);
            state.generation
        } else {
            match self.try_hit().await {
                Ok(value) => return Ok(value),
                Err(generation) => generation,
            }
        };

        self.fetch_and_store(generation).await
    }

    /// Serves a hit if the entry is fresh. On a miss, records it and returns
    /// the generation the following fetch starts under.
    async fn try_hit(&self) -> std::result::Result<Vec<U::Item>, u64> {
        let now = self.clock.now();
        let mut state = self.state.write().await;

        let hit = match state.entry.as_ref() {
            Some(entry) if entry.is_fresh(now) => {
                Some((entry.value().to_vec(), entry.touched(now, &self.policy)))
            }
            Some(entry) => {
                info!(
                    "[{}] cache miss: entry expired at {}",
                    self.name,
                    entry.expires_at()
                );
                None
            }
            None => {
                info!("[{}] cache miss: no entry", self.name);
                None
            }
        };

        match hit {
            Some((value, touched)) => {
                if let Some(touched) = touched {
                    state.entry = Some(touched);
                }
                state.stats.record_hit();
                info!("[{}] cache hit: {} items", self.name, value.len());
                Ok(value)
            }
            None => {
                state.stats.record_miss();
                Err(state.generation)
            }
        }
    }

    /// Calls upstream under the timeout and replaces the entry on success,
    /// unless the cache changed since `generation` was read.
    async fn fetch_and_store(&self, generation: u64) -> Result<Vec<U::Item>> {
        let outcome = tokio::time::timeout(self.fetch_timeout, self.upstream.fetch()).await;

        let value = match outcome {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => return Err(self.record_failure(err).await),
            Err(_) => return Err(self.record_failure(FetchError::Timeout).await),
        };

        let entry = CacheEntry::new(value, self.clock.now(), &self.policy);
        let value = entry.value().to_vec();

        let mut state = self.state.write().await;
        if state.generation != generation {
            info!(
                "[{}] fetched {} items, not stored: cache changed during fetch",
                self.name,
                value.len()
            );
            return Ok(value);
        }

        info!(
            "[{}] fetched {} items, fresh until {}",
            self.name,
            value.len(),
            entry.expires_at()
        );
        state.entry = Some(entry);
        state.generation += 1;
        Ok(value)
    }

    async fn record_failure(&self, err: FetchError) -> FetchError {
        warn!("[{}] upstream fetch failed: {}", self.name, err);
        self.state.write().await.stats.record_failure();
        err
    }

    // == Invalidate ==
    /// Drops the cached entry. The next read goes upstream.
    ///
    /// Returns whether an entry was held. Clearing an empty cache is a no-op.
    pub async fn invalidate(&self) -> bool {
        let mut state = self.state.write().await;
        let had_entry = state.entry.take().is_some();
        state.generation += 1;
        state.stats.record_invalidation();

        if had_entry {
            info!("[{}] cache cleared", self.name);
        } else {
            info!("[{}] cache clear requested, already empty", self.name);
        }
        had_entry
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.read().await;
        let mut stats = state.stats.clone();
        stats.has_entry = state.entry.is_some();
        stats
    }

    // == Peek ==
    /// Metadata of the current entry, without counting as a read.
    pub async fn peek(&self) -> Option<EntryInfo> {
        let now = self.clock.now();
        self.state
            .read()
            .await
            .entry
            .as_ref()
            .map(|entry| entry.info(now))
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
}
