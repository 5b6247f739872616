//! Cache Entry Module
//!
//! A fetched value together with its fetch and expiry timestamps.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::ExpiryPolicy;

// == Cache Entry ==
/// Result of one successful upstream fetch.
///
/// Entries are never mutated: a refresh or a sliding hit replaces the whole
/// entry, so value and expiry always belong together.
#[derive(Debug)]
pub struct CacheEntry<T> {
    value: Arc<Vec<T>>,
    fetched_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

// Manual impl: cloning shares the value and does not need `T: Clone`.
impl<T> Clone for CacheEntry<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            fetched_at: self.fetched_at,
            expires_at: self.expires_at,
        }
    }
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry for a fetch completed at `fetched_at`.
    pub fn new(value: Vec<T>, fetched_at: DateTime<Utc>, policy: &ExpiryPolicy) -> Self {
        Self {
            value: Arc::new(value),
            fetched_at,
            expires_at: policy.expires_at(fetched_at),
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry may still serve a hit.
    ///
    /// Boundary condition: the entry is stale from `expires_at` onwards.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    // == Touched ==
    /// Replacement entry after a hit at `now`, if the policy extends expiry.
    pub fn touched(&self, now: DateTime<Utc>, policy: &ExpiryPolicy) -> Option<Self> {
        policy.extended(self.fetched_at, now).map(|expires_at| Self {
            value: Arc::clone(&self.value),
            fetched_at: self.fetched_at,
            expires_at,
        })
    }

    pub fn value(&self) -> &[T] {
        &self.value
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Remaining freshness in seconds, 0 once expired.
    pub fn ttl_remaining(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }

    pub fn info(&self, now: DateTime<Utc>) -> EntryInfo {
        EntryInfo {
            fetched_at: self.fetched_at,
            expires_at: self.expires_at,
            items: self.value.len(),
            fresh: self.is_fresh(now),
            ttl_remaining: self.ttl_remaining(now),
        }
    }
}

// == Entry Info ==
/// Snapshot of an entry's metadata for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub items: usize,
    pub fresh: bool,
    pub ttl_remaining: u64,
}
