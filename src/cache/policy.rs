//! Expiry Policy Module
//!
//! Decides when a fetched entry stops being fresh.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Expiry Policy ==
/// How long a fetched entry may serve hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Entry expires `ttl` after the fetch that produced it.
    Fixed { ttl: Duration },
    /// Every hit pushes expiry to `now + ttl`, but never past
    /// `fetched_at + max_age`.
    Sliding { ttl: Duration, max_age: Duration },
}

impl ExpiryPolicy {
    pub fn fixed(ttl: Duration) -> Self {
        ExpiryPolicy::Fixed { ttl }
    }

    pub fn sliding(ttl: Duration, max_age: Duration) -> Self {
        ExpiryPolicy::Sliding { ttl, max_age }
    }

    // == Expiry On Fetch ==
    /// Expiry of an entry fetched at `fetched_at`.
    pub fn expires_at(&self, fetched_at: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            ExpiryPolicy::Fixed { ttl } => add(fetched_at, ttl),
            ExpiryPolicy::Sliding { ttl, max_age } => add(fetched_at, ttl.min(max_age)),
        }
    }

    // == Expiry On Hit ==
    /// New expiry after a hit at `now`, or `None` when hits do not extend it.
    pub fn extended(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match *self {
            ExpiryPolicy::Fixed { .. } => None,
            ExpiryPolicy::Sliding { ttl, max_age } => {
                Some(add(now, ttl).min(add(fetched_at, max_age)))
            }
        }
    }
}

/// Saturating `at + by`.
fn add(at: DateTime<Utc>, by: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(by)
        .ok()
        .and_then(|by| at.checked_add_signed(by))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
