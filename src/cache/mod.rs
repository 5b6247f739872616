//! Cache Module
//!
//! Time-boxed fetch cache: serves the last successful upstream result while it
//! is fresh and refetches once it expires.

mod clock;
mod entry;
mod fetch_cache;
mod policy;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, EntryInfo};
pub use fetch_cache::FetchCache;
pub use policy::ExpiryPolicy;
pub use stats::CacheStats;

#[cfg(test)]
pub(crate) mod testing;
