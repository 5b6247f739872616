//! Response DTOs for the product API
//!
//! Defines the structure of outgoing HTTP response bodies. The product list
//! itself is sent as a bare JSON array of `Product`.

use serde::Serialize;

use crate::cache::{CacheStats, EntryInfo};

/// Response body for DELETE /api/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Whether an entry was held before the clear
    pub cleared: bool,
}

impl ClearResponse {
    pub fn new(cleared: bool) -> Self {
        let message = if cleared {
            "Product cache cleared".to_string()
        } else {
            "Product cache was already empty".to_string()
        };
        Self { message, cleared }
    }
}

/// Response body for GET /api/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub forced_refreshes: u64,
    pub failures: u64,
    pub invalidations: u64,
    /// Hit rate (hits over all reads)
    pub hit_rate: f64,
    /// Current entry, if any
    pub entry: Option<EntryInfo>,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, entry: Option<EntryInfo>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            forced_refreshes: stats.forced_refreshes,
            failures: stats.failures,
            invalidations: stats.invalidations,
            hit_rate: stats.hit_rate(),
            entry,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
