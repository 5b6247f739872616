//! API Handlers
//!
//! HTTP request handlers for each product API endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::FetchCache;
use crate::catalog::{Product, StaticCatalog};
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearResponse, HealthResponse, ProductsQuery, StatsResponse};

/// Server-side product cache
pub type ProductCache = FetchCache<StaticCatalog>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product cache in front of the catalog
    pub cache: Arc<ProductCache>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: ProductCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// The cache fronts the built-in catalog with the configured sliding
    /// window, ceiling and fetch timeout.
    pub fn from_config(config: &Config) -> Self {
        let cache = FetchCache::new(
            "server",
            StaticCatalog::new(),
            config.expiry_policy(),
            config.fetch_timeout(),
        );
        Self::new(cache)
    }
}

/// Handler for GET /api/products
///
/// Returns the product list, served from the cache unless `refresh=true`.
pub async fn products_handler(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.cache.get(query.refresh).await?;
    Ok(Json(products))
}

/// Handler for DELETE /api/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.invalidate().await;
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let entry = state.cache.peek().await;
    Json(StatsResponse::new(&stats, entry))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
