//! Client Module
//!
//! Client tier: fetches the product list from the API over HTTP and keeps it
//! in a time-boxed cache.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::cache::{CacheStats, EntryInfo, FetchCache};
use crate::catalog::Product;
use crate::config::ClientConfig;
use crate::error::{FetchError, Result};
use crate::upstream::Upstream;

/// Path of the product endpoint relative to the API base URL
pub const PRODUCTS_PATH: &str = "/api/products";

// == HTTP Product Source ==
/// Upstream that GETs the product list from the API.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    http: Client,
    url: String,
}

impl HttpProductSource {
    /// Creates a source for `<base_url>/api/products`.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Unknown(e.to_string()))?;

        Ok(Self {
            http,
            url: format!("{}{}", base_url.trim_end_matches('/'), PRODUCTS_PATH),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Upstream for HttpProductSource {
    type Item = Product;

    async fn fetch(&self) -> Result<Vec<Product>> {
        debug!("GET {}", self.url);
        let response = self.http.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json::<Vec<Product>>().await?)
    }
}

// == Product Client ==
/// Cached access to the product list.
pub struct ProductClient {
    cache: FetchCache<HttpProductSource>,
}

impl ProductClient {
    /// Creates a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let source = HttpProductSource::new(&config.api_url, config.fetch_timeout())?;
        Ok(Self::with_source(source, config))
    }

    pub fn with_source(source: HttpProductSource, config: &ClientConfig) -> Self {
        Self {
            cache: FetchCache::new(
                "client",
                source,
                config.expiry_policy(),
                config.fetch_timeout(),
            ),
        }
    }

    /// Returns the product list, from cache while fresh.
    pub async fn fetch_products(&self, force_refresh: bool) -> Result<Vec<Product>> {
        self.cache.get(force_refresh).await
    }

    /// Forgets the cached product list.
    pub async fn clear_cache(&self) {
        self.cache.invalidate().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub async fn cache_info(&self) -> Option<EntryInfo> {
        self.cache.peek().await
    }
}
