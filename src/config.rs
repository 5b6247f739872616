//! Configuration Module
//!
//! Handles loading server and client configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::ExpiryPolicy;

/// Default freshness window in seconds (both tiers)
pub const DEFAULT_CACHE_TTL: u64 = 300;
/// Default absolute ceiling in seconds for the server tier
pub const DEFAULT_CACHE_MAX_AGE: u64 = 1800;
/// Default upstream fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT: u64 = 10;
/// Default base URL the client fetches products from
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Sliding freshness window in seconds
    pub cache_ttl: u64,
    /// Absolute lifetime ceiling in seconds
    pub cache_max_age: u64,
    /// Upstream fetch timeout in seconds
    pub fetch_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Sliding freshness window in seconds (default: 300)
    /// - `CACHE_MAX_AGE` - Absolute ceiling in seconds (default: 1800)
    /// - `FETCH_TIMEOUT` - Upstream fetch timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            server_port: env_or("SERVER_PORT", 3000),
            cache_ttl: env_or("CACHE_TTL", DEFAULT_CACHE_TTL),
            cache_max_age: env_or("CACHE_MAX_AGE", DEFAULT_CACHE_MAX_AGE),
            fetch_timeout: env_or("FETCH_TIMEOUT", DEFAULT_FETCH_TIMEOUT),
        }
    }

    /// Expiry policy of the server-side product cache.
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::sliding(
            Duration::from_secs(self.cache_ttl),
            Duration::from_secs(self.cache_max_age),
        )
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Client configuration parameters.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the product API
    pub api_url: String,
    /// Freshness window in seconds
    pub cache_ttl: u64,
    /// Upstream fetch timeout in seconds
    pub fetch_timeout: u64,
}

impl ClientConfig {
    /// Creates a new ClientConfig from environment variables.
    ///
    /// # Environment Variables
    /// - `PRODUCTS_API_URL` - Base URL of the API (default: http://localhost:3000)
    /// - `CLIENT_CACHE_TTL` - Freshness window in seconds (default: 300)
    /// - `FETCH_TIMEOUT` - Fetch timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("PRODUCTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            cache_ttl: env_or("CLIENT_CACHE_TTL", DEFAULT_CACHE_TTL),
            fetch_timeout: env_or("FETCH_TIMEOUT", DEFAULT_FETCH_TIMEOUT),
        }
    }

    /// Expiry policy of the client-side product cache.
    pub fn expiry_policy(&self) -> ExpiryPolicy {
        ExpiryPolicy::fixed(Duration::from_secs(self.cache_ttl))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
