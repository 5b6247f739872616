//! Product Cache - a product list API and client with time-boxed caching
//!
//! Both tiers put the same fetch cache in front of their source: the server
//! in front of the built-in catalog, the client in front of the server.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use cache::FetchCache;
pub use catalog::{Category, Product};
pub use client::ProductClient;
pub use config::{ClientConfig, Config};
pub use error::FetchError;
pub use upstream::Upstream;
