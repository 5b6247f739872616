//! API Module
//!
//! HTTP handlers and routing for the product API.
//!
//! # Endpoints
//! - `GET /api/products` - Product list (`?refresh=true` bypasses the cache)
//! - `DELETE /api/cache` - Clear the product cache
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
