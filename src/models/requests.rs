//! Request DTOs for the product API
//!
//! Defines the query parameters accepted by the endpoints.

use serde::Deserialize;

/// Query string of GET /api/products
///
/// # Fields
/// - `refresh`: bypass the server cache and reload the catalog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsQuery {
    /// Force a reload
    #[serde(default)]
    pub refresh: bool,
}
