//! Catalog Module
//!
//! Product records and the hardcoded catalog served by the API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::upstream::Upstream;

/// Product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// One product as exchanged over the API.
///
/// `category` is optional: it is left out of the JSON when absent and
/// accepted as missing or `null` when decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Product {
    pub fn new(id: u32, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            category: None,
        }
    }

    pub fn in_category(mut self, id: u32, name: impl Into<String>) -> Self {
        self.category = Some(Category {
            id,
            name: name.into(),
        });
        self
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// == Static Catalog ==
/// Upstream that always answers with the built-in product list.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Catalog with the built-in demo products.
    pub fn new() -> Self {
        Self::with_products(default_products())
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Upstream for StaticCatalog {
    type Item = Product;

    async fn fetch(&self) -> Result<Vec<Product>> {
        debug!("Loading {} products from catalog", self.products.len());
        Ok(self.products.clone())
    }
}

/// The demo product list.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", 999.99, 12).in_category(1, "Electronics"),
        Product::new(2, "Wireless Mouse", 24.99, 150).in_category(1, "Electronics"),
        Product::new(3, "Mechanical Keyboard", 89.50, 40).in_category(1, "Electronics"),
        Product::new(4, "Desk Lamp", 34.00, 0).in_category(2, "Home Office"),
        Product::new(5, "Ergonomic Chair", 249.00, 7).in_category(2, "Home Office"),
        Product::new(6, "Notebook", 3.49, 500),
        Product::new(7, "Coffee Mug", 9.99, 75),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_products_ids_unique() {
        let products = default_products();
        let mut ids: Vec<u32> = products.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_product_without_category_omits_field() {
        let value = serde_json::to_value(Product::new(6, "Notebook", 3.49, 500)).unwrap();
        assert!(value.get("category").is_none());
        assert_eq!(value["name"], "Notebook");
    }

    #[test]
    fn test_product_with_category_serializes() {
        let product = Product::new(1, "Laptop", 999.99, 12).in_category(1, "Electronics");
        let value = serde_json::to_value(product).unwrap();
        assert_eq!(value["category"], json!({"id": 1, "name": "Electronics"}));
    }

    #[test]
    fn test_decode_missing_and_null_category() {
        let missing: Product =
            serde_json::from_value(json!({"id": 1, "name": "A", "price": 1.0, "stock": 2}))
                .unwrap();
        let null: Product = serde_json::from_value(
            json!({"id": 1, "name": "A", "price": 1.0, "stock": 2, "category": null}),
        )
        .unwrap();

        assert!(missing.category.is_none());
        assert_eq!(missing, null);
    }

    #[test]
    fn test_in_stock() {
        assert!(!Product::new(4, "Desk Lamp", 34.0, 0).in_stock());
        assert!(Product::new(2, "Mouse", 24.99, 1).in_stock());
    }

    #[tokio::test]
    async fn test_static_catalog_fetch() {
        let catalog = StaticCatalog::new();
        let products = catalog.fetch().await.unwrap();
        assert_eq!(products, default_products());
    }
}
