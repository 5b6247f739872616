//! Upstream Module
//!
//! The source a fetch cache calls on a miss.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

/// Source of the records a `FetchCache` holds.
///
/// Implementations return the full ordered sequence on every call. They do not
/// need to enforce a timeout themselves; the cache bounds each call.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Record type returned by the source
    type Item: Send + Sync;

    async fn fetch(&self) -> Result<Vec<Self::Item>>;
}

#[async_trait]
impl<U: Upstream + ?Sized> Upstream for Arc<U> {
    type Item = U::Item;

    async fn fetch(&self) -> Result<Vec<Self::Item>> {
        (**self).fetch().await
    }
}
