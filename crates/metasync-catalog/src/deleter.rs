//! Object-store cleanup used when a table is dropped with its data

use async_trait::async_trait;

use crate::error::CatalogResult;

/// Deletes every object under a key prefix
#[async_trait]
pub trait FileDeleter: Send + Sync {
    async fn delete(&self, bucket: &str, prefix: &str) -> CatalogResult<()>;
}
