//! The catalog interface implemented by every backend

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::model::TableInfo;

/// Uniform access to a table catalog
///
/// Implementations translate these calls into requests against their remote
/// catalog. `drop_table` is idempotent: dropping a table that does not exist
/// succeeds without touching the remote catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Name of the catalog, for logging
    fn get_name(&self) -> &str;

    /// List the table names of a database
    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>>;

    /// Read the full definition of a table
    async fn get_table(&self, database: &str, name: &str) -> CatalogResult<TableInfo>;

    /// Register a table; tables without columns are rejected before any remote call
    async fn create_table(&self, database: &str, table: &TableInfo) -> CatalogResult<()>;

    /// Drop a table, removing its object-store data when `delete_data` is set
    async fn drop_table(&self, database: &str, name: &str, delete_data: bool) -> CatalogResult<()>;
}
