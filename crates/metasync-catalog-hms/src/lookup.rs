//! Direct table property lookup against the metastore database
//!
//! Iceberg tables registered in Hive keep their current metadata file in the
//! `metadata_location` table parameter, which the storage descriptor does not
//! track. The metastore backing database (`TBLS` joined with `TABLE_PARAMS`)
//! is the authoritative source for it.

use async_trait::async_trait;

use crate::error::HmsResult;

#[async_trait]
pub trait TablePropertyLookup: Send + Sync {
    /// Read the value of `key` from the parameters of `table`
    async fn get_table_property(&self, table: &str, key: &str) -> HmsResult<String>;
}
