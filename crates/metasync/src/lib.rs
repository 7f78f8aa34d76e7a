//! Table metadata synchronization between Hive Metastore and AWS Glue
//!
//! [`CatalogManager`] creates, drops and synchronizes tables across the
//! catalogs held by a [`CatalogPool`]. Every batch operation is best effort:
//! a failing table is recorded and the remaining tables are still processed.

pub mod config;
pub mod error;
pub mod manager;
pub mod pool;

pub use config::{AwsConfig, ConfigError, MetasyncConfig};
pub use error::{BatchError, ManagerError};
pub use manager::CatalogManager;
pub use pool::CatalogPool;

pub use metasync_catalog::{
    CatalogError, CatalogId, CatalogProvider, Column, ColumnType, CreateSpec, DropSpec, DropTable,
    SqlType, TableFormat, TableInfo,
};
