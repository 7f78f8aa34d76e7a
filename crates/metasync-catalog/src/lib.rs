//! Catalog abstraction shared by the metasync backends
//!
//! This crate holds everything that is backend-agnostic:
//!
//! - the canonical table model ([`TableInfo`], [`Column`], [`ColumnType`], [`TableFormat`])
//! - the translation rules between that model and the native encodings used by
//!   the Hive metastore and AWS Glue ([`translate`])
//! - the [`CatalogProvider`] trait every backend adapter implements
//! - the [`FileDeleter`] collaborator used to purge object-store data on drop
//!
//! Backend adapters live in `metasync-catalog-hms` and `metasync-catalog-glue`.

pub use deleter::FileDeleter;
pub use error::{CatalogError, CatalogResult};
pub use model::{
    CatalogId, Column, ColumnType, CreateSpec, DropSpec, DropTable, SqlType, TableFormat,
    TableInfo,
};
pub use provider::CatalogProvider;
pub use translate::Backend;

pub mod deleter;
pub mod error;
pub mod model;
pub mod provider;
pub mod translate;
