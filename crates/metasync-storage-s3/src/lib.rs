//! S3 storage support for metasync
//!
//! Provides [`S3FileDeleter`], the `FileDeleter` used by the catalog providers
//! to remove table data when a table is dropped with `delete_data`.

pub mod config;
pub mod deleter;
pub mod error;

pub use config::S3DeleterConfig;
pub use deleter::S3FileDeleter;
pub use error::{S3DeleteError, S3DeleteResult};
