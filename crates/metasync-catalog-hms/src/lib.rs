//! Hive Metastore catalog provider for metasync
//!
//! This crate provides a `CatalogProvider` implementation backed by Apache
//! Hive Metastore (HMS). The Thrift transport is plugged in through
//! [`HiveConnector`]; this crate owns everything above it.
//!
//! # Features
//!
//! - **Connection pooling**: Connection reuse with bb8
//! - **Retries**: Per-request timeouts with exponential backoff on transport errors
//! - **Iceberg support**: Live metadata pointers resolved through a [`TablePropertyLookup`]
//! - **Data cleanup**: Optional removal of table files through a `FileDeleter`

// Re-export commonly used types
pub use client::{HiveClient, HiveConnector, HmsClient};
pub use config::{HmsConfig, HmsConnectionPoolConfig, HmsThriftConfig};
pub use error::{HmsError, HmsResult};
pub use lookup::TablePropertyLookup;
pub use provider::HmsProvider;

// Public modules
pub mod client;
pub mod config;
pub mod error;
pub mod lookup;
pub mod provider;
pub mod types;
