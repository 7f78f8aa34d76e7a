//! AWS Glue Data Catalog provider for metasync
//!
//! [`GlueProvider`] implements `CatalogProvider` over any [`GlueApi`];
//! [`SdkGlueClient`] is the AWS SDK backed implementation.

pub use client::{GlueApi, SdkGlueClient};
pub use config::GlueConfig;
pub use error::{GlueError, GlueResult};
pub use provider::GlueProvider;

pub mod client;
pub mod config;
pub mod error;
pub mod provider;
pub mod types;
