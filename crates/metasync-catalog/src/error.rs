//! Error types shared by every catalog backend

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced through the [`CatalogProvider`](crate::CatalogProvider) interface
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog identifier does not name a configured backend
    #[error("unsupported catalog: {0}")]
    UnsupportedCatalog(String),

    /// The remote catalog call failed for a reason other than not-found
    #[error("catalog {catalog} unavailable: {message}")]
    Unavailable { catalog: String, message: String },

    /// Table does not exist in the catalog
    #[error("table not found: {database}.{table}")]
    TableNotFound { database: String, table: String },

    /// The table definition was rejected before any remote call
    #[error("invalid table spec: {0}")]
    InvalidTableSpec(String),

    /// The remote catalog rejected a create request
    #[error("failed to create table {database}.{table}: {message}")]
    RemoteCreateFailed {
        database: String,
        table: String,
        message: String,
    },

    /// The auxiliary table property lookup failed
    #[error("failed to look up property {key} of table {table}: {message}")]
    PropertyLookupFailed {
        table: String,
        key: String,
        message: String,
    },

    /// Metadata was dropped but the underlying files could not be removed
    #[error("table dropped but data under {location} could not be deleted: {message}")]
    DataDeletionFailed { location: String, message: String },

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal error (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn unavailable(catalog: impl Into<String>, message: impl ToString) -> Self {
        Self::Unavailable {
            catalog: catalog.into(),
            message: message.to_string(),
        }
    }

    pub fn table_not_found(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self::TableNotFound {
            database: database.into(),
            table: table.into(),
        }
    }

    /// Whether this error means the table is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::TableNotFound { .. })
    }
}
