//! Error types for HMS catalog operations

use metasync_catalog::CatalogError;
use thiserror::Error;

/// Result type for HMS operations
pub type HmsResult<T> = Result<T, HmsError>;

/// Errors that can occur when interacting with Hive Metastore
#[derive(Debug, Error)]
pub enum HmsError {
    /// Database or table does not exist (`NoSuchObjectException`)
    #[error("no such object: {0}")]
    NoSuchObject(String),

    /// Table already exists (`AlreadyExistsException`)
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Invalid HMS URI format
    #[error("invalid HMS URI: {0}")]
    InvalidUri(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Connection pool error
    #[error("connection pool error: {0}")]
    ConnectionPool(String),

    /// Thrift protocol error (the metastore rejected the request)
    #[error("Thrift protocol error: {0}")]
    ThriftProtocol(String),

    /// Thrift transport error
    #[error("Thrift transport error: {0}")]
    ThriftTransport(String),

    /// Network I/O error
    #[error("network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Table property lookup against the metastore database failed
    #[error("property {key} of table {table} unavailable: {message}")]
    PropertyLookup {
        table: String,
        key: String,
        message: String,
    },

    /// Internal error (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl HmsError {
    /// Check if the metastore reported a missing object
    pub fn is_not_found(&self) -> bool {
        matches!(self, HmsError::NoSuchObject(_))
    }

    /// Check if an error is transient and the call may be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            HmsError::ThriftTransport(_) | HmsError::Io(_) | HmsError::ConnectionPool(_)
        )
    }
}

/// Convert HMS errors to catalog errors
impl From<HmsError> for CatalogError {
    fn from(err: HmsError) -> Self {
        match err {
            HmsError::PropertyLookup {
                table,
                key,
                message,
            } => CatalogError::PropertyLookupFailed {
                table,
                key,
                message,
            },

            HmsError::InvalidConfig(msg) | HmsError::InvalidUri(msg) => {
                CatalogError::InvalidArgument(msg)
            }

            HmsError::UrlParse(ref err) => {
                CatalogError::InvalidArgument(format!("Invalid URL: {}", err))
            }

            HmsError::Internal(msg) => CatalogError::Internal(msg),

            HmsError::NoSuchObject(_)
            | HmsError::AlreadyExists(_)
            | HmsError::ConnectionPool(_)
            | HmsError::ThriftProtocol(_)
            | HmsError::ThriftTransport(_)
            | HmsError::Io(_) => CatalogError::unavailable("hive", err),
        }
    }
}
