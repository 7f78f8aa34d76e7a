//! Error types for Glue catalog operations

use aws_sdk_glue::error::{DisplayErrorContext, SdkError};
use metasync_catalog::CatalogError;
use thiserror::Error;

/// Result type for Glue operations
pub type GlueResult<T> = Result<T, GlueError>;

/// Errors that can occur when interacting with the Glue Data Catalog
#[derive(Debug, Error)]
pub enum GlueError {
    /// Database or table does not exist (`EntityNotFoundException`)
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Glue answered the request with an error
    #[error("Glue service error: {0}")]
    Service(String),

    /// The request never got an answer (timeout, connection failure)
    #[error("Glue transport error: {0}")]
    Transport(String),

    /// A request could not be built from the table definition
    #[error("failed to build Glue request: {0}")]
    Build(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GlueError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GlueError::EntityNotFound(_))
    }

    /// Classify an SDK failure, `is_not_found` inspects the modeled service error
    pub(crate) fn from_sdk<E, R>(
        err: SdkError<E, R>,
        target: &str,
        is_not_found: impl FnOnce(&E) -> bool,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        match &err {
            SdkError::ServiceError(service_err) if is_not_found(service_err.err()) => {
                GlueError::EntityNotFound(target.to_string())
            }
            SdkError::ServiceError(_) => {
                GlueError::Service(format!("{}: {}", target, DisplayErrorContext(&err)))
            }
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => {
                GlueError::Transport(format!("{}: {}", target, DisplayErrorContext(&err)))
            }
            _ => GlueError::Service(format!("{}: {}", target, DisplayErrorContext(&err))),
        }
    }
}

impl From<aws_sdk_glue::error::BuildError> for GlueError {
    fn from(err: aws_sdk_glue::error::BuildError) -> Self {
        GlueError::Build(err.to_string())
    }
}

impl From<GlueError> for CatalogError {
    fn from(err: GlueError) -> Self {
        match err {
            GlueError::InvalidConfig(msg) => CatalogError::InvalidArgument(msg),
            GlueError::Build(msg) => CatalogError::InvalidTableSpec(msg),
            other => CatalogError::unavailable("glue", other),
        }
    }
}
