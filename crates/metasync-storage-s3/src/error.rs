//! Error types for S3 deletion

use metasync_catalog::CatalogError;
use thiserror::Error;

pub type S3DeleteResult<T> = Result<T, S3DeleteError>;

/// Errors from S3 delete operations
#[derive(Debug, Error)]
pub enum S3DeleteError {
    /// Listing the objects under a prefix failed
    #[error("failed to list s3://{bucket}/{prefix}: {message}")]
    List {
        bucket: String,
        prefix: String,
        message: String,
    },

    /// A DeleteObjects request failed, or reported per-key failures
    #[error("failed to delete objects in bucket {bucket}: {message}")]
    Delete { bucket: String, message: String },

    /// Refused to delete a whole bucket
    #[error("refusing to delete every object in bucket {bucket}: empty prefix")]
    EmptyPrefix { bucket: String },

    /// A request could not be built
    #[error("failed to build S3 request: {0}")]
    Build(String),

    /// Missing region configuration
    #[error("Missing AWS region configuration")]
    MissingRegion,
}

impl From<aws_sdk_s3::error::BuildError> for S3DeleteError {
    fn from(err: aws_sdk_s3::error::BuildError) -> Self {
        S3DeleteError::Build(err.to_string())
    }
}

impl From<S3DeleteError> for CatalogError {
    fn from(err: S3DeleteError) -> Self {
        match err {
            S3DeleteError::List { bucket, prefix, message } => CatalogError::DataDeletionFailed {
                location: format!("s3://{}/{}", bucket, prefix),
                message,
            },
            S3DeleteError::Delete { bucket, message } => CatalogError::DataDeletionFailed {
                location: format!("s3://{}", bucket),
                message,
            },
            S3DeleteError::EmptyPrefix { bucket } => CatalogError::DataDeletionFailed {
                location: format!("s3://{}", bucket),
                message: "empty prefix".to_string(),
            },
            S3DeleteError::MissingRegion => {
                CatalogError::InvalidArgument("missing AWS region configuration".to_string())
            }
            S3DeleteError::Build(msg) => CatalogError::Internal(msg),
        }
    }
}
