//! Prefix deletion on S3
//!
//! Objects are listed with `ListObjectsV2` one page at a time and each
//! non-empty page is removed with a single `DeleteObjects` request before the
//! next page is fetched. The first failure stops the walk.
//!
//! The prefix is treated as a directory: `db/tab` deletes `db/tab/...` and
//! never `db/tab_backup/...`. An empty prefix is rejected.

use async_trait::async_trait;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;
use aws_smithy_types::retry::RetryConfig;
use aws_smithy_types::timeout::TimeoutConfig;
use metasync_catalog::{CatalogResult, FileDeleter};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::S3DeleterConfig;
use crate::error::{S3DeleteError, S3DeleteResult};

/// One page of a prefix listing
#[derive(Debug, Default)]
pub(crate) struct ListPage {
    pub keys: Vec<String>,
    pub continuation_token: Option<String>,
}

/// The two S3 calls the deleter needs
#[async_trait]
pub(crate) trait ObjectStore: Send + Sync {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> S3DeleteResult<ListPage>;

    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> S3DeleteResult<()>;
}

#[async_trait]
impl ObjectStore for Client {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<String>,
    ) -> S3DeleteResult<ListPage> {
        let response = self
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(|e| S3DeleteError::List {
                bucket: bucket.to_string(),
                prefix: prefix.to_string(),
                message: describe_sdk_error(&e),
            })?;

        Ok(ListPage {
            keys: response
                .contents()
                .iter()
                .filter_map(|obj| obj.key().map(String::from))
                .collect(),
            continuation_token: response.next_continuation_token().map(String::from),
        })
    }

    async fn delete_objects(&self, bucket: &str, keys: Vec<String>) -> S3DeleteResult<()> {
        let objects = keys
            .into_iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()?;
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()?;

        let response = self
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| S3DeleteError::Delete {
                bucket: bucket.to_string(),
                message: describe_sdk_error(&e),
            })?;

        // quiet mode only reports the keys that failed
        if let Some(failed) = response.errors().first() {
            return Err(S3DeleteError::Delete {
                bucket: bucket.to_string(),
                message: format!(
                    "{} objects not deleted, first {}: {}",
                    response.errors().len(),
                    failed.key().unwrap_or_default(),
                    failed.message().unwrap_or_default()
                ),
            });
        }
        Ok(())
    }
}

/// [`FileDeleter`] removing every object under a key prefix
#[derive(Clone)]
pub struct S3FileDeleter {
    store: Arc<dyn ObjectStore>,
}

impl Debug for S3FileDeleter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3FileDeleter").finish_non_exhaustive()
    }
}

impl S3FileDeleter {
    /// Create a deleter from a loaded AWS configuration
    ///
    /// # Arguments
    ///
    /// * `sdk_config` - AWS SDK configuration (from `aws_config::load_defaults()`)
    /// * `config` - endpoint, timeout and retry overrides
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &S3DeleterConfig) -> S3DeleteResult<Self> {
        if sdk_config.region().is_none() {
            return Err(S3DeleteError::MissingRegion);
        }

        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        if let Some(max_retries) = config.max_retries {
            // the SDK counts the initial attempt
            builder = builder
                .retry_config(RetryConfig::standard().with_max_attempts(max_retries.saturating_add(1)));
        }

        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_millis(timeout_ms))
                    .build(),
            );
        }

        Ok(Self::from_client(Client::from_conf(builder.build())))
    }

    /// Create from a pre-built S3 client
    pub fn from_client(client: Client) -> Self {
        Self {
            store: Arc::new(client),
        }
    }

    #[cfg(test)]
    fn from_store(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Delete every object under the directory `prefix`, returning the number
    /// of objects removed
    pub async fn delete_prefix(&self, bucket: &str, prefix: &str) -> S3DeleteResult<usize> {
        let prefix = directory_prefix(prefix).ok_or_else(|| S3DeleteError::EmptyPrefix {
            bucket: bucket.to_string(),
        })?;
        info!("Deleting objects under s3://{}/{}", bucket, prefix);

        let mut deleted = 0;
        let mut continuation_token = None;

        loop {
            let page = self
                .store
                .list_page(bucket, &prefix, continuation_token.take())
                .await?;

            if !page.keys.is_empty() {
                let count = page.keys.len();
                self.store.delete_objects(bucket, page.keys).await?;
                deleted += count;
                debug!("Deleted {} objects from s3://{}/{}", count, bucket, prefix);
            }

            match page.continuation_token {
                Some(token) => continuation_token = Some(token),
                None => break,
            }
        }

        info!("Deleted {} objects under s3://{}/{}", deleted, bucket, prefix);
        Ok(deleted)
    }
}

/// `a/b` and `a/b/` both become `a/b/`; `None` when nothing is left
fn directory_prefix(prefix: &str) -> Option<String> {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("{}/", trimmed))
    }
}

#[async_trait]
impl FileDeleter for S3FileDeleter {
    async fn delete(&self, bucket: &str, prefix: &str) -> CatalogResult<()> {
        self.delete_prefix(bucket, prefix).await?;
        Ok(())
    }
}

/// Describe an SDK error with its HTTP status when the service answered
fn describe_sdk_error<E: std::fmt::Debug, R: std::fmt::Debug>(
    err: &aws_sdk_s3::error::SdkError<E, R>,
) -> String {
    use aws_sdk_s3::error::SdkError;

    match err {
        SdkError::ServiceError(service_err) => {
            format!("service error: {:?}", service_err.err())
        }
        SdkError::TimeoutError(_) => format!("timeout: {:?}", err),
        SdkError::DispatchFailure(_) => format!("connection error: {:?}", err),
        _ => format!("{:?}", err),
    }
}
