//! HMS client implementation
//!
//! The Thrift transport itself is provided by a [`HiveConnector`]. This module
//! wraps the connections it produces with pooling, per-request timeouts and
//! retry of transient failures.

pub mod connection;

use crate::config::HmsConfig;
use crate::error::{HmsError, HmsResult};
use crate::types::HiveTable;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use self::connection::HmsConnectionPool;

/// A single connection to the Hive Metastore
#[async_trait]
pub trait HiveClient: Send + Sync {
    async fn get_all_tables(&self, db_name: &str) -> HmsResult<Vec<String>>;

    async fn get_table(&self, db_name: &str, table_name: &str) -> HmsResult<HiveTable>;

    async fn create_table(&self, table: HiveTable) -> HmsResult<()>;

    async fn drop_table(&self, db_name: &str, table_name: &str, delete_data: bool) -> HmsResult<()>;

    /// Whether the underlying transport is still usable
    fn is_open(&self) -> bool {
        true
    }
}

/// Opens new metastore connections
#[async_trait]
pub trait HiveConnector: Send + Sync + 'static {
    async fn connect(&self, config: &HmsConfig) -> HmsResult<Box<dyn HiveClient>>;
}

/// Pooled HMS client with timeout and retry handling
pub struct HmsClient {
    /// HMS configuration
    config: HmsConfig,

    /// Connection pool
    pool: HmsConnectionPool,
}

impl HmsClient {
    /// Create a new HMS client
    pub async fn new(config: HmsConfig, connector: Arc<dyn HiveConnector>) -> HmsResult<Self> {
        info!("Creating HMS client for URI: {}", config.uri);

        Self::validate_uri(&config.uri)?;
        let pool = HmsConnectionPool::new(config.clone(), connector).await?;

        Ok(Self { config, pool })
    }

    /// Validate the HMS URI
    fn validate_uri(uri: &str) -> HmsResult<()> {
        let uri = url::Url::parse(uri)?;

        if uri.scheme() != "thrift" {
            return Err(HmsError::InvalidUri(format!(
                "Expected thrift:// scheme, got: {}",
                uri.scheme()
            )));
        }

        if uri.host().is_none() {
            return Err(HmsError::InvalidUri("Missing host in URI".to_string()));
        }

        Ok(())
    }

    pub async fn get_all_tables(&self, db_name: &str) -> HmsResult<Vec<String>> {
        debug!("get_all_tables({})", db_name);
        self.with_retry(move || async move {
            let conn = self.pool.get().await?;
            conn.get_all_tables(db_name).await
        })
        .await
    }

    pub async fn get_table(&self, db_name: &str, table_name: &str) -> HmsResult<HiveTable> {
        debug!("get_table({}.{})", db_name, table_name);
        self.with_retry(move || async move {
            let conn = self.pool.get().await?;
            conn.get_table(db_name, table_name).await
        })
        .await
    }

    pub async fn create_table(&self, table: &HiveTable) -> HmsResult<()> {
        debug!("create_table({}.{})", table.db_name, table.table_name);
        self.with_retry(move || async move {
            let conn = self.pool.get().await?;
            conn.create_table(table.clone()).await
        })
        .await
    }

    pub async fn drop_table(
        &self,
        db_name: &str,
        table_name: &str,
        delete_data: bool,
    ) -> HmsResult<()> {
        debug!(
            "drop_table({}.{}, delete_data={})",
            db_name, table_name, delete_data
        );
        self.with_retry(move || async move {
            let conn = self.pool.get().await?;
            conn.drop_table(db_name, table_name, delete_data).await
        })
        .await
    }

    /// Execute an operation with timeout and retry logic
    async fn with_retry<F, Fut, T>(&self, operation: F) -> HmsResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = HmsResult<T>>,
    {
        let max_attempts = self.config.thrift.max_retries + 1;
        let timeout = self.config.thrift.timeout();
        let mut backoff = self.config.thrift.backoff();
        let mut attempt = 1;

        loop {
            let result = match tokio::time::timeout(timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(HmsError::ThriftTransport(format!(
                    "request timed out after {:?}",
                    timeout
                ))),
            };

            match result {
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    warn!(
                        "HMS operation failed (attempt {}/{}): {}. Retrying after {:?}",
                        attempt, max_attempts, e, backoff
                    );

                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

impl std::fmt::Debug for HmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmsClient")
            .field("uri", &self.config.uri)
            .field("pool", &self.pool.state())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::HmsThriftConfig;
    use crate::types::StorageDescriptor;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory metastore shared by every connection a [`MockConnector`] opens
    #[derive(Default)]
    pub(crate) struct MockMetastore {
        pub tables: Mutex<HashMap<(String, String), HiveTable>>,
        pub created: Mutex<Vec<HiveTable>>,
        pub dropped: Mutex<Vec<(String, String, bool)>>,
        pub transient_failures: AtomicUsize,
        pub fail_create: Mutex<Option<HmsError>>,
    }

    impl MockMetastore {
        pub fn with_table(self, table: HiveTable) -> Self {
            self.tables
                .lock()
                .unwrap()
                .insert((table.db_name.clone(), table.table_name.clone()), table);
            self
        }

        fn take_transient_failure(&self) -> HmsResult<()> {
            let remaining = self.transient_failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.transient_failures.store(remaining - 1, Ordering::SeqCst);
                return Err(HmsError::ThriftTransport("connection reset".to_string()));
            }
            Ok(())
        }
    }

    struct MockClient {
        metastore: Arc<MockMetastore>,
    }

    #[async_trait]
    impl HiveClient for MockClient {
        async fn get_all_tables(&self, db_name: &str) -> HmsResult<Vec<String>> {
            self.metastore.take_transient_failure()?;
            let tables = self.metastore.tables.lock().unwrap();
            let mut names: Vec<String> = tables
                .keys()
                .filter(|(db, _)| db == db_name)
                .map(|(_, name)| name.clone())
                .collect();
            if names.is_empty() {
                return Err(HmsError::NoSuchObject(format!("database {}", db_name)));
            }
            names.sort();
            Ok(names)
        }

        async fn get_table(&self, db_name: &str, table_name: &str) -> HmsResult<HiveTable> {
            self.metastore.take_transient_failure()?;
            self.metastore
                .tables
                .lock()
                .unwrap()
                .get(&(db_name.to_string(), table_name.to_string()))
                .cloned()
                .ok_or_else(|| HmsError::NoSuchObject(format!("{}.{}", db_name, table_name)))
        }

        async fn create_table(&self, table: HiveTable) -> HmsResult<()> {
            self.metastore.take_transient_failure()?;
            self.metastore.created.lock().unwrap().push(table.clone());
            if let Some(err) = self.metastore.fail_create.lock().unwrap().take() {
                return Err(err);
            }
            self.metastore
                .tables
                .lock()
                .unwrap()
                .insert((table.db_name.clone(), table.table_name.clone()), table);
            Ok(())
        }

        async fn drop_table(
            &self,
            db_name: &str,
            table_name: &str,
            delete_data: bool,
        ) -> HmsResult<()> {
            self.metastore.take_transient_failure()?;
            self.metastore.dropped.lock().unwrap().push((
                db_name.to_string(),
                table_name.to_string(),
                delete_data,
            ));
            self.metastore
                .tables
                .lock()
                .unwrap()
                .remove(&(db_name.to_string(), table_name.to_string()))
                .map(|_| ())
                .ok_or_else(|| HmsError::NoSuchObject(format!("{}.{}", db_name, table_name)))
        }
    }

    pub(crate) struct MockConnector {
        pub metastore: Arc<MockMetastore>,
        pub connects: AtomicUsize,
    }

    impl MockConnector {
        pub fn new(metastore: MockMetastore) -> Arc<Self> {
            Arc::new(Self {
                metastore: Arc::new(metastore),
                connects: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl HiveConnector for MockConnector {
        async fn connect(&self, _config: &HmsConfig) -> HmsResult<Box<dyn HiveClient>> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockClient {
                metastore: self.metastore.clone(),
            }))
        }
    }

    pub(crate) fn test_config() -> HmsConfig {
        HmsConfig {
            thrift: HmsThriftConfig {
                backoff_ms: 1,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub(crate) fn hive_table(db: &str, name: &str) -> HiveTable {
        HiveTable {
            table_name: name.to_string(),
            db_name: db.to_string(),
            owner: "hive".to_string(),
            sd: StorageDescriptor::default(),
            partition_keys: vec![],
            parameters: HashMap::new(),
            table_type: None,
        }
    }

    #[tokio::test]
    async fn test_invalid_uri_scheme() {
        let config = HmsConfig {
            uri: "http://localhost:9083".to_string(),
            ..Default::default()
        };

        let client = HmsClient::new(config, MockConnector::new(MockMetastore::default())).await;
        assert!(matches!(client, Err(HmsError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn test_missing_host() {
        let config = HmsConfig {
            uri: "thrift://".to_string(),
            ..Default::default()
        };

        let client = HmsClient::new(config, MockConnector::new(MockMetastore::default())).await;
        assert!(client.is_err());
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let metastore = MockMetastore::default().with_table(hive_table("db", "t1"));
        metastore.transient_failures.store(2, Ordering::SeqCst);
        let connector = MockConnector::new(metastore);

        let client = HmsClient::new(test_config(), connector.clone()).await.unwrap();
        let tables = client.get_all_tables("db").await.unwrap();
        assert_eq!(tables, vec!["t1"]);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let metastore = MockMetastore::default().with_table(hive_table("db", "t1"));
        metastore.transient_failures.store(10, Ordering::SeqCst);
        let connector = MockConnector::new(metastore);

        let client = HmsClient::new(test_config(), connector.clone()).await.unwrap();
        let result = client.get_all_tables("db").await;
        assert!(matches!(result, Err(HmsError::ThriftTransport(_))));
        // 1 attempt + 3 retries
        assert_eq!(connector.metastore.transient_failures.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_does_not_retry_not_found() {
        let metastore = MockMetastore::default();
        let connector = MockConnector::new(metastore);

        let client = HmsClient::new(test_config(), connector).await.unwrap();
        let result = client.get_table("db", "missing").await;
        assert!(matches!(result, Err(HmsError::NoSuchObject(_))));
    }
}
