//! Glue catalog provider implementation

use async_trait::async_trait;
use metasync_catalog::translate::{
    derive_metadata_location, is_object_store_location, split_bucket_and_key, Backend,
};
use metasync_catalog::{CatalogError, CatalogProvider, CatalogResult, FileDeleter, TableInfo};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::client::GlueApi;
use crate::config::GlueConfig;
use crate::error::GlueError;
use crate::types;

/// Glue catalog provider
pub struct GlueProvider {
    name: String,
    client: Arc<dyn GlueApi>,
    deleter: Arc<dyn FileDeleter>,
}

impl GlueProvider {
    pub fn new(
        config: GlueConfig,
        client: Arc<dyn GlueApi>,
        deleter: Arc<dyn FileDeleter>,
    ) -> Self {
        info!("Initializing Glue provider: {}", config.name);
        Self {
            name: config.name,
            client,
            deleter,
        }
    }

    fn remote_error(&self, err: GlueError) -> CatalogError {
        match err {
            GlueError::Build(_) | GlueError::InvalidConfig(_) => err.into(),
            other => CatalogError::unavailable(&self.name, other),
        }
    }
}

#[async_trait]
impl CatalogProvider for GlueProvider {
    fn get_name(&self) -> &str {
        &self.name
    }

    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        debug!("Listing tables in {}", database);

        self.client
            .get_tables(database)
            .await
            .map_err(|e| CatalogError::unavailable(&self.name, e))
    }

    async fn get_table(&self, database: &str, name: &str) -> CatalogResult<TableInfo> {
        debug!("Getting table: {}.{}", database, name);

        match self.client.get_table(database, name).await {
            Ok(table) => Ok(types::table_from_glue(&table)),
            Err(e) if e.is_not_found() => Err(CatalogError::table_not_found(database, name)),
            Err(e) => Err(self.remote_error(e)),
        }
    }

    async fn create_table(&self, database: &str, table: &TableInfo) -> CatalogResult<()> {
        table.validate()?;
        info!("Creating table: {}.{}", database, table.name);

        match self
            .client
            .create_table(database, types::table_to_glue(table))
            .await
        {
            Ok(()) => Ok(()),
            Err(e @ GlueError::Transport(_)) => Err(CatalogError::unavailable(&self.name, e)),
            Err(e @ GlueError::Build(_)) => Err(e.into()),
            Err(e) => Err(CatalogError::RemoteCreateFailed {
                database: database.to_string(),
                table: table.name.clone(),
                message: e.to_string(),
            }),
        }
    }

    async fn drop_table(&self, database: &str, name: &str, delete_data: bool) -> CatalogResult<()> {
        let info = match self.get_table(database, name).await {
            Ok(info) => info,
            Err(e) if e.is_not_found() => {
                debug!("Table {}.{} does not exist, nothing to drop", database, name);
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        info!(
            "Dropping table: {}.{} (delete_data={})",
            database, name, delete_data
        );

        match self.client.delete_table(database, name).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                debug!("Table {}.{} disappeared before drop", database, name);
                return Ok(());
            }
            Err(e) => return Err(self.remote_error(e)),
        }

        if delete_data && is_object_store_location(&info.metadata_location) {
            let location =
                derive_metadata_location(info.format, &info.metadata_location, Backend::Glue);
            let (bucket, prefix) = split_bucket_and_key(&location);
            if let Err(e) = self.deleter.delete(bucket, prefix).await {
                error!(
                    "Table {}.{} dropped on {} but files under {} could not be deleted: {}",
                    database, name, self.name, location, e
                );
                return Err(CatalogError::DataDeletionFailed {
                    location,
                    message: e.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlueResult;
    use crate::types::GlueTable;
    use metasync_catalog::{Column, SqlType, TableFormat};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockGlue {
        tables: Mutex<BTreeMap<(String, String), GlueTable>>,
        created: Mutex<Vec<(String, GlueTable)>>,
        deleted: Mutex<Vec<(String, String)>>,
        fail_create: Mutex<Option<GlueError>>,
    }

    impl MockGlue {
        fn with_table(self, database: &str, table: TableInfo) -> Self {
            self.tables.lock().unwrap().insert(
                (database.to_string(), table.name.clone()),
                types::table_to_glue(&table),
            );
            self
        }
    }

    #[async_trait]
    impl GlueApi for MockGlue {
        async fn get_tables(&self, database: &str) -> GlueResult<Vec<String>> {
            let tables = self.tables.lock().unwrap();
            let names: Vec<String> = tables
                .keys()
                .filter(|(db, _)| db == database)
                .map(|(_, name)| name.clone())
                .collect();
            if names.is_empty() {
                return Err(GlueError::EntityNotFound(database.to_string()));
            }
            Ok(names)
        }

        async fn get_table(&self, database: &str, name: &str) -> GlueResult<GlueTable> {
            self.tables
                .lock()
                .unwrap()
                .get(&(database.to_string(), name.to_string()))
                .cloned()
                .ok_or_else(|| GlueError::EntityNotFound(format!("{}.{}", database, name)))
        }

        async fn create_table(&self, database: &str, table: GlueTable) -> GlueResult<()> {
            self.created
                .lock()
                .unwrap()
                .push((database.to_string(), table.clone()));
            if let Some(err) = self.fail_create.lock().unwrap().take() {
                return Err(err);
            }
            self.tables
                .lock()
                .unwrap()
                .insert((database.to_string(), table.name.clone()), table);
            Ok(())
        }

        async fn delete_table(&self, database: &str, name: &str) -> GlueResult<()> {
            self.deleted
                .lock()
                .unwrap()
                .push((database.to_string(), name.to_string()));
            self.tables
                .lock()
                .unwrap()
                .remove(&(database.to_string(), name.to_string()))
                .map(|_| ())
                .ok_or_else(|| GlueError::EntityNotFound(format!("{}.{}", database, name)))
        }
    }

    #[derive(Default)]
    struct MockDeleter {
        calls: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl FileDeleter for MockDeleter {
        async fn delete(&self, bucket: &str, prefix: &str) -> CatalogResult<()> {
            self.calls
                .lock()
                .unwrap()
                .push((bucket.to_string(), prefix.to_string()));
            if self.fail {
                return Err(CatalogError::Internal("access denied".to_string()));
            }
            Ok(())
        }
    }

    fn parquet(name: &str) -> TableInfo {
        TableInfo::new(
            name,
            vec![Column::new("id", SqlType::BigInt)],
            format!("s3://bucket/db/{}", name),
            TableFormat::Parquet,
        )
    }

    fn provider(
        glue: MockGlue,
        deleter: MockDeleter,
    ) -> (GlueProvider, Arc<MockGlue>, Arc<MockDeleter>) {
        let glue = Arc::new(glue);
        let deleter = Arc::new(deleter);
        let provider = GlueProvider::new(GlueConfig::default(), glue.clone(), deleter.clone());
        (provider, glue, deleter)
    }

    #[tokio::test]
    async fn test_list_tables() {
        let glue = MockGlue::default()
            .with_table("db", parquet("a"))
            .with_table("db", parquet("b"))
            .with_table("other", parquet("c"));
        let (provider, _, _) = provider(glue, MockDeleter::default());

        assert_eq!(provider.get_name(), "glue");
        assert_eq!(provider.list_tables("db").await.unwrap(), vec!["a", "b"]);
        assert!(matches!(
            provider.list_tables("missing").await,
            Err(CatalogError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_table() {
        let glue = MockGlue::default().with_table("db", parquet("a"));
        let (provider, _, _) = provider(glue, MockDeleter::default());

        let info = provider.get_table("db", "a").await.unwrap();
        assert_eq!(info, parquet("a"));

        let err = provider.get_table("db", "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_table_drops_partitions() {
        let (provider, glue, _) = provider(MockGlue::default(), MockDeleter::default());
        let table = parquet("a").with_partitions(vec![Column::new("dt", SqlType::Date)]);

        provider.create_table("db", &table).await.unwrap();

        let info = provider.get_table("db", "a").await.unwrap();
        assert!(info.partitions.is_empty());
        assert_eq!(glue.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_table_without_columns() {
        let (provider, glue, _) = provider(MockGlue::default(), MockDeleter::default());
        let table = TableInfo::new("a", vec![], "s3://bucket/a", TableFormat::Parquet);

        assert!(matches!(
            provider.create_table("db", &table).await,
            Err(CatalogError::InvalidTableSpec(_))
        ));
        assert!(glue.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_table_failures() {
        let glue = MockGlue::default();
        *glue.fail_create.lock().unwrap() =
            Some(GlueError::Service("AlreadyExistsException".to_string()));
        let (provider, glue, _) = provider(glue, MockDeleter::default());

        assert!(matches!(
            provider.create_table("db", &parquet("a")).await,
            Err(CatalogError::RemoteCreateFailed { .. })
        ));

        *glue.fail_create.lock().unwrap() =
            Some(GlueError::Transport("dispatch failure".to_string()));
        assert!(matches!(
            provider.create_table("db", &parquet("a")).await,
            Err(CatalogError::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_drop_missing_table() {
        let (provider, glue, deleter) = provider(MockGlue::default(), MockDeleter::default());

        provider.drop_table("db", "nope", true).await.unwrap();
        assert!(glue.deleted.lock().unwrap().is_empty());
        assert!(deleter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drop_table_with_data() {
        let iceberg = TableInfo::new(
            "ice",
            vec![Column::new("id", SqlType::Int)],
            "s3://bucket/db/ice/metadata/00001.metadata.json",
            TableFormat::Iceberg,
        );
        let glue = MockGlue::default()
            .with_table("db", parquet("a"))
            .with_table("db", iceberg);
        let (provider, glue, deleter) = provider(glue, MockDeleter::default());

        provider.drop_table("db", "a", true).await.unwrap();
        provider.drop_table("db", "ice", true).await.unwrap();

        assert_eq!(glue.deleted.lock().unwrap().len(), 2);
        assert_eq!(
            *deleter.calls.lock().unwrap(),
            vec![
                ("bucket".to_string(), "db/a".to_string()),
                ("bucket".to_string(), "db/ice".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_drop_table_keeps_data() {
        let glue = MockGlue::default().with_table("db", parquet("a"));
        let (provider, glue, deleter) = provider(glue, MockDeleter::default());

        provider.drop_table("db", "a", false).await.unwrap();
        assert_eq!(glue.deleted.lock().unwrap().len(), 1);
        assert!(deleter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_drop_table_deletion_failure() {
        let deleter = MockDeleter {
            fail: true,
            ..Default::default()
        };
        let glue = MockGlue::default().with_table("db", parquet("a"));
        let (provider, glue, _) = provider(glue, deleter);

        assert!(matches!(
            provider.drop_table("db", "a", true).await,
            Err(CatalogError::DataDeletionFailed { .. })
        ));
        assert_eq!(glue.deleted.lock().unwrap().len(), 1);
    }
}
