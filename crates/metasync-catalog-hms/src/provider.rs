//! HMS catalog provider implementation

use async_trait::async_trait;
use metasync_catalog::translate::{
    derive_metadata_location, is_object_store_location, split_bucket_and_key, Backend,
    METADATA_LOCATION_PARAM,
};
use metasync_catalog::{CatalogError, CatalogProvider, CatalogResult, FileDeleter, TableFormat, TableInfo};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::client::{HiveConnector, HmsClient};
use crate::config::HmsConfig;
use crate::error::{HmsError, HmsResult};
use crate::lookup::TablePropertyLookup;
use crate::types;

/// HMS catalog provider
///
/// Implements [`CatalogProvider`] on top of a pooled Hive Metastore client.
/// Iceberg table locations are resolved through a [`TablePropertyLookup`]
/// because the metastore's storage descriptor only points at the table root.
pub struct HmsProvider {
    /// Catalog name
    name: String,

    /// Pooled metastore client
    client: HmsClient,

    /// Resolves the live Iceberg metadata pointer
    lookup: Arc<dyn TablePropertyLookup>,

    /// Removes table data on drop
    deleter: Arc<dyn FileDeleter>,

    /// HMS configuration
    config: HmsConfig,
}

impl HmsProvider {
    /// Create a new HMS provider
    pub async fn new(
        config: HmsConfig,
        connector: Arc<dyn HiveConnector>,
        lookup: Arc<dyn TablePropertyLookup>,
        deleter: Arc<dyn FileDeleter>,
    ) -> HmsResult<Self> {
        info!("Initializing HMS provider: {}", config.name);

        let client = HmsClient::new(config.clone(), connector).await?;

        info!("HMS provider initialized successfully: {}", config.name);

        Ok(Self {
            name: config.name.clone(),
            client,
            lookup,
            deleter,
            config,
        })
    }

    fn read_error(&self, err: HmsError, database: &str, table: &str) -> CatalogError {
        if err.is_not_found() {
            CatalogError::table_not_found(database, table)
        } else {
            self.remote_error(err)
        }
    }

    fn remote_error(&self, err: HmsError) -> CatalogError {
        match err {
            HmsError::PropertyLookup { .. } => err.into(),
            other => CatalogError::unavailable(&self.name, other),
        }
    }

    fn create_error(&self, err: HmsError, database: &str, table: &str) -> CatalogError {
        if err.is_retryable() {
            CatalogError::unavailable(&self.name, err)
        } else {
            CatalogError::RemoteCreateFailed {
                database: database.to_string(),
                table: table.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl CatalogProvider for HmsProvider {
    fn get_name(&self) -> &str {
        &self.name
    }

    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        debug!("Listing tables in {}", database);

        self.client
            .get_all_tables(database)
            .await
            .map_err(|e| self.remote_error(e))
    }

    async fn get_table(&self, database: &str, name: &str) -> CatalogResult<TableInfo> {
        debug!("Getting table: {}.{}", database, name);

        let table = self
            .client
            .get_table(database, name)
            .await
            .map_err(|e| self.read_error(e, database, name))?;

        let location = match types::table_format(&table) {
            TableFormat::Parquet => table.sd.location.clone(),
            TableFormat::Iceberg => self
                .lookup
                .get_table_property(name, METADATA_LOCATION_PARAM)
                .await
                .map_err(|e| self.remote_error(e))?,
        };

        Ok(types::table_from_hive(&table, location))
    }

    async fn create_table(&self, database: &str, table: &TableInfo) -> CatalogResult<()> {
        table.validate()?;
        info!("Creating table: {}.{}", database, table.name);

        let hive_table = types::table_to_hive(database, &self.config.owner, table);
        self.client
            .create_table(&hive_table)
            .await
            .map_err(|e| self.create_error(e, database, &table.name))
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

        match self.client.drop_table(database, name, delete_data).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                debug!("Table {}.{} disappeared before drop", database, name);
                return Ok(());
            }
            Err(e) => return Err(self.remote_error(e)),
        }

        if delete_data && is_object_store_location(&info.metadata_location) {
            let location = derive_metadata_location(info.format, &info.metadata_location, Backend::Hive);
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
