//! Catalog registry keyed by [`CatalogId`]

use metasync_catalog::{CatalogError, CatalogId, CatalogProvider, CatalogResult, FileDeleter};
use metasync_catalog_glue::{GlueProvider, SdkGlueClient};
use metasync_catalog_hms::{HiveConnector, HmsProvider, TablePropertyLookup};
use metasync_storage_s3::S3FileDeleter;
use std::sync::Arc;
use tracing::info;

use crate::config::MetasyncConfig;

/// The Hive and Glue catalogs available to the manager
#[derive(Clone)]
pub struct CatalogPool {
    hive: Arc<dyn CatalogProvider>,
    glue: Arc<dyn CatalogProvider>,
}

impl CatalogPool {
    pub fn new(hive: Arc<dyn CatalogProvider>, glue: Arc<dyn CatalogProvider>) -> Self {
        Self { hive, glue }
    }

    /// Build both providers from configuration
    ///
    /// The Thrift connection and the metastore database lookup are supplied
    /// by the caller; AWS clients are built from the default credential chain
    /// and `aws.region`.
    pub async fn connect(
        config: &MetasyncConfig,
        connector: Arc<dyn HiveConnector>,
        lookup: Arc<dyn TablePropertyLookup>,
    ) -> CatalogResult<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.aws.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let deleter: Arc<dyn FileDeleter> = Arc::new(S3FileDeleter::new(&sdk_config, &config.s3)?);

        let glue_client = SdkGlueClient::new(&sdk_config, &config.glue)?;
        let glue = GlueProvider::new(config.glue.clone(), Arc::new(glue_client), deleter.clone());

        let hive = HmsProvider::new(config.hive.clone(), connector, lookup, deleter).await?;

        info!("Catalog pool ready: {}, {}", hive.get_name(), glue.get_name());
        Ok(Self::new(Arc::new(hive), Arc::new(glue)))
    }

    /// Resolve a catalog identifier
    pub fn get(&self, id: &CatalogId) -> CatalogResult<Arc<dyn CatalogProvider>> {
        match id.as_str() {
            "hive" => Ok(self.hive.clone()),
            "glue" => Ok(self.glue.clone()),
            other => Err(CatalogError::UnsupportedCatalog(other.to_string())),
        }
    }
}

impl std::fmt::Debug for CatalogPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogPool")
            .field("hive", &self.hive.get_name())
            .field("glue", &self.glue.get_name())
            .finish()
    }
}
