//! Glue client implementation

use async_trait::async_trait;
use aws_sdk_glue::types::{Column, SerDeInfo, StorageDescriptor, Table, TableInput};
use aws_sdk_glue::Client;
use std::fmt::Debug;
use tracing::debug;

use crate::config::GlueConfig;
use crate::error::{GlueError, GlueResult};
use crate::types::{GlueColumn, GlueStorageDescriptor, GlueTable};

/// The subset of the Glue Data Catalog API used by the provider
#[async_trait]
pub trait GlueApi: Send + Sync {
    /// Names of every table in `database`
    async fn get_tables(&self, database: &str) -> GlueResult<Vec<String>>;

    async fn get_table(&self, database: &str, name: &str) -> GlueResult<GlueTable>;

    async fn create_table(&self, database: &str, table: GlueTable) -> GlueResult<()>;

    async fn delete_table(&self, database: &str, name: &str) -> GlueResult<()>;
}

/// [`GlueApi`] backed by the AWS SDK
#[derive(Clone)]
pub struct SdkGlueClient {
    client: Client,
    catalog_id: Option<String>,
}

impl Debug for SdkGlueClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkGlueClient")
            .field("catalog_id", &self.catalog_id)
            .finish()
    }
}

impl SdkGlueClient {
    /// Create a Glue client from a loaded AWS configuration
    ///
    /// ```ignore
    /// let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    /// let client = SdkGlueClient::new(&sdk_config, &GlueConfig::default())?;
    /// ```
    pub fn new(sdk_config: &aws_config::SdkConfig, config: &GlueConfig) -> GlueResult<Self> {
        if sdk_config.region().is_none() {
            return Err(GlueError::InvalidConfig(
                "missing AWS region configuration".to_string(),
            ));
        }

        let mut builder = aws_sdk_glue::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            catalog_id: config.catalog_id.clone(),
        })
    }

    /// Create from a pre-built SDK client
    pub fn from_client(client: Client, catalog_id: Option<String>) -> Self {
        Self { client, catalog_id }
    }
}

#[async_trait]
impl GlueApi for SdkGlueClient {
    async fn get_tables(&self, database: &str) -> GlueResult<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token = None;

        loop {
            let response = self
                .client
                .get_tables()
                .set_catalog_id(self.catalog_id.clone())
                .database_name(database)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| {
                    GlueError::from_sdk(e, database, |err| err.is_entity_not_found_exception())
                })?;

            names.extend(response.table_list().iter().map(|t| t.name().to_string()));

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!("Glue database {} has {} tables", database, names.len());
        Ok(names)
    }

    async fn get_table(&self, database: &str, name: &str) -> GlueResult<GlueTable> {
        let target = format!("{}.{}", database, name);
        let response = self
            .client
            .get_table()
            .set_catalog_id(self.catalog_id.clone())
            .database_name(database)
            .name(name)
            .send()
            .await
            .map_err(|e| GlueError::from_sdk(e, &target, |err| err.is_entity_not_found_exception()))?;

        response
            .table()
            .map(table_from_sdk)
            .ok_or(GlueError::EntityNotFound(target))
    }

    async fn create_table(&self, database: &str, table: GlueTable) -> GlueResult<()> {
        let target = format!("{}.{}", database, table.name);
        let input = table_input(table)?;

        self.client
            .create_table()
            .set_catalog_id(self.catalog_id.clone())
            .database_name(database)
            .table_input(input)
            .send()
            .await
            .map_err(|e| GlueError::from_sdk(e, &target, |err| err.is_entity_not_found_exception()))?;
        Ok(())
    }

    async fn delete_table(&self, database: &str, name: &str) -> GlueResult<()> {
        let target = format!("{}.{}", database, name);
        self.client
            .delete_table()
            .set_catalog_id(self.catalog_id.clone())
            .database_name(database)
            .name(name)
            .send()
            .await
            .map_err(|e| GlueError::from_sdk(e, &target, |err| err.is_entity_not_found_exception()))?;
        Ok(())
    }
}

fn table_from_sdk(table: &Table) -> GlueTable {
    let storage_descriptor = table
        .storage_descriptor()
        .map(|sd| GlueStorageDescriptor {
            columns: sd
                .columns()
                .iter()
                .map(|col| GlueColumn {
                    name: col.name().to_string(),
                    type_name: col.r#type().map(String::from),
                })
                .collect(),
            location: sd.location().map(String::from),
            input_format: sd.input_format().map(String::from),
            output_format: sd.output_format().map(String::from),
            serialization_library: sd
                .serde_info()
                .and_then(|info| info.serialization_library())
                .map(String::from),
            serde_parameters: sd
                .serde_info()
                .and_then(|info| info.parameters())
                .cloned()
                .unwrap_or_default(),
        })
        .unwrap_or_default();

    GlueTable {
        name: table.name().to_string(),
        storage_descriptor,
        parameters: table.parameters().cloned().unwrap_or_default(),
        table_type: table.table_type().map(String::from),
    }
}

fn table_input(table: GlueTable) -> GlueResult<TableInput> {
    let sd = table.storage_descriptor;
    let columns = sd
        .columns
        .into_iter()
        .map(|col| Column::builder().name(col.name).set_type(col.type_name).build())
        .collect::<Result<Vec<_>, _>>()?;

    let serde_info = sd.serialization_library.map(|library| {
        SerDeInfo::builder()
            .serialization_library(library)
            .set_parameters(Some(sd.serde_parameters))
            .build()
    });

    let storage_descriptor = StorageDescriptor::builder()
        .set_columns(Some(columns))
        .set_location(sd.location)
        .set_input_format(sd.input_format)
        .set_output_format(sd.output_format)
        .set_serde_info(serde_info)
        .build();

    Ok(TableInput::builder()
        .name(table.name)
        .storage_descriptor(storage_descriptor)
        .set_parameters(Some(table.parameters))
        .set_table_type(table.table_type)
        .build()?)
}
