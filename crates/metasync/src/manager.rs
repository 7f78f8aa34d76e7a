//! Create, drop and sync across catalogs

use metasync_catalog::{CatalogId, CatalogProvider, CreateSpec, DropSpec};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::error::{BatchError, ManagerError};
use crate::pool::CatalogPool;

/// Orchestrates table operations over the catalogs of a [`CatalogPool`]
///
/// Operations run table by table in input order. A failing table never stops
/// the rest of the batch; only resolving a catalog or listing the tables a
/// sync starts from can abort early.
#[derive(Debug, Clone)]
pub struct CatalogManager {
    pool: CatalogPool,
}

impl CatalogManager {
    pub fn new(pool: CatalogPool) -> Self {
        Self { pool }
    }

    /// Create every table of `specs` in each catalog of `catalogs`
    pub async fn create(&self, catalogs: &[CatalogId], specs: &[CreateSpec]) -> Result<(), BatchError> {
        let mut errors = BatchError::new();

        for id in catalogs {
            let catalog = match self.pool.get(id) {
                Ok(catalog) => catalog,
                Err(e) => {
                    warn!("Skipping catalog {}: {}", id, e);
                    errors.push(e);
                    continue;
                }
            };

            for spec in specs {
                for table in &spec.tables {
                    info!("Creating table {}.{} on {}", spec.db, table.name, id);
                    if let Err(source) = catalog.create_table(&spec.db, table).await {
                        warn!("Failed to create {}.{} on {}: {}", spec.db, table.name, id, source);
                        errors.push(ManagerError::Create {
                            catalog: id.clone(),
                            database: spec.db.clone(),
                            table: table.name.clone(),
                            source,
                        });
                    }
                }
            }
        }

        errors.into_result()
    }

    /// Drop every table of `specs` from one catalog
    ///
    /// Returns one error per table that could not be dropped; an unknown
    /// catalog is reported as the only error.
    pub async fn drop(&self, catalog_id: &CatalogId, specs: &[DropSpec]) -> Vec<ManagerError> {
        let catalog = match self.pool.get(catalog_id) {
            Ok(catalog) => catalog,
            Err(e) => return vec![e.into()],
        };

        let mut errors = Vec::new();
        for spec in specs {
            for table in &spec.tables {
                info!(
                    "Dropping table {}.{} on {} (delete_data={})",
                    spec.db, table.table, catalog_id, table.delete_data
                );
                if let Err(source) = catalog
                    .drop_table(&spec.db, &table.table, table.delete_data)
                    .await
                {
                    warn!("Failed to drop {}.{} on {}: {}", spec.db, table.table, catalog_id, source);
                    errors.push(ManagerError::Drop {
                        catalog: catalog_id.clone(),
                        database: spec.db.clone(),
                        table: table.table.clone(),
                        source,
                    });
                }
            }
        }
        errors
    }

    /// Make the tables of `database` in `target` match those in `source`
    ///
    /// Tables missing from `target` are copied from `source`. With `delete`,
    /// tables only present in `target` are dropped along with their data.
    /// When `tables` is non-empty it replaces the listing of `source`.
    pub async fn sync(
        &self,
        source_id: &CatalogId,
        target_id: &CatalogId,
        database: &str,
        tables: &[String],
        delete: bool,
    ) -> Result<(), BatchError> {
        let source = self.pool.get(source_id)?;
        let target = self.pool.get(target_id)?;

        info!(
            "Syncing tables of {} from {} to {} (delete={})",
            database, source_id, target_id, delete
        );

        let source_tables = if tables.is_empty() {
            list_tables(source.as_ref(), source_id, database).await?
        } else {
            tables.to_vec()
        };
        let target_tables = list_tables(target.as_ref(), target_id, database).await?;

        let mut errors = BatchError::new();

        let existing: HashSet<&str> = target_tables.iter().map(String::as_str).collect();
        for name in source_tables.iter().filter(|name| !existing.contains(name.as_str())) {
            info!("Creating table {}.{} on {}", database, name, target_id);
            let table = match source.get_table(database, name).await {
                Ok(table) => table,
                Err(err) => {
                    warn!("Failed to read {}.{} from {}: {}", database, name, source_id, err);
                    errors.push(ManagerError::Fetch {
                        catalog: source_id.clone(),
                        database: database.to_string(),
                        table: name.clone(),
                        source: err,
                    });
                    continue;
                }
            };
            if let Err(err) = target.create_table(database, &table).await {
                warn!("Failed to create {}.{} on {}: {}", database, name, target_id, err);
                errors.push(ManagerError::Create {
                    catalog: target_id.clone(),
                    database: database.to_string(),
                    table: name.clone(),
                    source: err,
                });
            }
        }

        if delete {
            let wanted: HashSet<&str> = source_tables.iter().map(String::as_str).collect();
            for name in target_tables.iter().filter(|name| !wanted.contains(name.as_str())) {
                info!("Dropping table {}.{} on {}", database, name, target_id);
                if let Err(err) = target.drop_table(database, name, delete).await {
                    warn!("Failed to drop {}.{} on {}: {}", database, name, target_id, err);
                    errors.push(ManagerError::Drop {
                        catalog: target_id.clone(),
                        database: database.to_string(),
                        table: name.clone(),
                        source: err,
                    });
                }
            }
        }

        errors.into_result()
    }
}

async fn list_tables(
    catalog: &dyn CatalogProvider,
    id: &CatalogId,
    database: &str,
) -> Result<Vec<String>, ManagerError> {
    catalog
        .list_tables(database)
        .await
        .map_err(|source| ManagerError::List {
            catalog: id.clone(),
            database: database.to_string(),
            source,
        })
}
