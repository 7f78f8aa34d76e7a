//! Hive Metastore table structures and their conversion to the canonical model
//!
//! The structs mirror the Thrift `Table`, `StorageDescriptor`, `FieldSchema`
//! and `SerDeInfo` definitions, limited to the fields metasync reads or writes.

use metasync_catalog::translate::{
    self, derive_metadata_location, map_column_type, normalize_location_scheme, unmap_column_type,
    Backend, DEFAULT_VARCHAR_LENGTH,
};
use metasync_catalog::{Column, TableFormat, TableInfo};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiveTable {
    pub table_name: String,
    pub db_name: String,
    pub owner: String,
    pub sd: StorageDescriptor,
    pub partition_keys: Vec<FieldSchema>,
    pub parameters: HashMap<String, String>,
    pub table_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageDescriptor {
    pub cols: Vec<FieldSchema>,
    pub location: String,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub serde_info: Option<SerDeInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerDeInfo {
    pub serialization_lib: String,
    pub parameters: HashMap<String, String>,
}

impl From<translate::SerDeInfo> for SerDeInfo {
    fn from(info: translate::SerDeInfo) -> Self {
        Self {
            serialization_lib: info.serialization_library,
            parameters: info.parameters,
        }
    }
}

/// Hive has no unbounded string in the canonical model
pub fn hive_column_type(native: String) -> String {
    if native.eq_ignore_ascii_case("string") {
        format!("varchar({})", DEFAULT_VARCHAR_LENGTH)
    } else {
        native
    }
}

pub fn columns_from_hive(cols: &[FieldSchema]) -> Vec<Column> {
    cols.iter()
        .map(|col| Column::new(col.name.clone(), map_column_type(&col.type_name)))
        .collect()
}

pub fn columns_to_hive(columns: &[Column]) -> Vec<FieldSchema> {
    columns
        .iter()
        .map(|column| FieldSchema {
            name: column.name.clone(),
            type_name: hive_column_type(unmap_column_type(&column.column_type)),
        })
        .collect()
}

/// Detect the table format from the storage descriptor
pub fn table_format(table: &HiveTable) -> TableFormat {
    TableFormat::from_input_output(table.sd.input_format.as_deref().unwrap_or_default())
}

/// Build the canonical table from a metastore table and its resolved location
pub fn table_from_hive(table: &HiveTable, location: String) -> TableInfo {
    TableInfo::new(
        table.table_name.clone(),
        columns_from_hive(&table.sd.cols),
        location,
        table_format(table),
    )
    .with_partitions(columns_from_hive(&table.partition_keys))
}

/// Build the metastore create request for a canonical table
pub fn table_to_hive(db_name: &str, owner: &str, table: &TableInfo) -> HiveTable {
    let format = table.format;
    let raw_location = normalize_location_scheme(&table.metadata_location, Backend::Hive);

    HiveTable {
        table_name: table.name.clone(),
        db_name: db_name.to_string(),
        owner: owner.to_string(),
        sd: StorageDescriptor {
            cols: columns_to_hive(&table.columns),
            location: derive_metadata_location(format, &table.metadata_location, Backend::Hive),
            input_format: format.input_format().map(String::from),
            output_format: format.output_format().map(String::from),
            serde_info: format.serde_info().map(SerDeInfo::from),
        },
        partition_keys: columns_to_hive(&table.partitions),
        parameters: format.parameters(&raw_location),
        table_type: format.table_type().map(String::from),
    }
}
