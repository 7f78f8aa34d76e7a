//! Glue table structures and their conversion to the canonical model

use metasync_catalog::translate::{
    derive_metadata_location, map_column_type, normalize_location_scheme, unmap_column_type,
    Backend,
};
use metasync_catalog::{Column, TableFormat, TableInfo};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueTable {
    pub name: String,
    pub storage_descriptor: GlueStorageDescriptor,
    pub parameters: HashMap<String, String>,
    pub table_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlueStorageDescriptor {
    pub columns: Vec<GlueColumn>,
    pub location: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub serialization_library: Option<String>,
    pub serde_parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueColumn {
    pub name: String,
    pub type_name: Option<String>,
}

pub fn columns_from_glue(columns: &[GlueColumn]) -> Vec<Column> {
    columns
        .iter()
        .map(|col| {
            Column::new(
                col.name.clone(),
                map_column_type(col.type_name.as_deref().unwrap_or_default()),
            )
        })
        .collect()
}

pub fn columns_to_glue(columns: &[Column]) -> Vec<GlueColumn> {
    columns
        .iter()
        .map(|column| GlueColumn {
            name: column.name.clone(),
            type_name: Some(unmap_column_type(&column.column_type)),
        })
        .collect()
}

/// Build the canonical table from a Glue table
///
/// The storage descriptor location is taken as is for every format; Glue
/// has no auxiliary lookup for the live Iceberg metadata file.
pub fn table_from_glue(table: &GlueTable) -> TableInfo {
    let sd = &table.storage_descriptor;

    TableInfo::new(
        table.name.clone(),
        columns_from_glue(&sd.columns),
        sd.location.clone().unwrap_or_default(),
        TableFormat::from_input_output(sd.input_format.as_deref().unwrap_or_default()),
    )
}

/// Build the Glue create request for a canonical table. Glue tables carry no
/// partition columns.
pub fn table_to_glue(table: &TableInfo) -> GlueTable {
    let format = table.format;
    let raw_location = normalize_location_scheme(&table.metadata_location, Backend::Glue);
    let serde_info = format.serde_info();

    GlueTable {
        name: table.name.clone(),
        storage_descriptor: GlueStorageDescriptor {
            columns: columns_to_glue(&table.columns),
            location: Some(derive_metadata_location(
                format,
                &table.metadata_location,
                Backend::Glue,
            )),
            input_format: format.input_format().map(String::from),
            output_format: format.output_format().map(String::from),
            serialization_library: serde_info
                .as_ref()
                .map(|info| info.serialization_library.clone()),
            serde_parameters: serde_info.map(|info| info.parameters).unwrap_or_default(),
        },
        parameters: format.parameters(&raw_location),
        table_type: format.table_type().map(String::from),
    }
}
