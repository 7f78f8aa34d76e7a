//! Canonical, backend-agnostic table model

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::error::{CatalogError, CatalogResult};

/// Identifier of a catalog backend
///
/// Only [`CatalogId::HIVE`] and [`CatalogId::GLUE`] resolve to a backend. Any
/// other value can still be represented so that it is rejected where it is
/// resolved, with a proper `UnsupportedCatalog` error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogId(Cow<'static, str>);

impl CatalogId {
    pub const HIVE: CatalogId = CatalogId(Cow::Borrowed("hive"));
    pub const GLUE: CatalogId = CatalogId(Cow::Borrowed("glue"));

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this identifier names one of the known backends
    pub fn is_supported(&self) -> bool {
        *self == Self::HIVE || *self == Self::GLUE
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CatalogId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// SQL type tag of a column
///
/// Native types outside the known set are carried verbatim in
/// [`SqlType::Other`] so translation never rejects a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SqlType {
    Varchar,
    Int,
    BigInt,
    SmallInt,
    Double,
    Date,
    Timestamp,
    Boolean,
    Other(String),
}

impl SqlType {
    pub fn as_str(&self) -> &str {
        match self {
            SqlType::Varchar => "varchar",
            SqlType::Int => "int",
            SqlType::BigInt => "bigint",
            SqlType::SmallInt => "smallint",
            SqlType::Double => "double",
            SqlType::Date => "date",
            SqlType::Timestamp => "timestamp",
            SqlType::Boolean => "boolean",
            SqlType::Other(tag) => tag,
        }
    }
}

impl From<&str> for SqlType {
    fn from(value: &str) -> Self {
        match value {
            "varchar" => SqlType::Varchar,
            "int" => SqlType::Int,
            "bigint" => SqlType::BigInt,
            "smallint" => SqlType::SmallInt,
            "double" => SqlType::Double,
            "date" => SqlType::Date,
            "timestamp" => SqlType::Timestamp,
            "boolean" => SqlType::Boolean,
            other => SqlType::Other(other.to_string()),
        }
    }
}

impl From<String> for SqlType {
    fn from(value: String) -> Self {
        match SqlType::from(value.as_str()) {
            SqlType::Other(_) => SqlType::Other(value),
            known => known,
        }
    }
}

impl From<SqlType> for String {
    fn from(value: SqlType) -> Self {
        match value {
            SqlType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column type: a SQL tag plus a length that only matters for varchar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    pub sql_type: SqlType,
    #[serde(default)]
    pub length: u32,
}

impl ColumnType {
    /// Build a column type, zeroing the length for non-varchar tags
    pub fn new(sql_type: SqlType, length: u32) -> Self {
        let length = if sql_type == SqlType::Varchar { length } else { 0 };
        Self { sql_type, length }
    }

    pub fn varchar(length: u32) -> Self {
        Self::new(SqlType::Varchar, length)
    }

    pub fn is_varchar(&self) -> bool {
        self.sql_type == SqlType::Varchar
    }
}

impl From<SqlType> for ColumnType {
    fn from(sql_type: SqlType) -> Self {
        Self::new(sql_type, 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Storage format of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Parquet,
    Iceberg,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Parquet => f.write_str("parquet"),
            TableFormat::Iceberg => f.write_str("iceberg"),
        }
    }
}

/// A table as seen by every catalog backend
///
/// `partitions` only round-trips through the Hive metastore; Glue leaves it empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub partitions: Vec<Column>,
    pub metadata_location: String,
    pub format: TableFormat,
}

impl TableInfo {
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        metadata_location: impl Into<String>,
        format: TableFormat,
    ) -> Self {
        Self {
            name: name.into(),
            columns,
            partitions: vec![],
            metadata_location: metadata_location.into(),
            format,
        }
    }

    pub fn with_partitions(mut self, partitions: Vec<Column>) -> Self {
        self.partitions = partitions;
        self
    }

    /// Check that the table can be registered in a catalog
    pub fn validate(&self) -> CatalogResult<()> {
        if self.columns.is_empty() {
            return Err(CatalogError::InvalidTableSpec(format!(
                "cannot create table {} with 0 columns",
                self.name
            )));
        }
        Ok(())
    }
}

/// Tables to drop from one database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSpec {
    pub db: String,
    pub tables: Vec<DropTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTable {
    pub table: String,
    #[serde(default)]
    pub delete_data: bool,
}

impl DropTable {
    pub fn new(table: impl Into<String>, delete_data: bool) -> Self {
        Self {
            table: table.into(),
            delete_data,
        }
    }
}

/// Tables to create in one database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpec {
    pub db: String,
    pub tables: Vec<TableInfo>,
}
