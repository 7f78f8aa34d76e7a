//! Translation between the canonical model and native catalog encodings
//!
//! Everything here is a pure function. Both backends share the Parquet and
//! Iceberg rules; they only differ in the URI scheme they expect for S3
//! locations (`s3a://` for Hive, `s3://` for Glue).

use crate::model::{ColumnType, SqlType, TableFormat};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Length assumed for a varchar whose declared length cannot be parsed
pub const DEFAULT_VARCHAR_LENGTH: u32 = 1024;

/// Table parameter holding the live Iceberg metadata pointer
pub const METADATA_LOCATION_PARAM: &str = "metadata_location";

pub const PARQUET_INPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.parquet.MapredParquetInputFormat";
pub const PARQUET_OUTPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.parquet.MapredParquetOutputFormat";
pub const PARQUET_SERDE_LIBRARY: &str = "org.apache.hadoop.hive.ql.io.parquet.serde.ParquetHiveSerDe";

// Class names written by Hive before the Parquet support moved into hive-exec
const LEGACY_PARQUET_INPUT_FORMAT: &str = "parquet.hive.DeprecatedParquetInputFormat";
const LEGACY_PARQUET_OUTPUT_FORMAT: &str = "parquet.hive.DeprecatedParquetOutputFormat";

const ICEBERG_TABLE_TYPE: &str = "ICEBERG";

const S3_SCHEME: &str = "s3://";
const S3A_SCHEME: &str = "s3a://";

/// Catalog backend whose conventions a value is translated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Hive,
    Glue,
}

impl Backend {
    /// URI scheme this backend expects for S3 locations
    pub fn s3_scheme(&self) -> &'static str {
        match self {
            Backend::Hive => S3A_SCHEME,
            Backend::Glue => S3_SCHEME,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Hive => f.write_str("hive"),
            Backend::Glue => f.write_str("glue"),
        }
    }
}

/// Serialization library descriptor of a table format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerDeInfo {
    pub serialization_library: String,
    pub parameters: HashMap<String, String>,
}

/// Parse a native column type (e.g. "varchar(255)", "bigint")
pub fn map_column_type(native: &str) -> ColumnType {
    static VARCHAR_REGEX: OnceLock<Regex> = OnceLock::new();

    if !native.starts_with("varchar") {
        return ColumnType::from(SqlType::from(native));
    }

    let re = VARCHAR_REGEX.get_or_init(|| Regex::new(r"^varchar\((\d+)\)$").unwrap());
    let length = re
        .captures(native)
        .and_then(|captures| captures.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_VARCHAR_LENGTH);

    ColumnType::varchar(length)
}

/// Render a column type in native form
pub fn unmap_column_type(column_type: &ColumnType) -> String {
    match &column_type.sql_type {
        SqlType::Varchar => format!("varchar({})", column_type.length),
        other => other.as_str().to_string(),
    }
}

/// Rewrite the S3 scheme of a location to the one the backend expects
///
/// Locations that are not on S3 are returned unchanged.
pub fn normalize_location_scheme(location: &str, backend: Backend) -> String {
    let (from, to) = match backend {
        Backend::Hive => (S3_SCHEME, S3A_SCHEME),
        Backend::Glue => (S3A_SCHEME, S3_SCHEME),
    };
    match location.strip_prefix(from) {
        Some(rest) => format!("{}{}", to, rest),
        None => location.to_string(),
    }
}

/// Compute the storage location a table is registered with
///
/// Iceberg tables point at the table root, so a location referencing a
/// specific metadata file is cut back to the part before `/metadata/`.
pub fn derive_metadata_location(format: TableFormat, raw_location: &str, backend: Backend) -> String {
    let location = normalize_location_scheme(raw_location, backend);
    match format {
        TableFormat::Parquet => location,
        TableFormat::Iceberg => match location.rfind("/metadata/") {
            Some(idx) => location[..idx].to_string(),
            None => location,
        },
    }
}

/// Check whether a location lives on S3
pub fn is_object_store_location(location: &str) -> bool {
    location.starts_with(S3_SCHEME) || location.starts_with(S3A_SCHEME)
}

/// Split an S3 location into bucket and key prefix
///
/// `s3://bucket/a/b` yields `("bucket", "a/b")`; a bare bucket yields an empty prefix.
pub fn split_bucket_and_key(location: &str) -> (&str, &str) {
    let without_scheme = location
        .strip_prefix(S3_SCHEME)
        .or_else(|| location.strip_prefix(S3A_SCHEME))
        .unwrap_or(location);
    without_scheme
        .split_once('/')
        .unwrap_or((without_scheme, ""))
}

impl TableFormat {
    /// Classify a table from its native input (or output) format class name
    ///
    /// Anything that is not a known Parquet class is treated as Iceberg.
    pub fn from_input_output(class_name: &str) -> TableFormat {
        match class_name {
            PARQUET_INPUT_FORMAT
            | PARQUET_OUTPUT_FORMAT
            | LEGACY_PARQUET_INPUT_FORMAT
            | LEGACY_PARQUET_OUTPUT_FORMAT => TableFormat::Parquet,
            _ => TableFormat::Iceberg,
        }
    }

    pub fn input_format(&self) -> Option<&'static str> {
        match self {
            TableFormat::Parquet => Some(PARQUET_INPUT_FORMAT),
            TableFormat::Iceberg => None,
        }
    }

    pub fn output_format(&self) -> Option<&'static str> {
        match self {
            TableFormat::Parquet => Some(PARQUET_OUTPUT_FORMAT),
            TableFormat::Iceberg => None,
        }
    }

    pub fn serde_info(&self) -> Option<SerDeInfo> {
        match self {
            TableFormat::Parquet => Some(SerDeInfo {
                serialization_library: PARQUET_SERDE_LIBRARY.to_string(),
                parameters: HashMap::from([(
                    "serialization.format".to_string(),
                    "1".to_string(),
                )]),
            }),
            TableFormat::Iceberg => None,
        }
    }

    /// Table parameters for a table stored at `location`
    pub fn parameters(&self, location: &str) -> HashMap<String, String> {
        match self {
            TableFormat::Parquet => HashMap::from([("EXTERNAL".to_string(), "TRUE".to_string())]),
            TableFormat::Iceberg => HashMap::from([
                (METADATA_LOCATION_PARAM.to_string(), location.to_string()),
                ("table_type".to_string(), ICEBERG_TABLE_TYPE.to_string()),
            ]),
        }
    }

    pub fn table_type(&self) -> Option<&'static str> {
        match self {
            TableFormat::Parquet => None,
            TableFormat::Iceberg => Some(ICEBERG_TABLE_TYPE),
        }
    }
}
