//! S3 deleter configuration

use serde::{Deserialize, Serialize};

/// S3 client settings used by the deleter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3DeleterConfig {
    /// Optional endpoint override (e.g. LocalStack/MinIO)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Operation timeout in milliseconds, including SDK retries
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Retries after the initial attempt
    #[serde(default)]
    pub max_retries: Option<u32>,
}
