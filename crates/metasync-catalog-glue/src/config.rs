//! Configuration for Glue catalog provider

use serde::{Deserialize, Serialize};

/// Configuration for Glue catalog provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlueConfig {
    /// Catalog name
    #[serde(default = "default_name")]
    pub name: String,

    /// Glue catalog id (the AWS account id); the caller's account when unset
    #[serde(default)]
    pub catalog_id: Option<String>,

    /// Optional endpoint override (e.g. LocalStack)
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Default for GlueConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            catalog_id: None,
            endpoint: None,
        }
    }
}

fn default_name() -> String {
    "glue".to_string()
}
