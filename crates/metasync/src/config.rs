//! YAML configuration for metasync

use metasync_catalog_glue::GlueConfig;
use metasync_catalog_hms::HmsConfig;
use metasync_storage_s3::S3DeleterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration file
///
/// ```yaml
/// hive:
///   uri: thrift://metastore:9083
/// aws:
///   region: eu-west-1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetasyncConfig {
    #[serde(default)]
    pub hive: HmsConfig,

    #[serde(default)]
    pub glue: GlueConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub s3: S3DeleterConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// AWS region; the SDK's default resolution applies when unset
    #[serde(default)]
    pub region: Option<String>,
}

impl MetasyncConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MetasyncConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hive.connection_pool.max_size == 0 {
            return Err(ConfigError::Invalid(
                "hive.connection_pool.max_size must be greater than 0".to_string(),
            ));
        }
        if matches!(&self.aws.region, Some(region) if region.trim().is_empty()) {
            return Err(ConfigError::Invalid("aws.region must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "hive:\n  uri: thrift://metastore:9083\naws:\n  region: eu-west-1"
        )
        .unwrap();

        let config = MetasyncConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.hive.uri, "thrift://metastore:9083");
        assert_eq!(config.hive.name, "hive");
        assert_eq!(config.hive.owner, "metasync");
        assert_eq!(config.hive.connection_pool.max_size, 10);
        assert_eq!(config.glue.name, "glue");
        assert_eq!(config.aws.region.as_deref(), Some("eu-west-1"));
        assert!(config.s3.endpoint.is_none());
    }

    #[test]
    fn test_empty_document() {
        let config = MetasyncConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.hive.uri, "thrift://localhost:9083");
        assert!(config.aws.region.is_none());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MetasyncConfig::from_yaml_file(dir.path().join("metasync.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            MetasyncConfig::from_yaml_str("aws:\n  region: ''"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            MetasyncConfig::from_yaml_str("hive:\n  connection_pool:\n    max_size: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            MetasyncConfig::from_yaml_str("s3: [1, 2]"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_database_section_is_ignored() {
        let config = MetasyncConfig::from_yaml_str(
            "db:\n  host: metastore-db\n  port: 0\n  password: secret\nhive:\n  name: hms",
        )
        .unwrap();
        assert_eq!(config.hive.name, "hms");

        let value = serde_json::to_value(&config).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["aws", "glue", "hive", "s3"]);
    }
}
