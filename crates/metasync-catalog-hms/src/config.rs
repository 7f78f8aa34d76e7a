//! Settings for the Hive side of a sync: where the metastore lives, how many
//! Thrift connections metasync keeps open and how hard it retries.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CATALOG_NAME: &str = "hive";
pub const DEFAULT_METASTORE_URI: &str = "thrift://localhost:9083";
/// Recorded as the owner of every table metasync creates
pub const DEFAULT_TABLE_OWNER: &str = "metasync";

pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const DEFAULT_CHECKOUT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 600_000;
pub const DEFAULT_MAX_LIFETIME_MS: u64 = 1_800_000;

pub const DEFAULT_CALL_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_MS: u64 = 100;

/// The `hive` section of the metasync configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmsConfig {
    /// Catalog id under which the pool registers this backend
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_owner")]
    pub owner: String,

    #[serde(default)]
    pub connection_pool: HmsConnectionPoolConfig,

    #[serde(default)]
    pub thrift: HmsThriftConfig,
}

impl Default for HmsConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            uri: default_uri(),
            owner: default_owner(),
            connection_pool: HmsConnectionPoolConfig::default(),
            thrift: HmsThriftConfig::default(),
        }
    }
}

/// bb8 pool sizing; all durations are in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmsConnectionPoolConfig {
    /// Must be non-zero
    #[serde(default = "default_pool_size")]
    pub max_size: u32,

    /// `None` opens connections on first use
    #[serde(default)]
    pub min_idle: Option<u32>,

    /// How long a sync step waits for a free connection
    #[serde(default = "default_checkout_timeout")]
    pub connection_timeout_ms: u64,

    #[serde(default = "default_idle_ms")]
    pub idle_timeout_ms: u64,

    /// `None` keeps connections until they fail
    #[serde(default = "default_lifetime")]
    pub max_lifetime_ms: Option<u64>,
}

impl Default for HmsConnectionPoolConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_POOL_SIZE,
            min_idle: None,
            connection_timeout_ms: DEFAULT_CHECKOUT_TIMEOUT_MS,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            max_lifetime_ms: default_lifetime(),
        }
    }
}

impl HmsConnectionPoolConfig {
    pub fn connection_timeout(&self) -> Duration {
        millis(self.connection_timeout_ms)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        Some(millis(self.idle_timeout_ms))
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime_ms.map(millis)
    }
}

/// Per-call deadline and the retry schedule for transport failures
///
/// A call is attempted `max_retries + 1` times; the pause starts at
/// `backoff_ms` and doubles after each failed attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmsThriftConfig {
    #[serde(default = "default_call_timeout")]
    pub timeout_ms: u64,

    #[serde(default = "default_retries")]
    pub max_retries: u32,

    #[serde(default = "default_backoff")]
    pub backoff_ms: u64,
}

impl Default for HmsThriftConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_CALL_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

impl HmsThriftConfig {
    pub fn timeout(&self) -> Duration {
        millis(self.timeout_ms)
    }

    pub fn backoff(&self) -> Duration {
        millis(self.backoff_ms)
    }
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn default_name() -> String {
    DEFAULT_CATALOG_NAME.to_string()
}

fn default_uri() -> String {
    DEFAULT_METASTORE_URI.to_string()
}

fn default_owner() -> String {
    DEFAULT_TABLE_OWNER.to_string()
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_checkout_timeout() -> u64 {
    DEFAULT_CHECKOUT_TIMEOUT_MS
}

fn default_idle_ms() -> u64 {
    DEFAULT_IDLE_TIMEOUT_MS
}

fn default_lifetime() -> Option<u64> {
    Some(DEFAULT_MAX_LIFETIME_MS)
}

fn default_call_timeout() -> u64 {
    DEFAULT_CALL_TIMEOUT_MS
}

fn default_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_backoff() -> u64 {
    DEFAULT_BACKOFF_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HmsConfig::default();
        assert_eq!(
            (config.name.as_str(), config.uri.as_str(), config.owner.as_str()),
            ("hive", "thrift://localhost:9083", "metasync")
        );

        let pool = &config.connection_pool;
        assert_eq!((pool.max_size, pool.min_idle), (10, None));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(30));
        assert_eq!(pool.idle_timeout(), Some(Duration::from_secs(600)));
        assert_eq!(pool.max_lifetime(), Some(Duration::from_secs(1800)));

        let thrift = &config.thrift;
        assert_eq!(thrift.max_retries, 3);
        assert_eq!(thrift.timeout(), Duration::from_secs(60));
        assert_eq!(thrift.backoff(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: HmsConfig = serde_json::from_str(
            r#"{"owner": "etl", "connection_pool": {"max_size": 4, "max_lifetime_ms": null}, "thrift": {"max_retries": 0}}"#,
        )
        .unwrap();

        assert_eq!(config.name, DEFAULT_CATALOG_NAME);
        assert_eq!(config.owner, "etl");
        assert_eq!(config.connection_pool.max_size, 4);
        assert_eq!(config.connection_pool.max_lifetime(), None);
        assert_eq!(
            config.connection_pool.connection_timeout(),
            Duration::from_millis(DEFAULT_CHECKOUT_TIMEOUT_MS)
        );
        assert_eq!(config.thrift.max_retries, 0);
        assert_eq!(config.thrift.timeout_ms, DEFAULT_CALL_TIMEOUT_MS);
        assert_eq!(config.thrift.backoff_ms, DEFAULT_BACKOFF_MS);
    }
}
