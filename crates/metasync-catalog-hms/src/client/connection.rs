//! Connection pooling for HMS clients

use super::{HiveClient, HiveConnector};
use crate::config::HmsConfig;
use crate::error::{HmsError, HmsResult};
use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use std::sync::Arc;
use tracing::{debug, info};

/// Connection pool manager for HMS clients
pub struct HmsConnectionManager {
    config: HmsConfig,
    connector: Arc<dyn HiveConnector>,
}

impl HmsConnectionManager {
    /// Create a new connection manager
    pub fn new(config: HmsConfig, connector: Arc<dyn HiveConnector>) -> Self {
        Self { config, connector }
    }
}

#[async_trait]
impl bb8::ManageConnection for HmsConnectionManager {
    type Connection = Box<dyn HiveClient>;
    type Error = HmsError;

    async fn connect(&self) -> Result<Self::Connection, Self::Error> {
        debug!("Opening HMS connection to {}", self.config.uri);
        self.connector.connect(&self.config).await
    }

    async fn is_valid(&self, conn: &mut Self::Connection) -> Result<(), Self::Error> {
        if conn.is_open() {
            Ok(())
        } else {
            Err(HmsError::ThriftTransport("connection closed".to_string()))
        }
    }

    fn has_broken(&self, conn: &mut Self::Connection) -> bool {
        !conn.is_open()
    }
}

/// HMS connection pool
pub struct HmsConnectionPool {
    pool: Pool<HmsConnectionManager>,
    config: HmsConfig,
}

impl HmsConnectionPool {
    /// Create a new connection pool
    pub async fn new(config: HmsConfig, connector: Arc<dyn HiveConnector>) -> HmsResult<Self> {
        info!(
            "Creating HMS connection pool with max_size={}",
            config.connection_pool.max_size
        );

        let manager = HmsConnectionManager::new(config.clone(), connector);

        let pool = Pool::builder()
            .max_size(config.connection_pool.max_size)
            .min_idle(config.connection_pool.min_idle)
            .connection_timeout(config.connection_pool.connection_timeout())
            .idle_timeout(config.connection_pool.idle_timeout())
            .max_lifetime(config.connection_pool.max_lifetime())
            .build(manager)
            .await
            .map_err(|e| HmsError::ConnectionPool(e.to_string()))?;

        Ok(Self { pool, config })
    }

    /// Get a connection from the pool
    pub async fn get(&self) -> HmsResult<PooledConnection<'_, HmsConnectionManager>> {
        self.pool.get().await.map_err(|e| match e {
            bb8::RunError::User(err) => err,
            bb8::RunError::TimedOut => {
                HmsError::ConnectionPool("timed out waiting for a connection".to_string())
            }
        })
    }

    /// Get pool state information
    pub fn state(&self) -> PoolState {
        let state = self.pool.state();
        PoolState {
            connections: state.connections,
            idle_connections: state.idle_connections,
            max_size: self.config.connection_pool.max_size,
        }
    }
}

/// Pool state information
#[derive(Debug, Clone, Copy)]
pub struct PoolState {
    /// Total number of connections in the pool
    pub connections: u32,

    /// Number of idle connections
    pub idle_connections: u32,

    /// Maximum pool size
    pub max_size: u32,
}

impl std::fmt::Display for PoolState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "connections={}/{}, idle={}",
            self.connections, self.max_size, self.idle_connections
        )
    }
}
