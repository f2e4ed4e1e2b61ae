//! Pooled connection source (`POOLED`)

use super::unpooled::UnpooledDataSource;
use crate::adapters::traits::{Configurable, DataSource, DataSourceFactory, Extension};
use crate::domain::{BoxError, Properties};
use std::sync::Arc;

/// Pool sizing and health-check settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub maximum_active_connections: u32,
    pub maximum_idle_connections: u32,
    pub maximum_checkout_time_ms: u64,
    pub time_to_wait_ms: u64,
    pub maximum_local_bad_connection_tolerance: u32,
    pub ping_query: String,
    pub ping_enabled: bool,
    pub ping_connections_not_used_for_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            maximum_active_connections: 10,
            maximum_idle_connections: 5,
            maximum_checkout_time_ms: 20_000,
            time_to_wait_ms: 20_000,
            maximum_local_bad_connection_tolerance: 3,
            ping_query: "NO PING QUERY SET".to_string(),
            ping_enabled: false,
            ping_connections_not_used_for_ms: 0,
        }
    }
}

impl PoolSettings {
    fn apply_property(&mut self, key: &str, value: &str) -> Result<bool, BoxError> {
        match key {
            "poolMaximumActiveConnections" => self.maximum_active_connections = value.parse()?,
            "poolMaximumIdleConnections" => self.maximum_idle_connections = value.parse()?,
            "poolMaximumCheckoutTime" => self.maximum_checkout_time_ms = value.parse()?,
            "poolTimeToWait" => self.time_to_wait_ms = value.parse()?,
            "poolMaximumLocalBadConnectionTolerance" => {
                self.maximum_local_bad_connection_tolerance = value.parse()?
            }
            "poolPingQuery" => self.ping_query = value.to_string(),
            "poolPingEnabled" => self.ping_enabled = value.parse()?,
            "poolPingConnectionsNotUsedFor" => {
                self.ping_connections_not_used_for_ms = value.parse()?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Connection source that recycles connections through a bounded pool
///
/// The pool is sized lazily; no connection is opened until the engine asks for one.
#[derive(Debug, Clone, Default)]
pub struct PooledDataSource {
    pub connection: UnpooledDataSource,
    pub pool: PoolSettings,
}

impl DataSource for PooledDataSource {
    fn url(&self) -> Option<&str> {
        self.connection.url()
    }

    fn database_product_name(&self) -> Result<String, BoxError> {
        self.connection.database_product_name()
    }
}

#[derive(Debug, Default)]
pub struct PooledDataSourceFactory {
    data_source: PooledDataSource,
}

impl PooledDataSourceFactory {
    pub fn pool(&self) -> &PoolSettings {
        &self.data_source.pool
    }
}

impl Extension for PooledDataSourceFactory {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for PooledDataSourceFactory {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        for (key, value) in properties.iter() {
            let known = self.data_source.pool.apply_property(key, value)?
                || self.data_source.connection.apply_property(key, value)?;
            if !known {
                return Err(format!("Unknown DataSource property: {key}").into());
            }
        }
        Ok(())
    }
}

impl DataSourceFactory for PooledDataSourceFactory {
    fn data_source(&self) -> Result<Arc<dyn DataSource>, BoxError> {
        Ok(Arc::new(self.data_source.clone()))
    }
}
