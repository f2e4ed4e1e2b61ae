//! Unpooled connection source (`UNPOOLED`)

use crate::adapters::traits::{Configurable, DataSource, DataSourceFactory, Extension};
use crate::config::{password, Password};
use crate::domain::{BoxError, Properties};
use std::sync::Arc;
use url::Url;

/// Prefix of properties forwarded verbatim to the driver
pub const DRIVER_PROPERTY_PREFIX: &str = "driver.";

/// Known database products, keyed by URL scheme
const PRODUCT_NAMES: &[(&str, &str)] = &[
    ("postgres", "PostgreSQL"),
    ("postgresql", "PostgreSQL"),
    ("mysql", "MySQL"),
    ("mariadb", "MariaDB"),
    ("sqlite", "SQLite"),
    ("h2", "H2"),
    ("hsqldb", "HSQL Database Engine"),
    ("derby", "Apache Derby"),
    ("oracle", "Oracle"),
    ("sqlserver", "Microsoft SQL Server"),
    ("mssql", "Microsoft SQL Server"),
    ("db2", "DB2"),
];

/// Connection settings of a data source that opens a fresh connection per request
#[derive(Debug, Clone, Default)]
pub struct UnpooledDataSource {
    pub driver: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<Password>,
    pub auto_commit: Option<bool>,
    pub default_transaction_isolation_level: Option<i32>,
    pub default_network_timeout: Option<i32>,
    pub driver_properties: Properties,
}

impl UnpooledDataSource {
    /// Applies one property, returning `false` if the key is not a connection setting
    pub(crate) fn apply_property(&mut self, key: &str, value: &str) -> Result<bool, BoxError> {
        if let Some(name) = key.strip_prefix(DRIVER_PROPERTY_PREFIX) {
            self.driver_properties.insert(name, value);
            return Ok(true);
        }
        match key {
            "driver" => self.driver = Some(value.to_string()),
            "url" => self.url = Some(value.to_string()),
            "username" => self.username = Some(value.to_string()),
            "password" => self.password = Some(password(value)),
            "autoCommit" => self.auto_commit = Some(value.parse()?),
            "defaultTransactionIsolationLevel" => {
                self.default_transaction_isolation_level = Some(value.parse()?)
            }
            "defaultNetworkTimeout" => self.default_network_timeout = Some(value.parse()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl DataSource for UnpooledDataSource {
    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn database_product_name(&self) -> Result<String, BoxError> {
        let url = self
            .url
            .as_deref()
            .ok_or("data source has no url property")?;
        product_name_from_url(url)
    }
}

/// Derives a database product name from a connection URL
///
/// An optional `jdbc:` prefix is ignored. Unknown schemes yield the scheme itself.
pub fn product_name_from_url(url: &str) -> Result<String, BoxError> {
    let stripped = url.strip_prefix("jdbc:").unwrap_or(url);
    let scheme = match Url::parse(stripped) {
        Ok(parsed) => parsed.scheme().to_string(),
        Err(_) => stripped
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .filter(|scheme| !scheme.is_empty())
            .ok_or_else(|| format!("cannot determine database product from url '{url}'"))?,
    };

    Ok(PRODUCT_NAMES
        .iter()
        .find(|(known, _)| *known == scheme)
        .map(|(_, product)| product.to_string())
        .unwrap_or(scheme))
}

#[derive(Debug, Default)]
pub struct UnpooledDataSourceFactory {
    data_source: UnpooledDataSource,
}

impl Extension for UnpooledDataSourceFactory {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for UnpooledDataSourceFactory {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        for (key, value) in properties.iter() {
            if !self.data_source.apply_property(key, value)? {
                return Err(format!("Unknown DataSource property: {key}").into());
            }
        }
        Ok(())
    }
}

impl DataSourceFactory for UnpooledDataSourceFactory {
    fn data_source(&self) -> Result<Arc<dyn DataSource>, BoxError> {
        Ok(Arc::new(self.data_source.clone()))
    }
}
