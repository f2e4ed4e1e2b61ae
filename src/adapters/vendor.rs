//! Vendor database id provider (`DB_VENDOR`)
//!
//! Maps the product name reported by the active connection source to a short
//! database id. Without properties the product name itself is the id; with
//! properties, the first property whose key occurs in the product name wins.

use super::traits::{Configurable, DataSource, DatabaseIdProvider, Extension};
use crate::domain::{BoxError, Properties};

#[derive(Debug, Default)]
pub struct VendorDatabaseIdProvider {
    properties: Properties,
}

impl Extension for VendorDatabaseIdProvider {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for VendorDatabaseIdProvider {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        self.properties = properties;
        Ok(())
    }
}

impl DatabaseIdProvider for VendorDatabaseIdProvider {
    fn database_id(&self, data_source: &dyn DataSource) -> Result<Option<String>, BoxError> {
        let product_name = data_source.database_product_name()?;
        if self.properties.is_empty() {
            return Ok(Some(product_name));
        }

        Ok(self
            .properties
            .iter()
            .find(|(key, _)| product_name.contains(key))
            .map(|(_, id)| id.to_string()))
    }
}
