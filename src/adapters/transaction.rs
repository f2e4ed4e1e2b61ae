//! Built-in transaction factories
//!
//! - [`JdbcTransactionFactory`] (`JDBC`) commits and rolls back on the connection itself
//! - [`ManagedTransactionFactory`] (`MANAGED`) leaves the lifecycle to a container

use super::traits::{Configurable, Extension, TransactionFactory};
use crate::domain::{BoxError, Properties};

#[derive(Debug, Default)]
pub struct JdbcTransactionFactory {
    skip_set_auto_commit_on_close: bool,
}

impl JdbcTransactionFactory {
    pub fn skip_set_auto_commit_on_close(&self) -> bool {
        self.skip_set_auto_commit_on_close
    }
}

impl Extension for JdbcTransactionFactory {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for JdbcTransactionFactory {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        if let Some(value) = properties.get("skipSetAutoCommitOnClose") {
            self.skip_set_auto_commit_on_close = value.parse()?;
        }
        Ok(())
    }
}

impl TransactionFactory for JdbcTransactionFactory {
    fn closes_connection(&self) -> bool {
        true
    }
}

#[derive(Debug)]
pub struct ManagedTransactionFactory {
    close_connection: bool,
}

impl Default for ManagedTransactionFactory {
    fn default() -> Self {
        Self {
            close_connection: true,
        }
    }
}

impl Extension for ManagedTransactionFactory {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for ManagedTransactionFactory {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        if let Some(value) = properties.get("closeConnection") {
            self.close_connection = value.parse()?;
        }
        Ok(())
    }
}

impl TransactionFactory for ManagedTransactionFactory {
    fn closes_connection(&self) -> bool {
        self.close_connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_close_connection_property() {
        let mut factory = ManagedTransactionFactory::default();
        assert!(factory.closes_connection());

        let props: Properties = [("closeConnection", "false")].into_iter().collect();
        factory.set_properties(props).unwrap();
        assert!(!factory.closes_connection());
    }

    #[test]
    fn test_jdbc_rejects_malformed_flag() {
        let mut factory = JdbcTransactionFactory::default();
        let props: Properties = [("skipSetAutoCommitOnClose", "maybe")].into_iter().collect();
        assert!(factory.set_properties(props).is_err());
    }
}
