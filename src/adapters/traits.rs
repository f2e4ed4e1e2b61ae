//! Extension point traits
//!
//! This module defines the traits that pluggable components must implement to
//! be installed into a [`Configuration`]. Implementations are registered by
//! name in a [`TypeRegistry`](crate::core::registry::TypeRegistry) and
//! instantiated while the configuration document is assembled.

use crate::core::configuration::Configuration;
use crate::domain::{BoxError, JdbcType, Properties};
use std::fmt::Debug;
use std::sync::Arc;

/// Property injection capability
///
/// Extensions that accept the `property` children of their declaring node
/// implement this trait and return themselves from
/// [`Extension::as_configurable`].
pub trait Configurable {
    /// Receives the declared properties, rejecting ones it does not understand
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError>;
}

/// Common base of every extension trait
pub trait Extension {
    /// Returns the property injection capability, if this extension has one
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        None
    }
}

/// Plugin that wraps one or more engine components
pub trait Interceptor: Extension + Debug + Send + Sync {
    /// Whether this interceptor wraps the named component (for example `Executor`)
    fn intercepts(&self, target: &str) -> bool;
}

/// Creates result objects
pub trait ObjectFactory: Extension + Debug + Send + Sync {
    /// Whether the named type is a collection type
    fn is_collection(&self, type_name: &str) -> bool;
}

/// Supplies custom object wrappers
pub trait ObjectWrapperFactory: Extension + Debug + Send + Sync {
    /// Whether a custom wrapper exists for the named type
    fn has_wrapper_for(&self, type_name: &str) -> bool;
}

/// Creates and caches type metadata
pub trait ReflectorFactory: Extension + Debug + Send + Sync {
    fn is_class_cache_enabled(&self) -> bool;
}

/// Transaction strategy of an environment
pub trait TransactionFactory: Extension + Debug + Send + Sync {
    /// Whether transactions created by this factory close their connection
    fn closes_connection(&self) -> bool;
}

/// Connection source of an environment
pub trait DataSource: Debug + Send + Sync {
    /// Connection URL, if one is configured
    fn url(&self) -> Option<&str>;

    /// Product name of the database behind this source
    fn database_product_name(&self) -> Result<String, BoxError>;
}

/// Builds the connection source of an environment
pub trait DataSourceFactory: Extension + Debug + Send + Sync {
    fn data_source(&self) -> Result<Arc<dyn DataSource>, BoxError>;
}

/// Derives the vendor-identifying database id from a connection source
pub trait DatabaseIdProvider: Extension + Debug + Send + Sync {
    fn database_id(&self, data_source: &dyn DataSource) -> Result<Option<String>, BoxError>;
}

/// Converts between a value type and a column type
pub trait TypeHandler: Extension + Debug + Send + Sync {
    /// Value types this handler declares it maps
    fn handled_types(&self) -> Vec<String> {
        Vec::new()
    }

    /// Column types this handler declares it maps
    fn jdbc_types(&self) -> Vec<JdbcType> {
        Vec::new()
    }
}

/// Resolves named resources to bytes
pub trait ResourceLoader: Extension + Debug + Send + Sync {
    /// Loads a resource, returning `None` when this loader does not know it
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BoxError>;
}

/// Parses a mapper document and registers its contents
///
/// Called once per resource- or url-based mapper reference with the raw
/// document bytes. The loader registers statements and SQL fragments directly
/// into the configuration (see [`Configuration::sql_fragments_mut`]).
pub trait MapperLoader {
    fn load(
        &self,
        source: &[u8],
        resource: &str,
        configuration: &mut Configuration,
    ) -> Result<(), BoxError>;
}
