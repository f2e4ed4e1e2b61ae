//! Extension points and their built-in implementations.
//!
//! This module provides the pluggable side of configuration assembly:
//!
//! - [`traits`] - the extension traits ([`Interceptor`], [`DataSourceFactory`], ...)
//! - [`transaction`] - `JDBC` and `MANAGED` transaction factories
//! - [`datasource`] - `UNPOOLED` and `POOLED` connection sources
//! - [`vendor`] - the `DB_VENDOR` database id provider
//! - [`reflection`] - default object, wrapper and reflector factories
//! - [`type_handlers`] - built-in type handlers
//! - [`resource`] - resource resolution by name or URL
//!
//! # Design Pattern
//!
//! Extensions are named in the configuration document and constructed through
//! factories registered in a [`TypeRegistry`](crate::core::registry::TypeRegistry).
//! An extension that accepts `property` children opts in by returning itself
//! from [`Extension::as_configurable`]:
//!
//! ```rust
//! use sqlmap::adapters::{Configurable, Extension, Interceptor};
//! use sqlmap::domain::{BoxError, Properties};
//!
//! #[derive(Debug, Default)]
//! struct AuditPlugin {
//!     level: String,
//! }
//!
//! impl Extension for AuditPlugin {
//!     fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
//!         Some(self)
//!     }
//! }
//!
//! impl Configurable for AuditPlugin {
//!     fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
//!         self.level = properties.get("level").unwrap_or("basic").to_string();
//!         Ok(())
//!     }
//! }
//!
//! impl Interceptor for AuditPlugin {
//!     fn intercepts(&self, target: &str) -> bool {
//!         target == "Executor"
//!     }
//! }
//! ```

pub mod datasource;
pub mod reflection;
pub mod resource;
pub mod traits;
pub mod transaction;
pub mod type_handlers;
pub mod vendor;

pub use resource::{FileSystemLoader, Resources};
pub use traits::{
    Configurable, DataSource, DataSourceFactory, DatabaseIdProvider, Extension, Interceptor,
    MapperLoader, ObjectFactory, ObjectWrapperFactory, ReflectorFactory, ResourceLoader,
    TransactionFactory, TypeHandler,
};
