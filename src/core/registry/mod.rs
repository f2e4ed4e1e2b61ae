//! Registries consulted while assembling a configuration
//!
//! - [`TypeRegistry`] - every type the document may name, registered up front
//! - [`TypeAliasRegistry`] - case-insensitive short names
//! - [`ExtensionResolver`] - alias-first resolution and instantiation
//! - [`TypeHandlerRegistry`] - type handlers by value and column type
//! - [`MapperRegistry`] - mapper types

pub mod alias;
pub mod mapper;
pub mod resolver;
pub mod type_handler;
pub mod types;

pub use alias::TypeAliasRegistry;
pub use mapper::MapperRegistry;
pub use resolver::{instantiate_descriptor, ExtensionResolver};
pub use type_handler::TypeHandlerRegistry;
pub use types::{builtin, ExtensionType, Factory, TypeDescriptor, TypeKind, TypeRegistry};
