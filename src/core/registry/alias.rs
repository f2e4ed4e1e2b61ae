//! Case-insensitive alias table

use super::types::{builtin, TypeDescriptor, TypeKind, TypeRegistry};
use crate::domain::{BuildError, Result};
use indexmap::IndexMap;

/// Aliases present in every configuration
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("JDBC", builtin::JDBC_TRANSACTION),
    ("MANAGED", builtin::MANAGED_TRANSACTION),
    ("POOLED", builtin::POOLED_DATA_SOURCE),
    ("UNPOOLED", builtin::UNPOOLED_DATA_SOURCE),
    ("DB_VENDOR", builtin::VENDOR_DATABASE_ID),
    ("XML", builtin::XML_LANGUAGE_DRIVER),
    ("RAW", builtin::RAW_LANGUAGE_DRIVER),
    ("TRACING", builtin::TRACING_LOG),
    ("STDOUT_LOGGING", builtin::STDOUT_LOG),
    ("NO_LOGGING", builtin::NO_LOG),
    ("string", "String"),
    ("byte", "i8"),
    ("short", "i16"),
    ("int", "i32"),
    ("integer", "i32"),
    ("long", "i64"),
    ("float", "f32"),
    ("double", "f64"),
    ("boolean", "bool"),
    ("map", "HashMap"),
    ("list", "Vec"),
];

/// Maps lower-cased aliases to fully-qualified type names
#[derive(Debug, Clone, Default)]
pub struct TypeAliasRegistry {
    aliases: IndexMap<String, String>,
}

impl TypeAliasRegistry {
    /// Creates an alias table seeded with the built-in aliases
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for (alias, type_name) in BUILTIN_ALIASES {
            registry
                .aliases
                .insert(alias.to_lowercase(), type_name.to_string());
        }
        registry
    }

    /// Binds `alias` to `type_name`
    ///
    /// Re-binding an alias to the same type is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::AliasConflict`] if the alias is bound to another type.
    pub fn register_alias(&mut self, alias: &str, type_name: &str) -> Result<()> {
        let key = alias.to_lowercase();
        match self.aliases.get(&key) {
            Some(existing) if existing != type_name => Err(BuildError::AliasConflict {
                alias: alias.to_string(),
                existing: existing.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.aliases.insert(key, type_name.to_string());
                Ok(())
            }
        }
    }

    /// Registers a type under its declared alias, or its simple name
    pub fn register_type(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        let alias = descriptor.alias().unwrap_or_else(|| descriptor.simple_name());
        self.register_alias(alias, descriptor.name())
    }

    /// Registers every non-mapper type of `package` and its sub-packages
    ///
    /// Returns the number of types registered.
    pub fn register_package(&mut self, types: &TypeRegistry, package: &str) -> Result<usize> {
        let mut count = 0;
        for descriptor in types.in_package(package) {
            if matches!(descriptor.kind(), TypeKind::Mapper) {
                continue;
            }
            self.register_type(descriptor)?;
            count += 1;
        }
        Ok(count)
    }

    /// Returns the type name bound to `alias`
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(&alias.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
