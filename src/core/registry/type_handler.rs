//! Type handler registry

use super::types::builtin;
use crate::adapters::type_handlers::PRIMITIVE_HANDLERS;
use crate::adapters::TypeHandler;
use crate::domain::JdbcType;
use indexmap::IndexMap;
use std::sync::Arc;

type HandlersByJdbcType = IndexMap<Option<JdbcType>, Arc<dyn TypeHandler>>;

/// Type handlers indexed by value type and column type
#[derive(Debug)]
pub struct TypeHandlerRegistry {
    by_value_type: IndexMap<String, HandlersByJdbcType>,
    by_name: IndexMap<String, Arc<dyn TypeHandler>>,
    default_enum_handler: String,
}

impl Default for TypeHandlerRegistry {
    fn default() -> Self {
        let mut registry = Self {
            by_value_type: IndexMap::new(),
            by_name: IndexMap::new(),
            default_enum_handler: builtin::ENUM_TYPE_HANDLER.to_string(),
        };
        for handler in PRIMITIVE_HANDLERS {
            registry.register(handler.type_name(), Arc::new(handler.clone()));
        }
        registry
    }
}

impl TypeHandlerRegistry {
    /// Registers a handler for one value type and column type
    pub fn register_for(
        &mut self,
        value_type: &str,
        jdbc_type: Option<JdbcType>,
        name: impl Into<String>,
        handler: Arc<dyn TypeHandler>,
    ) {
        self.by_value_type
            .entry(value_type.to_string())
            .or_default()
            .insert(jdbc_type, Arc::clone(&handler));
        self.by_name.insert(name.into(), handler);
    }

    /// Registers a handler for a value type, using the column types it declares
    pub fn register_for_value_type(
        &mut self,
        value_type: &str,
        name: impl Into<String>,
        handler: Arc<dyn TypeHandler>,
    ) {
        let name = name.into();
        let jdbc_types = handler.jdbc_types();
        if jdbc_types.is_empty() {
            self.register_for(value_type, None, name, handler);
        } else {
            for jdbc_type in jdbc_types {
                self.register_for(value_type, Some(jdbc_type), name.clone(), Arc::clone(&handler));
            }
        }
    }

    /// Registers a handler under the value types it declares
    ///
    /// A handler that declares no value types is only reachable by name.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn TypeHandler>) {
        let name = name.into();
        let value_types = handler.handled_types();
        if value_types.is_empty() {
            self.by_name.insert(name, handler);
            return;
        }
        for value_type in value_types {
            self.register_for_value_type(&value_type, name.clone(), Arc::clone(&handler));
        }
    }

    /// Looks up the handler for a value type and optional column type
    ///
    /// Falls back to the handler registered without a column type, then to the
    /// only handler of the value type if there is exactly one.
    pub fn handler(
        &self,
        value_type: &str,
        jdbc_type: Option<JdbcType>,
    ) -> Option<&Arc<dyn TypeHandler>> {
        let handlers = self.by_value_type.get(value_type)?;
        handlers
            .get(&jdbc_type)
            .or_else(|| handlers.get(&None))
            .or_else(|| match handlers.len() {
                1 => handlers.values().next(),
                _ => None,
            })
    }

    pub fn has_handler(&self, value_type: &str) -> bool {
        self.by_value_type.contains_key(value_type)
    }

    /// Looks up a handler by its registered type name
    pub fn handler_by_name(&self, name: &str) -> Option<&Arc<dyn TypeHandler>> {
        self.by_name.get(name)
    }

    pub fn default_enum_handler(&self) -> &str {
        &self.default_enum_handler
    }

    pub fn set_default_enum_handler(&mut self, name: impl Into<String>) {
        self.default_enum_handler = name.into();
    }

    /// Number of distinct registered handlers
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::type_handlers::EnumOrdinalTypeHandler;
    use crate::adapters::Extension;

    #[derive(Debug)]
    struct Trimmed;

    impl Extension for Trimmed {}

    impl TypeHandler for Trimmed {
        fn handled_types(&self) -> Vec<String> {
            vec!["String".to_string()]
        }

        fn jdbc_types(&self) -> Vec<JdbcType> {
            vec![JdbcType::Char]
        }
    }

    #[test]
    fn test_primitives_are_builtin() {
        let registry = TypeHandlerRegistry::default();
        for value_type in ["String", "bool", "i16", "i32", "i64", "f32", "f64"] {
            assert!(registry.has_handler(value_type), "{value_type}");
        }
        assert_eq!(registry.default_enum_handler(), builtin::ENUM_TYPE_HANDLER);
    }

    #[test]
    fn test_lookup_by_jdbc_type_with_fallback() {
        let mut registry = TypeHandlerRegistry::default();
        registry.register("blog::Trimmed", Arc::new(Trimmed));

        let char_handler = registry.handler("String", Some(JdbcType::Char)).unwrap();
        assert_eq!(char_handler.jdbc_types(), vec![JdbcType::Char]);

        let default_handler = registry.handler("String", Some(JdbcType::Varchar)).unwrap();
        assert!(default_handler.jdbc_types().is_empty());
    }

    #[test]
    fn test_explicit_value_type() {
        let mut registry = TypeHandlerRegistry::default();
        registry.register_for_value_type(
            "blog::Status",
            builtin::ENUM_ORDINAL_TYPE_HANDLER,
            Arc::new(EnumOrdinalTypeHandler),
        );

        assert!(registry.handler("blog::Status", Some(JdbcType::Integer)).is_some());
        assert!(registry.handler("blog::Status", None).is_some());
        assert!(registry.handler_by_name(builtin::ENUM_ORDINAL_TYPE_HANDLER).is_some());
    }
}
