//! Extension resolution and instantiation

use super::alias::TypeAliasRegistry;
use super::types::{ExtensionType, TypeDescriptor, TypeKind, TypeRegistry};
use crate::domain::{BuildError, LogImpl, Properties, Result};

/// Resolves document type names against the alias table and the type registry
#[derive(Debug, Clone, Copy)]
pub struct ExtensionResolver<'a> {
    types: &'a TypeRegistry,
    aliases: &'a TypeAliasRegistry,
}

impl<'a> ExtensionResolver<'a> {
    pub fn new(types: &'a TypeRegistry, aliases: &'a TypeAliasRegistry) -> Self {
        Self { types, aliases }
    }

    /// Resolves an alias or a fully-qualified name; aliases win
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnresolvedType`] if nothing matches.
    pub fn resolve(&self, name: &str) -> Result<&'a TypeDescriptor> {
        let target = self.aliases.resolve(name).unwrap_or(name);
        self.types
            .get(target)
            .ok_or_else(|| BuildError::UnresolvedType {
                name: name.to_string(),
            })
    }

    /// Resolves a fully-qualified name without consulting aliases
    pub fn resolve_class(&self, name: &str) -> Result<&'a TypeDescriptor> {
        self.types
            .get(name)
            .ok_or_else(|| BuildError::UnresolvedType {
                name: name.to_string(),
            })
    }

    /// Resolves `name` and builds an instance of extension type `T`
    ///
    /// `properties` are injected if the instance is [`Configurable`](crate::adapters::Configurable).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnresolvedType`] for unknown names and
    /// [`BuildError::Instantiation`] if the type has the wrong kind, its
    /// factory fails or it rejects the properties.
    pub fn instantiate<T>(&self, name: &str, properties: Properties) -> Result<Box<T>>
    where
        T: ExtensionType + ?Sized,
    {
        let descriptor = self.resolve(name)?;
        instantiate_descriptor(descriptor, properties)
    }

    /// Resolves `name` to a logging implementation
    pub fn log_impl(&self, name: &str) -> Result<LogImpl> {
        let descriptor = self.resolve(name)?;
        match descriptor.kind() {
            TypeKind::Log(log) => Ok(*log),
            other => Err(BuildError::instantiation(
                descriptor.name(),
                format!("expected a log implementation, found a {}", other.label()),
            )),
        }
    }
}

/// Builds an instance of extension type `T` from an already resolved descriptor
pub fn instantiate_descriptor<T>(descriptor: &TypeDescriptor, properties: Properties) -> Result<Box<T>>
where
    T: ExtensionType + ?Sized,
{
    let factory = T::factory(descriptor.kind()).ok_or_else(|| {
        BuildError::instantiation(
            descriptor.name(),
            format!(
                "expected a {}, found a {}",
                T::LABEL,
                descriptor.kind().label()
            ),
        )
    })?;

    let mut instance = factory().map_err(|e| BuildError::instantiation(descriptor.name(), e))?;

    match instance.as_configurable() {
        Some(configurable) => configurable
            .set_properties(properties)
            .map_err(|e| BuildError::instantiation(descriptor.name(), e))?,
        None if !properties.is_empty() => {
            tracing::debug!(
                type_name = descriptor.name(),
                ignored = properties.len(),
                "Type does not accept properties, ignoring them"
            );
        }
        None => {}
    }

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{DataSourceFactory, TransactionFactory};
    use crate::core::registry::types::builtin;

    fn registries() -> (TypeRegistry, TypeAliasRegistry) {
        (TypeRegistry::with_builtins(), TypeAliasRegistry::with_builtins())
    }

    #[test]
    fn test_alias_takes_priority() {
        let (mut types, mut aliases) = registries();
        types
            .register(TypeDescriptor::value("Author"))
            .register(TypeDescriptor::value("blog::Author"));
        aliases.register_alias("Author", "blog::Author").unwrap();

        let resolver = ExtensionResolver::new(&types, &aliases);
        assert_eq!(resolver.resolve("Author").unwrap().name(), "blog::Author");
        assert_eq!(resolver.resolve_class("Author").unwrap().name(), "Author");
    }

    #[test]
    fn test_unresolved_type() {
        let (types, aliases) = registries();
        let resolver = ExtensionResolver::new(&types, &aliases);
        let err = resolver.resolve("blog::Missing").unwrap_err();
        assert!(matches!(err, BuildError::UnresolvedType { name } if name == "blog::Missing"));
    }

    #[test]
    fn test_instantiate_applies_properties() {
        let (types, aliases) = registries();
        let resolver = ExtensionResolver::new(&types, &aliases);
        let props: Properties = [("closeConnection", "false")].into_iter().collect();

        let factory = resolver
            .instantiate::<dyn TransactionFactory>("MANAGED", props)
            .unwrap();
        assert!(!factory.closes_connection());
    }

    #[test]
    fn test_instantiate_wrong_kind() {
        let (types, aliases) = registries();
        let resolver = ExtensionResolver::new(&types, &aliases);
        let err = resolver
            .instantiate::<dyn DataSourceFactory>("JDBC", Properties::new())
            .unwrap_err();
        assert!(matches!(err, BuildError::Instantiation { ref type_name, .. } if type_name == builtin::JDBC_TRANSACTION));
        assert!(err.to_string().contains("expected a data source factory"));
    }

    #[test]
    fn test_rejected_property_is_instantiation_error() {
        let (types, aliases) = registries();
        let resolver = ExtensionResolver::new(&types, &aliases);
        let props: Properties = [("bogus", "1")].into_iter().collect();
        let err = resolver
            .instantiate::<dyn DataSourceFactory>("UNPOOLED", props)
            .unwrap_err();
        assert!(err.to_string().contains("Unknown DataSource property: bogus"));
    }

    #[test]
    fn test_log_impl() {
        let (types, aliases) = registries();
        let resolver = ExtensionResolver::new(&types, &aliases);
        assert_eq!(resolver.log_impl("STDOUT_LOGGING").unwrap(), LogImpl::Stdout);
        assert!(resolver.log_impl("JDBC").is_err());
    }
}
