//! Type registry
//!
//! Every type the configuration document can name must be registered here by
//! the embedding application before the build runs. A [`TypeDescriptor`]
//! pairs a fully-qualified name with its [`TypeKind`]; extension kinds carry a
//! factory that constructs a fresh instance.

use crate::adapters::datasource::{PooledDataSourceFactory, UnpooledDataSourceFactory};
use crate::adapters::reflection::{
    DefaultObjectFactory, DefaultObjectWrapperFactory, DefaultReflectorFactory,
};
use crate::adapters::resource::FileSystemLoader;
use crate::adapters::transaction::{JdbcTransactionFactory, ManagedTransactionFactory};
use crate::adapters::type_handlers::{EnumOrdinalTypeHandler, EnumTypeHandler};
use crate::adapters::vendor::VendorDatabaseIdProvider;
use crate::adapters::{
    DataSourceFactory, DatabaseIdProvider, Extension, Interceptor, ObjectFactory,
    ObjectWrapperFactory, ReflectorFactory, ResourceLoader, TransactionFactory, TypeHandler,
};
use crate::domain::{BoxError, LogImpl};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Fallible constructor of an extension instance
pub type Factory<T> = Arc<dyn Fn() -> Result<Box<T>, BoxError> + Send + Sync>;

/// Names of the built-in types
pub mod builtin {
    pub const JDBC_TRANSACTION: &str = "sqlmap::adapters::transaction::JdbcTransactionFactory";
    pub const MANAGED_TRANSACTION: &str =
        "sqlmap::adapters::transaction::ManagedTransactionFactory";
    pub const UNPOOLED_DATA_SOURCE: &str =
        "sqlmap::adapters::datasource::UnpooledDataSourceFactory";
    pub const POOLED_DATA_SOURCE: &str = "sqlmap::adapters::datasource::PooledDataSourceFactory";
    pub const VENDOR_DATABASE_ID: &str = "sqlmap::adapters::vendor::VendorDatabaseIdProvider";
    pub const DEFAULT_OBJECT_FACTORY: &str = "sqlmap::adapters::reflection::DefaultObjectFactory";
    pub const DEFAULT_OBJECT_WRAPPER_FACTORY: &str =
        "sqlmap::adapters::reflection::DefaultObjectWrapperFactory";
    pub const DEFAULT_REFLECTOR_FACTORY: &str =
        "sqlmap::adapters::reflection::DefaultReflectorFactory";
    pub const ENUM_TYPE_HANDLER: &str = "sqlmap::adapters::type_handlers::EnumTypeHandler";
    pub const ENUM_ORDINAL_TYPE_HANDLER: &str =
        "sqlmap::adapters::type_handlers::EnumOrdinalTypeHandler";
    pub const FILE_SYSTEM_LOADER: &str = "sqlmap::adapters::resource::FileSystemLoader";
    pub const XML_LANGUAGE_DRIVER: &str = "sqlmap::scripting::XmlLanguageDriver";
    pub const RAW_LANGUAGE_DRIVER: &str = "sqlmap::scripting::RawLanguageDriver";
    pub const TRACING_LOG: &str = "sqlmap::logging::TracingLog";
    pub const STDOUT_LOG: &str = "sqlmap::logging::StdoutLog";
    pub const NO_LOG: &str = "sqlmap::logging::NoLogging";

    /// Plain value types known to every registry
    pub const VALUE_TYPES: &[&str] = &[
        "String", "i8", "i16", "i32", "i64", "f32", "f64", "bool", "HashMap", "Vec",
    ];
}

/// Extension trait objects that can be built from a [`TypeKind`]
pub trait ExtensionType: Extension {
    /// Kind name used in error messages
    const LABEL: &'static str;

    /// Returns the factory if `kind` constructs this extension type
    fn factory(kind: &TypeKind) -> Option<&Factory<Self>>;
}

macro_rules! extension_kinds {
    ($( $variant:ident($trait_:ident) => $label:literal, $ctor:ident, $ctor_with:ident; )+) => {
        /// What a registered type is and, for extensions, how to build it
        #[derive(Clone)]
        pub enum TypeKind {
            /// A plain value type (alias target, type handler value type)
            Value,
            /// A mapper interface
            Mapper,
            /// A scripting language driver
            LanguageDriver,
            /// A logging implementation
            Log(LogImpl),
            $( $variant(Factory<dyn $trait_>), )+
        }

        impl TypeKind {
            pub fn label(&self) -> &'static str {
                match self {
                    TypeKind::Value => "value type",
                    TypeKind::Mapper => "mapper",
                    TypeKind::LanguageDriver => "language driver",
                    TypeKind::Log(_) => "log implementation",
                    $( TypeKind::$variant(_) => $label, )+
                }
            }
        }

        $(
            impl ExtensionType for dyn $trait_ {
                const LABEL: &'static str = $label;

                fn factory(kind: &TypeKind) -> Option<&Factory<Self>> {
                    match kind {
                        TypeKind::$variant(factory) => Some(factory),
                        _ => None,
                    }
                }
            }
        )+

        impl TypeDescriptor {
            $(
                #[doc = concat!("Registers a ", $label, " built with `Default`")]
                pub fn $ctor<T: $trait_ + Default + 'static>(name: impl Into<String>) -> Self {
                    Self::new(
                        name,
                        TypeKind::$variant(Arc::new(|| -> Result<Box<dyn $trait_>, BoxError> {
                            Ok(Box::new(T::default()))
                        })),
                    )
                }

                #[doc = concat!("Registers a ", $label, " built by `factory`")]
                pub fn $ctor_with<F>(name: impl Into<String>, factory: F) -> Self
                where
                    F: Fn() -> Result<Box<dyn $trait_>, BoxError> + Send + Sync + 'static,
                {
                    Self::new(name, TypeKind::$variant(Arc::new(factory)))
                }
            )+
        }
    };
}

extension_kinds! {
    Interceptor(Interceptor) => "interceptor", interceptor, interceptor_with;
    ObjectFactory(ObjectFactory) => "object factory", object_factory, object_factory_with;
    ObjectWrapperFactory(ObjectWrapperFactory) => "object wrapper factory",
        object_wrapper_factory, object_wrapper_factory_with;
    ReflectorFactory(ReflectorFactory) => "reflector factory",
        reflector_factory, reflector_factory_with;
    TransactionFactory(TransactionFactory) => "transaction factory",
        transaction_factory, transaction_factory_with;
    DataSourceFactory(DataSourceFactory) => "data source factory",
        data_source_factory, data_source_factory_with;
    DatabaseIdProvider(DatabaseIdProvider) => "database id provider",
        database_id_provider, database_id_provider_with;
    TypeHandler(TypeHandler) => "type handler", type_handler, type_handler_with;
    ResourceLoader(ResourceLoader) => "resource loader", resource_loader, resource_loader_with;
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Log(log) => write!(f, "Log({log:?})"),
            other => f.write_str(other.label()),
        }
    }
}

/// A registered type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: String,
    alias: Option<String>,
    kind: TypeKind,
}

impl TypeDescriptor {
    /// Creates a descriptor; dotted names are normalised to `::` paths
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: normalize(&name.into()),
            alias: None,
            kind,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Value)
    }

    pub fn mapper(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Mapper)
    }

    pub fn language_driver(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::LanguageDriver)
    }

    pub fn log(name: impl Into<String>, log: LogImpl) -> Self {
        Self::new(name, TypeKind::Log(log))
    }

    /// Declares the alias used when this type is registered by a package scan
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Last path segment of the name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// Everything before the last path segment
    pub fn package(&self) -> &str {
        self.name
            .rsplit_once("::")
            .map(|(package, _)| package)
            .unwrap_or("")
    }

    /// Whether this type lives in `package` or one of its sub-packages
    pub fn is_in_package(&self, package: &str) -> bool {
        let package = normalize(package);
        let own = self.package();
        own == package
            || own
                .strip_prefix(package.as_str())
                .is_some_and(|rest| rest.starts_with("::"))
    }
}

fn normalize(name: &str) -> String {
    let name = name.trim();
    if name.contains("::") {
        name.to_string()
    } else {
        name.replace('.', "::")
    }
}

/// Registry of every type the document may name
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in extensions and value types
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for value in builtin::VALUE_TYPES {
            registry.register(TypeDescriptor::value(*value));
        }
        registry
            .register(TypeDescriptor::transaction_factory::<JdbcTransactionFactory>(
                builtin::JDBC_TRANSACTION,
            ))
            .register(TypeDescriptor::transaction_factory::<ManagedTransactionFactory>(
                builtin::MANAGED_TRANSACTION,
            ))
            .register(TypeDescriptor::data_source_factory::<UnpooledDataSourceFactory>(
                builtin::UNPOOLED_DATA_SOURCE,
            ))
            .register(TypeDescriptor::data_source_factory::<PooledDataSourceFactory>(
                builtin::POOLED_DATA_SOURCE,
            ))
            .register(TypeDescriptor::database_id_provider::<VendorDatabaseIdProvider>(
                builtin::VENDOR_DATABASE_ID,
            ))
            .register(TypeDescriptor::object_factory::<DefaultObjectFactory>(
                builtin::DEFAULT_OBJECT_FACTORY,
            ))
            .register(TypeDescriptor::object_wrapper_factory::<DefaultObjectWrapperFactory>(
                builtin::DEFAULT_OBJECT_WRAPPER_FACTORY,
            ))
            .register(TypeDescriptor::reflector_factory::<DefaultReflectorFactory>(
                builtin::DEFAULT_REFLECTOR_FACTORY,
            ))
            .register(TypeDescriptor::type_handler::<EnumTypeHandler>(
                builtin::ENUM_TYPE_HANDLER,
            ))
            .register(TypeDescriptor::type_handler::<EnumOrdinalTypeHandler>(
                builtin::ENUM_ORDINAL_TYPE_HANDLER,
            ))
            .register(TypeDescriptor::resource_loader::<FileSystemLoader>(
                builtin::FILE_SYSTEM_LOADER,
            ))
            .register(TypeDescriptor::language_driver(builtin::XML_LANGUAGE_DRIVER))
            .register(TypeDescriptor::language_driver(builtin::RAW_LANGUAGE_DRIVER))
            .register(TypeDescriptor::log(builtin::TRACING_LOG, LogImpl::Tracing))
            .register(TypeDescriptor::log(builtin::STDOUT_LOG, LogImpl::Stdout))
            .register(TypeDescriptor::log(builtin::NO_LOG, LogImpl::NoLogging));
        registry
    }

    /// Registers a type, replacing any previous registration under the same name
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        self.types.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Looks up a type by fully-qualified name
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(&normalize(name))
    }

    /// Every type in `package` and its sub-packages, in registration order
    pub fn in_package<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a TypeDescriptor> {
        self.types
            .values()
            .filter(move |descriptor| descriptor.is_in_package(package))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_packages() {
        let descriptor = TypeDescriptor::value("blog.domain.Author");
        assert_eq!(descriptor.name(), "blog::domain::Author");
        assert_eq!(descriptor.simple_name(), "Author");
        assert_eq!(descriptor.package(), "blog::domain");
        assert!(descriptor.is_in_package("blog"));
        assert!(descriptor.is_in_package("blog.domain"));
        assert!(!descriptor.is_in_package("blo"));
    }

    #[test]
    fn test_builtins_registered() {
        let registry = TypeRegistry::with_builtins();
        let jdbc = registry.get(builtin::JDBC_TRANSACTION).unwrap();
        assert!(<dyn TransactionFactory>::factory(jdbc.kind()).is_some());
        assert!(<dyn DataSourceFactory>::factory(jdbc.kind()).is_none());
        assert!(matches!(
            registry.get("i32").map(TypeDescriptor::kind),
            Some(TypeKind::Value)
        ));
    }

    #[test]
    fn test_factory_builds_fresh_instances() {
        let registry = TypeRegistry::with_builtins();
        let descriptor = registry.get(builtin::MANAGED_TRANSACTION).unwrap();
        let factory = <dyn TransactionFactory>::factory(descriptor.kind()).unwrap();
        let transaction = factory().unwrap();
        assert!(transaction.closes_connection());
    }

    #[test]
    fn test_package_scan_includes_sub_packages() {
        let mut registry = TypeRegistry::new();
        registry
            .register(TypeDescriptor::value("blog::domain::Author"))
            .register(TypeDescriptor::value("blog::domain::post::Post"))
            .register(TypeDescriptor::value("shop::Order"));

        let names: Vec<_> = registry.in_package("blog").map(TypeDescriptor::name).collect();
        assert_eq!(names, vec!["blog::domain::Author", "blog::domain::post::Post"]);
    }
}
