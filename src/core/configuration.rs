//! The assembled configuration
//!
//! [`Configuration`] is the aggregate the build pipeline populates. It is only
//! handed to callers once every stage has succeeded.

use super::registry::{
    builtin, ExtensionResolver, MapperRegistry, TypeAliasRegistry, TypeDescriptor,
    TypeHandlerRegistry, TypeRegistry,
};
use crate::adapters::reflection::{
    DefaultObjectFactory, DefaultObjectWrapperFactory, DefaultReflectorFactory,
};
use crate::adapters::{
    DataSource, Interceptor, ObjectFactory, ObjectWrapperFactory, ReflectorFactory,
    TransactionFactory,
};
use crate::domain::{
    AutoMappingBehavior, AutoMappingUnknownColumnBehavior, ExecutorType, JdbcType,
    LocalCacheScope, LogImpl, Properties, Result, ResultSetType,
};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Behavioural settings of the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub auto_mapping_behavior: AutoMappingBehavior,
    pub auto_mapping_unknown_column_behavior: AutoMappingUnknownColumnBehavior,
    pub cache_enabled: bool,
    pub lazy_loading_enabled: bool,
    pub aggressive_lazy_loading: bool,
    pub multiple_result_sets_enabled: bool,
    pub use_column_label: bool,
    pub use_generated_keys: bool,
    pub default_executor_type: ExecutorType,
    pub default_statement_timeout: Option<u32>,
    pub default_fetch_size: Option<u32>,
    pub default_result_set_type: Option<ResultSetType>,
    pub map_underscore_to_camel_case: bool,
    pub safe_row_bounds_enabled: bool,
    pub local_cache_scope: LocalCacheScope,
    pub jdbc_type_for_null: JdbcType,
    pub lazy_load_trigger_methods: BTreeSet<String>,
    pub safe_result_handler_enabled: bool,
    pub default_scripting_language: String,
    pub call_setters_on_nulls: bool,
    pub use_actual_param_name: bool,
    pub return_instance_for_empty_row: bool,
    pub log_prefix: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_mapping_behavior: AutoMappingBehavior::Partial,
            auto_mapping_unknown_column_behavior: AutoMappingUnknownColumnBehavior::None,
            cache_enabled: true,
            lazy_loading_enabled: false,
            aggressive_lazy_loading: false,
            multiple_result_sets_enabled: true,
            use_column_label: true,
            use_generated_keys: false,
            default_executor_type: ExecutorType::Simple,
            default_statement_timeout: None,
            default_fetch_size: None,
            default_result_set_type: None,
            map_underscore_to_camel_case: false,
            safe_row_bounds_enabled: false,
            local_cache_scope: LocalCacheScope::Session,
            jdbc_type_for_null: JdbcType::Other,
            lazy_load_trigger_methods: ["equals", "clone", "hashCode", "toString"]
                .into_iter()
                .map(String::from)
                .collect(),
            safe_result_handler_enabled: true,
            default_scripting_language: builtin::XML_LANGUAGE_DRIVER.to_string(),
            call_setters_on_nulls: false,
            use_actual_param_name: true,
            return_instance_for_empty_row: false,
            log_prefix: None,
        }
    }
}

/// The active deployment environment
#[derive(Debug)]
pub struct Environment {
    id: String,
    transaction_factory: Box<dyn TransactionFactory>,
    data_source: Arc<dyn DataSource>,
}

impl Environment {
    pub fn new(
        id: impl Into<String>,
        transaction_factory: Box<dyn TransactionFactory>,
        data_source: Arc<dyn DataSource>,
    ) -> Self {
        Self {
            id: id.into(),
            transaction_factory,
            data_source,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transaction_factory(&self) -> &dyn TransactionFactory {
        self.transaction_factory.as_ref()
    }

    pub fn data_source(&self) -> &Arc<dyn DataSource> {
        &self.data_source
    }
}

/// Runtime configuration of the data-mapping engine
#[derive(Debug)]
pub struct Configuration {
    variables: Properties,
    environment: Option<Environment>,
    database_id: Option<String>,
    pub settings: Settings,
    type_registry: TypeRegistry,
    type_aliases: TypeAliasRegistry,
    type_handlers: TypeHandlerRegistry,
    interceptors: Vec<Box<dyn Interceptor>>,
    object_factory: Box<dyn ObjectFactory>,
    object_wrapper_factory: Box<dyn ObjectWrapperFactory>,
    reflector_factory: Box<dyn ReflectorFactory>,
    vfs_impls: Vec<String>,
    log_impl: Option<LogImpl>,
    mappers: MapperRegistry,
    loaded_resources: IndexSet<String>,
    sql_fragments: IndexMap<String, String>,
}

impl Configuration {
    /// Creates an empty configuration over a type registry and caller variables
    pub fn new(type_registry: TypeRegistry, variables: Properties) -> Self {
        Self {
            variables,
            environment: None,
            database_id: None,
            settings: Settings::default(),
            type_registry,
            type_aliases: TypeAliasRegistry::with_builtins(),
            type_handlers: TypeHandlerRegistry::default(),
            interceptors: Vec::new(),
            object_factory: Box::new(DefaultObjectFactory),
            object_wrapper_factory: Box::new(DefaultObjectWrapperFactory),
            reflector_factory: Box::new(DefaultReflectorFactory::default()),
            vfs_impls: Vec::new(),
            log_impl: None,
            mappers: MapperRegistry::default(),
            loaded_resources: IndexSet::new(),
            sql_fragments: IndexMap::new(),
        }
    }

    /// Variable table used for placeholder substitution
    pub fn variables(&self) -> &Properties {
        &self.variables
    }

    pub(crate) fn set_variables(&mut self, variables: Properties) {
        self.variables = variables;
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = Some(environment);
    }

    pub fn database_id(&self) -> Option<&str> {
        self.database_id.as_deref()
    }

    pub fn set_database_id(&mut self, database_id: Option<String>) {
        self.database_id = database_id;
    }

    pub fn type_registry(&self) -> &TypeRegistry {
        &self.type_registry
    }

    pub fn type_aliases(&self) -> &TypeAliasRegistry {
        &self.type_aliases
    }

    /// Resolver over this configuration's registries
    pub fn resolver(&self) -> ExtensionResolver<'_> {
        ExtensionResolver::new(&self.type_registry, &self.type_aliases)
    }

    /// Binds an alias to a type name
    pub fn register_type_alias(&mut self, alias: &str, type_name: &str) -> Result<()> {
        self.type_aliases.register_alias(alias, type_name)
    }

    /// Registers a type under its declared alias or simple name
    pub fn register_type(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        self.type_aliases.register_type(descriptor)
    }

    /// Registers every non-mapper type of a package under its simple name
    pub fn register_alias_package(&mut self, package: &str) -> Result<usize> {
        self.type_aliases
            .register_package(&self.type_registry, package)
    }

    pub fn type_handlers(&self) -> &TypeHandlerRegistry {
        &self.type_handlers
    }

    pub fn type_handlers_mut(&mut self) -> &mut TypeHandlerRegistry {
        &mut self.type_handlers
    }

    pub fn interceptors(&self) -> &[Box<dyn Interceptor>] {
        &self.interceptors
    }

    pub fn add_interceptor(&mut self, interceptor: Box<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn object_factory(&self) -> &dyn ObjectFactory {
        self.object_factory.as_ref()
    }

    pub fn set_object_factory(&mut self, factory: Box<dyn ObjectFactory>) {
        self.object_factory = factory;
    }

    pub fn object_wrapper_factory(&self) -> &dyn ObjectWrapperFactory {
        self.object_wrapper_factory.as_ref()
    }

    pub fn set_object_wrapper_factory(&mut self, factory: Box<dyn ObjectWrapperFactory>) {
        self.object_wrapper_factory = factory;
    }

    pub fn reflector_factory(&self) -> &dyn ReflectorFactory {
        self.reflector_factory.as_ref()
    }

    pub fn set_reflector_factory(&mut self, factory: Box<dyn ReflectorFactory>) {
        self.reflector_factory = factory;
    }

    /// Resource loader types installed through `vfsImpl`
    pub fn vfs_impls(&self) -> &[String] {
        &self.vfs_impls
    }

    pub fn add_vfs_impl(&mut self, type_name: impl Into<String>) {
        self.vfs_impls.push(type_name.into());
    }

    pub fn log_impl(&self) -> Option<LogImpl> {
        self.log_impl
    }

    pub fn set_log_impl(&mut self, log_impl: LogImpl) {
        self.log_impl = Some(log_impl);
    }

    pub fn mappers(&self) -> &MapperRegistry {
        &self.mappers
    }

    /// Adds a mapper type
    pub fn add_mapper(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        self.mappers.add(descriptor)
    }

    /// Adds every mapper type of a package
    pub fn add_mappers(&mut self, package: &str) -> Result<usize> {
        self.mappers.add_package(&self.type_registry, package)
    }

    pub fn is_resource_loaded(&self, resource: &str) -> bool {
        self.loaded_resources.contains(resource)
    }

    pub fn add_loaded_resource(&mut self, resource: impl Into<String>) {
        self.loaded_resources.insert(resource.into());
    }

    pub fn loaded_resources(&self) -> impl Iterator<Item = &str> {
        self.loaded_resources.iter().map(String::as_str)
    }

    /// Reusable SQL fragments shared by every mapper document, keyed by id
    pub fn sql_fragments(&self) -> &IndexMap<String, String> {
        &self.sql_fragments
    }

    pub fn sql_fragments_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.sql_fragments
    }
}
