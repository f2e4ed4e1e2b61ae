//! Shared fixtures for the integration tests

#![allow(dead_code)]

use sqlmap::adapters::{
    Configurable, DataSource, DataSourceFactory, Extension, Interceptor, MapperLoader,
    ObjectFactory, ResourceLoader,
};
use sqlmap::config::ConfigDocument;
use sqlmap::core::{ConfigBuilder, Configuration, TypeDescriptor, TypeRegistry};
use sqlmap::domain::{BoxError, Properties};
use std::sync::{Arc, Mutex};

/// Interceptor that wraps the components listed in its `targets` property
#[derive(Debug, Default)]
pub struct AuditPlugin {
    targets: Vec<String>,
}

impl Extension for AuditPlugin {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for AuditPlugin {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        for (key, value) in properties.iter() {
            match key {
                "targets" => {
                    self.targets = value.split(',').map(|t| t.trim().to_string()).collect()
                }
                other => return Err(format!("unknown property '{other}'").into()),
            }
        }
        Ok(())
    }
}

impl Interceptor for AuditPlugin {
    fn intercepts(&self, target: &str) -> bool {
        self.targets.iter().any(|t| t == target)
    }
}

/// Object factory that treats the types listed in `collections` as collections
#[derive(Debug, Default)]
pub struct ListObjectFactory {
    collections: Vec<String>,
}

impl Extension for ListObjectFactory {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for ListObjectFactory {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        if let Some(collections) = properties.get("collections") {
            self.collections = collections.split(',').map(str::to_string).collect();
        }
        Ok(())
    }
}

impl ObjectFactory for ListObjectFactory {
    fn is_collection(&self, type_name: &str) -> bool {
        self.collections.iter().any(|c| c == type_name)
    }
}

/// Resource loader that serves `memory/` resources from a fixed table
#[derive(Debug, Default)]
pub struct MemoryLoader;

impl Extension for MemoryLoader {}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BoxError> {
        Ok(match name {
            "memory/author.toml" => Some(
                b"namespace = \"blog.AuthorMapper\"\n[sql]\ncolumns = \"id, name\"\n".to_vec(),
            ),
            _ => None,
        })
    }
}

/// Data source whose database cannot be reached
#[derive(Debug)]
pub struct OfflineDataSource;

impl DataSource for OfflineDataSource {
    fn url(&self) -> Option<&str> {
        None
    }

    fn database_product_name(&self) -> Result<String, BoxError> {
        Err("connection refused".into())
    }
}

#[derive(Debug, Default)]
pub struct OfflineDataSourceFactory;

impl Extension for OfflineDataSourceFactory {}

impl DataSourceFactory for OfflineDataSourceFactory {
    fn data_source(&self) -> Result<Arc<dyn DataSource>, BoxError> {
        Ok(Arc::new(OfflineDataSource))
    }
}

/// Mapper loader that records every resource it is handed
#[derive(Debug, Default, Clone)]
pub struct RecordingMapperLoader {
    pub loaded: Arc<Mutex<Vec<String>>>,
}

impl RecordingMapperLoader {
    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

impl MapperLoader for RecordingMapperLoader {
    fn load(
        &self,
        source: &[u8],
        resource: &str,
        _configuration: &mut Configuration,
    ) -> Result<(), BoxError> {
        std::str::from_utf8(source)?;
        self.loaded.lock().unwrap().push(resource.to_string());
        Ok(())
    }
}

/// Mapper loader that rejects every document
#[derive(Debug, Default)]
pub struct RejectingMapperLoader;

impl MapperLoader for RejectingMapperLoader {
    fn load(&self, _: &[u8], _: &str, _: &mut Configuration) -> Result<(), BoxError> {
        Err("unexpected element 'select'".into())
    }
}

/// Built-in types plus the blog application's types
pub fn blog_types() -> TypeRegistry {
    let mut types = TypeRegistry::with_builtins();
    types
        .register(TypeDescriptor::value("blog::domain::Author"))
        .register(TypeDescriptor::value("blog::domain::Post").with_alias("Article"))
        .register(TypeDescriptor::value("blog::domain::Status"))
        .register(TypeDescriptor::mapper("blog::mappers::AuthorMapper"))
        .register(TypeDescriptor::mapper("blog::mappers::PostMapper"))
        .register(TypeDescriptor::interceptor::<AuditPlugin>("blog::plugins::AuditPlugin"))
        .register(TypeDescriptor::object_factory::<ListObjectFactory>(
            "blog::support::ListObjectFactory",
        ))
        .register(TypeDescriptor::resource_loader::<MemoryLoader>(
            "blog::support::MemoryLoader",
        ))
        .register(TypeDescriptor::data_source_factory::<OfflineDataSourceFactory>(
            "blog::support::OfflineDataSourceFactory",
        ));
    types
}

/// Builder over an inline document with the blog types registered
pub fn builder(source: &str) -> ConfigBuilder {
    let document = ConfigDocument::parse(source, "test.toml").unwrap();
    ConfigBuilder::new(document).with_types(blog_types())
}
