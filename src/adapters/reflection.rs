//! Default object, wrapper and reflector factories

use super::traits::{Configurable, Extension, ObjectFactory, ObjectWrapperFactory, ReflectorFactory};
use crate::domain::{BoxError, Properties};

/// Collection type names recognised by [`DefaultObjectFactory`]
const COLLECTION_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "list",
    "collection",
];

#[derive(Debug, Default)]
pub struct DefaultObjectFactory;

impl Extension for DefaultObjectFactory {}

impl ObjectFactory for DefaultObjectFactory {
    fn is_collection(&self, type_name: &str) -> bool {
        let base = type_name.split('<').next().unwrap_or(type_name);
        let simple = base.rsplit("::").next().unwrap_or(base);
        COLLECTION_TYPES.contains(&simple)
    }
}

#[derive(Debug, Default)]
pub struct DefaultObjectWrapperFactory;

impl Extension for DefaultObjectWrapperFactory {}

impl ObjectWrapperFactory for DefaultObjectWrapperFactory {
    fn has_wrapper_for(&self, _type_name: &str) -> bool {
        false
    }
}

/// Reflector factory with an optional type metadata cache
#[derive(Debug)]
pub struct DefaultReflectorFactory {
    class_cache_enabled: bool,
}

impl Default for DefaultReflectorFactory {
    fn default() -> Self {
        Self {
            class_cache_enabled: true,
        }
    }
}

impl Extension for DefaultReflectorFactory {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for DefaultReflectorFactory {
    fn set_properties(&mut self, properties: Properties) -> Result<(), BoxError> {
        for (key, value) in properties.iter() {
            match key {
                "classCacheEnabled" => self.class_cache_enabled = value.parse()?,
                other => return Err(format!("Unknown reflector factory property: {other}").into()),
            }
        }
        Ok(())
    }
}

impl ReflectorFactory for DefaultReflectorFactory {
    fn is_class_cache_enabled(&self) -> bool {
        self.class_cache_enabled
    }
}
