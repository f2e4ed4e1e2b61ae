//! Mapper registry

use super::types::{TypeDescriptor, TypeKind, TypeRegistry};
use crate::domain::{BuildError, Result};
use indexmap::IndexSet;

/// Mapper types known to the configuration
#[derive(Debug, Clone, Default)]
pub struct MapperRegistry {
    mappers: IndexSet<String>,
}

impl MapperRegistry {
    /// Adds one mapper type
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NotAMapper`] for non-mapper types and
    /// [`BuildError::DuplicateMapper`] if the type is already known.
    pub fn add(&mut self, descriptor: &TypeDescriptor) -> Result<()> {
        if !matches!(descriptor.kind(), TypeKind::Mapper) {
            return Err(BuildError::NotAMapper {
                type_name: descriptor.name().to_string(),
            });
        }
        if !self.mappers.insert(descriptor.name().to_string()) {
            return Err(BuildError::DuplicateMapper {
                type_name: descriptor.name().to_string(),
            });
        }
        Ok(())
    }

    /// Adds every mapper type in `package` and its sub-packages
    pub fn add_package(&mut self, types: &TypeRegistry, package: &str) -> Result<usize> {
        let mut count = 0;
        for descriptor in types.in_package(package) {
            if matches!(descriptor.kind(), TypeKind::Mapper) {
                self.add(descriptor)?;
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn has_mapper(&self, type_name: &str) -> bool {
        self.mappers.contains(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.mappers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.mappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappers.is_empty()
    }
}
