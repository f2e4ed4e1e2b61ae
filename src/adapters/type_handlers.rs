//! Built-in type handlers

use super::traits::{Extension, TypeHandler};
use crate::domain::JdbcType;

/// Handler for a primitive value type
#[derive(Debug, Clone)]
pub struct PrimitiveTypeHandler {
    value_type: &'static str,
    jdbc_types: &'static [JdbcType],
}

impl PrimitiveTypeHandler {
    pub const fn new(value_type: &'static str, jdbc_types: &'static [JdbcType]) -> Self {
        Self {
            value_type,
            jdbc_types,
        }
    }

    /// Registry name of the handler for `value_type`
    pub fn type_name(&self) -> String {
        format!(
            "sqlmap::adapters::type_handlers::PrimitiveTypeHandler<{}>",
            self.value_type
        )
    }
}

impl Extension for PrimitiveTypeHandler {}

impl TypeHandler for PrimitiveTypeHandler {
    fn handled_types(&self) -> Vec<String> {
        vec![self.value_type.to_string()]
    }

    fn jdbc_types(&self) -> Vec<JdbcType> {
        self.jdbc_types.to_vec()
    }
}

/// Handlers installed in every type handler registry
pub const PRIMITIVE_HANDLERS: &[PrimitiveTypeHandler] = &[
    PrimitiveTypeHandler::new("String", &[]),
    PrimitiveTypeHandler::new("bool", &[]),
    PrimitiveTypeHandler::new("i16", &[]),
    PrimitiveTypeHandler::new("i32", &[]),
    PrimitiveTypeHandler::new("i64", &[]),
    PrimitiveTypeHandler::new("f32", &[]),
    PrimitiveTypeHandler::new("f64", &[]),
];

/// Stores enum values by variant name
#[derive(Debug, Default)]
pub struct EnumTypeHandler;

impl Extension for EnumTypeHandler {}
impl TypeHandler for EnumTypeHandler {}

/// Stores enum values by variant position
#[derive(Debug, Default)]
pub struct EnumOrdinalTypeHandler;

impl Extension for EnumOrdinalTypeHandler {}
impl TypeHandler for EnumOrdinalTypeHandler {
    fn jdbc_types(&self) -> Vec<JdbcType> {
        vec![JdbcType::Integer]
    }
}
