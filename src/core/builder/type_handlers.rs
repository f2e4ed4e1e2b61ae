//! `typeHandlers` section

use super::BuildContext;
use crate::adapters::TypeHandler;
use crate::config::Node;
use crate::core::registry::{instantiate_descriptor, ExtensionType, TypeDescriptor};
use crate::domain::{BuildError, JdbcType, Properties, Result};
use std::sync::Arc;

pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    for child in section.children() {
        if child.name() == "package" {
            let package = child.required_attribute("name")?;
            register_package(ctx, &package)?;
        } else {
            register_entry(ctx, &child)?;
        }
    }
    Ok(())
}

fn register_package(ctx: &mut BuildContext<'_>, package: &str) -> Result<()> {
    let handlers: Vec<TypeDescriptor> = ctx
        .configuration
        .type_registry()
        .in_package(package)
        .filter(|descriptor| <dyn TypeHandler>::factory(descriptor.kind()).is_some())
        .cloned()
        .collect();

    for descriptor in &handlers {
        let handler = instantiate_descriptor::<dyn TypeHandler>(descriptor, Properties::new())?;
        ctx.configuration
            .type_handlers_mut()
            .register(descriptor.name(), Arc::from(handler));
    }
    tracing::debug!(%package, count = handlers.len(), "Registered type handlers from package");
    Ok(())
}

fn register_entry(ctx: &mut BuildContext<'_>, node: &Node<'_>) -> Result<()> {
    let handler_name = node.required_attribute("handler")?;
    let jdbc_type = node
        .attribute("jdbcType")
        .map(|value| {
            value
                .parse::<JdbcType>()
                .map_err(|e| BuildError::InvalidAttribute {
                    node: node.path().to_string(),
                    attribute: "jdbcType".to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                })
        })
        .transpose()?;

    let resolver = ctx.configuration.resolver();
    let value_type = node
        .attribute("javaType")
        .map(|java_type| resolver.resolve(&java_type).map(|d| d.name().to_string()))
        .transpose()?;
    let descriptor = resolver.resolve(&handler_name)?;
    let name = descriptor.name().to_string();
    let handler: Arc<dyn TypeHandler> =
        Arc::from(instantiate_descriptor::<dyn TypeHandler>(descriptor, Properties::new())?);

    let registry = ctx.configuration.type_handlers_mut();
    match (value_type, jdbc_type) {
        (Some(value_type), Some(jdbc_type)) => {
            registry.register_for(&value_type, Some(jdbc_type), name, handler)
        }
        (Some(value_type), None) => registry.register_for_value_type(&value_type, name, handler),
        (None, _) => registry.register(name, handler),
    }
    Ok(())
}
