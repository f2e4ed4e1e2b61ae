//! `mappers` section

use super::BuildContext;
use crate::adapters::Resources;
use crate::config::Node;
use crate::domain::{BuildError, Result};

pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    for child in section.children() {
        if child.name() == "package" {
            let package = child.required_attribute("name")?;
            let count = ctx.configuration.add_mappers(&package)?;
            tracing::debug!(%package, count, "Registered mappers from package");
            continue;
        }

        match (
            child.attribute("resource"),
            child.attribute("url"),
            child.attribute("class"),
        ) {
            (Some(resource), None, None) => {
                load(ctx, &resource, |resources| resources.resource_as_bytes(&resource))?
            }
            (None, Some(url), None) => load(ctx, &url, |resources| resources.url_as_bytes(&url))?,
            (None, None, Some(class)) => {
                let descriptor = ctx.configuration.resolver().resolve_class(&class)?.clone();
                ctx.configuration.add_mapper(&descriptor)?;
            }
            _ => return Err(BuildError::ConflictingMapperReference),
        }
    }
    Ok(())
}

/// Hands a mapper document to the mapper loader, at most once per resource
///
/// While the document loads, the error context names the mapper resource.
fn load<F>(ctx: &mut BuildContext<'_>, resource: &str, read: F) -> Result<()>
where
    F: FnOnce(&Resources) -> Result<Vec<u8>>,
{
    if ctx.configuration.is_resource_loaded(resource) {
        tracing::debug!(resource, "Mapper resource already loaded");
        return Ok(());
    }
    let loader = ctx
        .mapper_loader
        .ok_or_else(|| BuildError::MissingMapperLoader {
            resource: resource.to_string(),
        })?;

    let previous = std::mem::replace(&mut ctx.resource, resource.to_string());
    let source = read(&ctx.resources)?;
    loader
        .load(&source, resource, &mut ctx.configuration)
        .map_err(|e| BuildError::MapperLoad {
            resource: resource.to_string(),
            reason: e.to_string(),
        })?;
    ctx.configuration.add_loaded_resource(resource);
    ctx.resource = previous;

    tracing::debug!(resource, "Loaded mapper resource");
    Ok(())
}
