//! `properties` section: resolves the variable table

use super::BuildContext;
use crate::config::Node;
use crate::domain::{BuildError, Result};

/// Merges inline, loaded and caller-supplied variables
///
/// Later layers win: inline `property` entries, then the `resource` or `url`
/// file, then the variables the builder was created with.
pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    let resource = section.attribute("resource");
    let url = section.attribute("url");
    let mut variables = section.children_as_properties();

    match (resource, url) {
        (Some(_), Some(_)) => return Err(BuildError::ConflictingSource),
        (Some(resource), None) => {
            variables.merge(&ctx.resources.resource_as_properties(&resource)?);
        }
        (None, Some(url)) => {
            variables.merge(&ctx.resources.url_as_properties(&url)?);
        }
        (None, None) => {}
    }

    variables.merge(ctx.configuration.variables());
    tracing::debug!(count = variables.len(), "Resolved configuration variables");
    ctx.configuration.set_variables(variables);
    Ok(())
}
