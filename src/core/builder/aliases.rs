//! `typeAliases` section

use super::BuildContext;
use crate::config::Node;
use crate::domain::{BuildError, Result};

pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    for child in section.children() {
        if child.name() == "package" {
            let package = child.required_attribute("name")?;
            let count = ctx.configuration.register_alias_package(&package)?;
            tracing::debug!(%package, count, "Registered type aliases from package");
            continue;
        }

        let type_name = child.required_attribute("type")?;
        let alias = child.attribute("alias");
        let descriptor = ctx
            .configuration
            .resolver()
            .resolve_class(&type_name)
            .map_err(|e| BuildError::AliasRegistration {
                alias: alias.clone().unwrap_or_else(|| type_name.clone()),
                source: Box::new(e),
            })?
            .clone();
        match alias {
            Some(alias) => ctx
                .configuration
                .register_type_alias(&alias, descriptor.name())?,
            None => ctx.configuration.register_type(&descriptor)?,
        }
    }
    Ok(())
}
