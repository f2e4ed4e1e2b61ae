//! `settings` section and the stages driven by its values

use super::BuildContext;
use crate::adapters::ResourceLoader;
use crate::config::Node;
use crate::core::registry::instantiate_descriptor;
use crate::core::settings;
use crate::domain::{BuildError, Properties, Result};

/// Reads and validates the settings without applying them
///
/// Every setting is a scalar; tables, arrays of tables and `property` entries
/// are reported as unknown settings.
pub(super) fn parse(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let parsed = section.map(|node| node.attributes()).unwrap_or_default();
    if let Some(key) = section.and_then(|node| node.keys().find(|key| !parsed.contains_key(key))) {
        return Err(BuildError::UnknownSetting {
            key: key.to_string(),
        });
    }
    settings::validate(&parsed)?;
    ctx.settings = parsed;
    Ok(())
}

/// Installs the resource loaders named by `vfsImpl`
pub(super) fn load_vfs_impl(_section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(value) = ctx.settings.get("vfsImpl") else {
        return Ok(());
    };

    for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        let descriptor = ctx.configuration.resolver().resolve_class(name)?;
        let type_name = descriptor.name().to_string();
        let loader = instantiate_descriptor::<dyn ResourceLoader>(descriptor, Properties::new())?;

        tracing::debug!(loader = %type_name, "Installed resource loader");
        ctx.resources.add_loader(loader);
        ctx.configuration.add_vfs_impl(type_name);
    }
    Ok(())
}

/// Selects the logging implementation named by `logImpl`
pub(super) fn load_log_impl(_section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    if let Some(name) = ctx.settings.get("logImpl") {
        let log_impl = ctx.configuration.resolver().log_impl(name)?;
        tracing::debug!(?log_impl, "Selected log implementation");
        ctx.configuration.set_log_impl(log_impl);
    }
    Ok(())
}

/// Applies the settings parsed earlier, with defaults for absent keys
pub(super) fn apply(_section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    settings::apply_all(&mut ctx.configuration, &ctx.settings)
}
