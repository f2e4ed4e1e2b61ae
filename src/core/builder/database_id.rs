//! `databaseIdProvider` section

use super::BuildContext;
use crate::adapters::DatabaseIdProvider;
use crate::config::Node;
use crate::domain::{BuildError, Result};

/// Legacy name of the vendor provider alias
const LEGACY_VENDOR_ALIAS: &str = "VENDOR";
const VENDOR_ALIAS: &str = "DB_VENDOR";

pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    let mut type_name = section.required_attribute("type")?;
    if type_name == LEGACY_VENDOR_ALIAS {
        type_name = VENDOR_ALIAS.to_string();
    }
    let provider = ctx
        .configuration
        .resolver()
        .instantiate::<dyn DatabaseIdProvider>(&type_name, section.children_as_properties())?;

    let Some(environment) = ctx.configuration.environment() else {
        tracing::debug!("No active environment, skipping database id");
        return Ok(());
    };

    let database_id = provider
        .database_id(environment.data_source().as_ref())
        .map_err(|e| BuildError::DataSource(e.to_string()))?;
    tracing::info!(database_id = ?database_id, "Resolved database id");
    ctx.configuration.set_database_id(database_id);
    Ok(())
}
