//! `environments` section

use super::BuildContext;
use crate::adapters::{DataSourceFactory, TransactionFactory};
use crate::config::{redact_url, Node};
use crate::core::configuration::Environment;
use crate::domain::{BuildError, FactoryKind, Result};

/// Selects and builds the target environment
///
/// Every declared environment must carry an id and both factory sections.
/// Only the target environment's factories are instantiated.
pub(super) fn run(section: Option<&Node<'_>>, ctx: &mut BuildContext<'_>) -> Result<()> {
    let Some(section) = section else {
        return Ok(());
    };

    if ctx.environment.is_none() {
        ctx.environment = section.attribute("default");
    }
    let target = ctx
        .environment
        .clone()
        .ok_or(BuildError::NoEnvironmentSpecified)?;

    let mut selected = false;
    for child in section.children() {
        let id = child
            .attribute("id")
            .ok_or(BuildError::MissingEnvironmentId)?;
        let transaction = factory_section(&child, &id, FactoryKind::Transaction)?;
        let data_source = factory_section(&child, &id, FactoryKind::DataSource)?;

        if id != target {
            tracing::debug!(environment = %id, "Skipping environment");
            continue;
        }

        let resolver = ctx.configuration.resolver();
        let transaction_factory = resolver.instantiate::<dyn TransactionFactory>(
            &transaction.required_attribute("type")?,
            transaction.children_as_properties(),
        )?;
        let data_source_factory = resolver.instantiate::<dyn DataSourceFactory>(
            &data_source.required_attribute("type")?,
            data_source.children_as_properties(),
        )?;
        let data_source = data_source_factory
            .data_source()
            .map_err(|e| BuildError::DataSource(e.to_string()))?;

        tracing::info!(
            environment = %id,
            url = data_source.url().map(redact_url).as_deref(),
            "Selected environment"
        );
        ctx.configuration
            .set_environment(Environment::new(id, transaction_factory, data_source));
        selected = true;
    }

    if !selected {
        tracing::warn!(environment = %target, "No declared environment matches the target id");
    }
    Ok(())
}

fn factory_section<'a>(environment: &Node<'a>, id: &str, kind: FactoryKind) -> Result<Node<'a>> {
    environment
        .child(kind.section())
        .ok_or_else(|| BuildError::MissingFactory {
            environment: id.to_string(),
            kind,
        })
}
