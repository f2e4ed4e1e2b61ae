//! Validate command implementation
//!
//! Builds the configuration exactly as the engine would at startup and
//! reports either a summary of the result or the build failure.

use crate::adapters::MapperLoader;
use crate::config::loader::ENV_VARIABLE_PREFIX;
use crate::config::{parse_variable_pairs, redact_url, variables_from_env};
use crate::core::{ConfigBuilder, Configuration, Settings};
use crate::domain::{BoxError, LogImpl, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Environment to activate instead of the document default
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Variable made available to placeholders (key=value, repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Directory that relative resources are resolved against
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        let code = match self.build(config_path) {
            Ok(configuration) => {
                let summary = ConfigurationSummary::from_configuration(&configuration);
                self.print(&ValidationReport {
                    valid: true,
                    config: config_path,
                    error: None,
                    summary: Some(summary),
                })?;
                0
            }
            Err(e) => {
                crate::log_error_with_context!(&e, config_path);
                self.print(&ValidationReport {
                    valid: false,
                    config: config_path,
                    error: Some(e.to_string()),
                    summary: None,
                })?;
                2 // Configuration error exit code
            }
        };
        Ok(code)
    }

    fn build(&self, config_path: &str) -> Result<Configuration> {
        // Explicit --var values win over SQLMAP_VAR_* environment variables
        let mut variables = variables_from_env(ENV_VARIABLE_PREFIX);
        variables.merge(&parse_variable_pairs(&self.vars)?);

        let mut builder = ConfigBuilder::from_path(config_path)?
            .with_variables(variables)
            .with_mapper_loader(Box::new(SyntaxCheckMapperLoader));
        if let Some(base_dir) = &self.base_dir {
            builder = builder.with_base_dir(base_dir);
        }
        if let Some(environment) = &self.environment {
            builder = builder.with_environment(environment);
        }
        builder.build()
    }

    fn print(&self, report: &ValidationReport<'_>) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
            return Ok(());
        }

        println!("🔍 Validating configuration document: {}", report.config);
        println!();
        match (&report.summary, &report.error) {
            (Some(summary), _) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!(
                    "  Environment: {}",
                    summary.environment.unwrap_or("(none)")
                );
                if let Some(url) = &summary.data_source_url {
                    println!("  Data Source: {url}");
                }
                println!(
                    "  Database Id: {}",
                    summary.database_id.unwrap_or("(none)")
                );
                println!("  Interceptors: {}", summary.interceptors);
                println!("  Type Aliases: {}", summary.type_aliases);
                println!("  Type Handlers: {}", summary.type_handlers);
                println!("  Mappers: {}", summary.mappers.len());
                println!("  Mapper Resources: {}", summary.loaded_resources.len());
                println!("  SQL Fragments: {}", summary.sql_fragments);
                println!(
                    "  Default Executor: {}",
                    summary.settings.default_executor_type
                );
                println!("  Cache Enabled: {}", summary.settings.cache_enabled);
            }
            (None, error) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {}", error.as_deref().unwrap_or("unknown"));
            }
        }
        println!();
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    config: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigurationSummary<'a>>,
}

/// Serializable overview of a built configuration
///
/// Variables are left out; they routinely hold credentials.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSummary<'a> {
    pub environment: Option<&'a str>,
    /// Connection URL of the active environment, password masked
    pub data_source_url: Option<String>,
    pub database_id: Option<&'a str>,
    pub log_impl: Option<LogImpl>,
    pub vfs_impls: &'a [String],
    pub interceptors: usize,
    pub type_aliases: usize,
    pub type_handlers: usize,
    pub mappers: Vec<&'a str>,
    pub loaded_resources: Vec<&'a str>,
    pub sql_fragments: usize,
    pub settings: &'a Settings,
}

impl<'a> ConfigurationSummary<'a> {
    pub fn from_configuration(configuration: &'a Configuration) -> Self {
        Self {
            environment: configuration.environment().map(|env| env.id()),
            data_source_url: configuration
                .environment()
                .and_then(|env| env.data_source().url())
                .map(redact_url),
            database_id: configuration.database_id(),
            log_impl: configuration.log_impl(),
            vfs_impls: configuration.vfs_impls(),
            interceptors: configuration.interceptors().len(),
            type_aliases: configuration.type_aliases().len(),
            type_handlers: configuration.type_handlers().len(),
            mappers: configuration.mappers().iter().collect(),
            loaded_resources: configuration.loaded_resources().collect(),
            sql_fragments: configuration.sql_fragments().len(),
            settings: &configuration.settings,
        }
    }
}

/// Mapper loader that checks mapper documents parse and collects their SQL fragments
///
/// Mapper documents are TOML; an optional `namespace` prefixes the ids of the
/// string entries of the `sql` table.
#[derive(Debug, Default)]
pub struct SyntaxCheckMapperLoader;

impl MapperLoader for SyntaxCheckMapperLoader {
    fn load(
        &self,
        source: &[u8],
        resource: &str,
        configuration: &mut Configuration,
    ) -> std::result::Result<(), BoxError> {
        let document: toml::Table = toml::from_str(std::str::from_utf8(source)?)?;
        let namespace = document
            .get("namespace")
            .and_then(toml::Value::as_str)
            .unwrap_or(resource)
            .to_string();

        if let Some(toml::Value::Table(fragments)) = document.get("sql") {
            for (id, text) in fragments {
                if let Some(text) = text.as_str() {
                    configuration
                        .sql_fragments_mut()
                        .insert(format!("{namespace}.{id}"), text.to_string());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TypeRegistry;
    use crate::domain::Properties;

    #[test]
    fn test_syntax_check_loader_collects_fragments() {
        let mut configuration = Configuration::new(TypeRegistry::with_builtins(), Properties::new());
        let source = br#"
namespace = "blog.AuthorMapper"

[sql]
columns = "id, name, email"
"#;
        SyntaxCheckMapperLoader
            .load(source, "mappers/author.toml", &mut configuration)
            .unwrap();

        assert_eq!(
            configuration
                .sql_fragments()
                .get("blog.AuthorMapper.columns")
                .map(String::as_str),
            Some("id, name, email")
        );
    }

    #[test]
    fn test_syntax_check_loader_rejects_invalid_toml() {
        let mut configuration = Configuration::new(TypeRegistry::with_builtins(), Properties::new());
        assert!(SyntaxCheckMapperLoader
            .load(b"[sql", "broken.toml", &mut configuration)
            .is_err());
    }

    #[test]
    fn test_summary_serializes() {
        let configuration = Configuration::new(TypeRegistry::with_builtins(), Properties::new());
        let summary = ConfigurationSummary::from_configuration(&configuration);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["environment"], serde_json::Value::Null);
        assert_eq!(json["settings"]["localCacheScope"], "SESSION");
    }
}
