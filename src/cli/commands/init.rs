//! Init command implementation
//!
//! This module implements the `init` command for generating a starter
//! configuration document.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration document
    #[arg(short, long, default_value = "sqlmap.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration document");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration document already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::starter_document()) {
            Ok(_) => {
                println!("✅ Configuration document created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point the dataSource url at your database");
                println!("  2. Pass credentials with --var or SQLMAP_VAR_* variables");
                println!("  3. Validate: sqlmap --config {} validate", self.output);
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration document");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Starter document with one environment and the vendor database id provider
    pub(crate) fn starter_document() -> &'static str {
        r#"# sqlmap configuration document

[configuration.properties]
# resource = "db.toml"      # or: url = "https://config.example.com/db.toml"

[configuration.properties.property]
url = "jdbc:h2:mem:app"
username = "app"

[configuration.settings]
cacheEnabled = true
mapUnderscoreToCamelCase = true
defaultExecutorType = "SIMPLE"

[configuration.environments]
default = "development"

[[configuration.environments.environment]]
id = "development"

[configuration.environments.environment.transactionManager]
type = "JDBC"

[configuration.environments.environment.dataSource]
type = "POOLED"

[configuration.environments.environment.dataSource.property]
url = "${url}"
username = "${username}"
poolMaximumActiveConnections = 10

[configuration.databaseIdProvider]
type = "DB_VENDOR"

[configuration.databaseIdProvider.property]
H2 = "h2"
PostgreSQL = "postgres"
MySQL = "mysql"

# [[configuration.mappers.mapper]]
# resource = "mappers/author.toml"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigDocument;
    use crate::core::ConfigBuilder;
    use tempfile::TempDir;

    #[test]
    fn test_starter_document_builds() {
        let document = ConfigDocument::parse(InitArgs::starter_document(), "starter").unwrap();
        let configuration = ConfigBuilder::new(document).build().unwrap();

        assert_eq!(
            configuration.environment().map(|env| env.id()),
            Some("development")
        );
        assert_eq!(configuration.database_id(), Some("h2"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("sqlmap.toml");
        fs::write(&output, "keep").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep");
    }

    #[test]
    fn test_writes_document() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("sqlmap.toml");
        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("[configuration.environments]"));
    }
}
