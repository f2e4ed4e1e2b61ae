//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for sqlmap using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// sqlmap - configuration assembly for the sqlmap data-mapping engine
#[derive(Parser, Debug)]
#[command(name = "sqlmap")]
#[command(version, about, long_about = None)]
#[command(author = "sqlmap Contributors")]
pub struct Cli {
    /// Path to the configuration document
    #[arg(short, long, default_value = "sqlmap.toml", env = "SQLMAP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SQLMAP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the configuration and report whether it is valid
    Validate(commands::validate::ValidateArgs),

    /// Write a starter configuration document
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_validate() {
        let cli = Cli::parse_from(["sqlmap", "validate"]);
        assert_eq!(cli.config, "sqlmap.toml");
        assert!(matches!(cli.command, Commands::Validate(_)));
    }

    #[test]
    fn test_cli_parse_with_config_and_level() {
        let cli = Cli::parse_from([
            "sqlmap",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "validate",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_options() {
        let cli = Cli::parse_from([
            "sqlmap",
            "validate",
            "--environment",
            "prod",
            "--var",
            "user=app",
            "--var",
            "pool=5",
            "--json",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.environment.as_deref(), Some("prod"));
        assert_eq!(args.vars, vec!["user=app", "pool=5"]);
        assert!(args.json);
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["sqlmap", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
