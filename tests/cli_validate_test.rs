//! Integration tests for the validate command

use sqlmap::cli::commands::validate::ValidateArgs;
use std::fs;
use tempfile::TempDir;

fn args(vars: &[&str]) -> ValidateArgs {
    ValidateArgs {
        environment: None,
        vars: vars.iter().map(|v| v.to_string()).collect(),
        base_dir: None,
        json: true,
    }
}

#[test]
fn test_validate_with_mapper_resources() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("author.toml"),
        "namespace = \"blog.AuthorMapper\"\n[sql]\ncolumns = \"id, name\"\n",
    )
    .unwrap();
    let config = dir.path().join("sqlmap.toml");
    fs::write(
        &config,
        r#"
[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
id = "dev"
transactionManager = { type = "JDBC" }
dataSource = { type = "POOLED", property = { url = "${db.url}" } }

[[configuration.mappers.mapper]]
resource = "author.toml"
"#,
    )
    .unwrap();

    let code = args(&["db.url=jdbc:h2:mem:blog"])
        .execute(&config.to_string_lossy())
        .unwrap();
    assert_eq!(code, 0);
}

#[test]
fn test_validate_reports_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("sqlmap.toml");
    fs::write(&config, "[configuration.settings]\ncacheEnable = true\n").unwrap();

    let code = args(&[]).execute(&config.to_string_lossy()).unwrap();
    assert_eq!(code, 2);
}

#[test]
fn test_validate_rejects_malformed_variable() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("sqlmap.toml");
    fs::write(&config, "[configuration]\n").unwrap();

    let code = args(&["no-equals-sign"])
        .execute(&config.to_string_lossy())
        .unwrap();
    assert_eq!(code, 2);
}
