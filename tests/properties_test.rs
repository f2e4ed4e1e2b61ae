//! Integration tests for variable resolution in the properties section

mod common;

use common::builder;
use sqlmap::domain::BuildError;
use std::fs;
use tempfile::TempDir;

const LAYERED: &str = r#"
[configuration.properties]
resource = "db.toml"

[configuration.properties.property]
a = "1"
"#;

#[test]
fn test_caller_variables_win_over_resource_over_inline() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("db.toml"), "a = \"2\"\nb = \"3\"\n").unwrap();

    let configuration = builder(LAYERED)
        .with_base_dir(dir.path())
        .with_variable("a", "4")
        .build()
        .unwrap();

    assert_eq!(configuration.variables().get("a"), Some("4"));
    assert_eq!(configuration.variables().get("b"), Some("3"));
}

#[test]
fn test_resource_overrides_inline() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("db.toml"), "a = \"2\"\n").unwrap();

    let configuration = builder(LAYERED)
        .with_base_dir(dir.path())
        .build()
        .unwrap();

    assert_eq!(configuration.variables().get("a"), Some("2"));
}

#[test]
fn test_resource_name_may_use_caller_variables() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("prod.toml"), "pool = \"20\"\n").unwrap();

    let configuration = builder(
        r#"
[configuration.properties]
resource = "${profile}.toml"
"#,
    )
    .with_base_dir(dir.path())
    .with_variable("profile", "prod")
    .build()
    .unwrap();

    assert_eq!(configuration.variables().get("pool"), Some("20"));
}

#[test]
fn test_missing_resource() {
    let dir = TempDir::new().unwrap();
    let err = builder(LAYERED)
        .with_base_dir(dir.path())
        .build()
        .unwrap_err();

    assert_eq!(err.context().unwrap().stage.as_deref(), Some("properties"));
    assert!(matches!(err.cause(), BuildError::ResourceNotFound { name } if name == "db.toml"));
}

#[test]
fn test_resource_and_url_conflict_before_loading() {
    // Neither source exists; the conflict is reported first
    let err = builder(
        r#"
[configuration.properties]
resource = "missing.toml"
url = "http://127.0.0.1:1/missing.toml"
"#,
    )
    .build()
    .unwrap_err();

    assert!(matches!(err.cause(), BuildError::ConflictingSource));
}

#[test]
fn test_url_properties() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/config/db.toml")
        .with_status(200)
        .with_body("url = \"jdbc:h2:mem:remote\"\n")
        .create();

    let source = format!(
        "[configuration.properties]\nurl = \"{}/config/db.toml\"\n",
        server.url()
    );
    let configuration = builder(&source).build().unwrap();

    mock.assert();
    assert_eq!(
        configuration.variables().get("url"),
        Some("jdbc:h2:mem:remote")
    );
}

#[test]
fn test_url_not_found() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/db.toml").with_status(404).create();

    let source = format!("[configuration.properties]\nurl = \"{}/db.toml\"\n", server.url());
    let err = builder(&source).build().unwrap_err();

    assert!(matches!(err.cause(), BuildError::ResourceNotFound { .. }));
}

#[test]
fn test_file_url_properties() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.toml");
    fs::write(&path, "username = \"blog\"\n").unwrap();
    let url = url::Url::from_file_path(&path).unwrap();

    let source = format!("[configuration.properties]\nurl = \"{url}\"\n");
    let configuration = builder(&source).build().unwrap();

    assert_eq!(configuration.variables().get("username"), Some("blog"));
}
