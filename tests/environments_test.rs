//! Integration tests for environment selection and the database id

mod common;

use common::builder;
use sqlmap::domain::{BuildError, FactoryKind};

const THREE_ENVIRONMENTS: &str = r#"
[configuration.environments]
default = "test"

[[configuration.environments.environment]]
id = "dev"
transactionManager = { type = "JDBC" }
dataSource = { type = "UNPOOLED", property = { url = "jdbc:h2:mem:dev" } }

[[configuration.environments.environment]]
id = "test"
transactionManager = { type = "MANAGED", property = { closeConnection = false } }
dataSource = { type = "POOLED", property = { url = "jdbc:postgresql://test/blog" } }

[[configuration.environments.environment]]
id = "prod"
transactionManager = { type = "JDBC" }
dataSource = { type = "POOLED", property = { url = "${prod.url}" } }
"#;

#[test]
fn test_document_default_environment() {
    let configuration = builder(THREE_ENVIRONMENTS).build().unwrap();
    let environment = configuration.environment().unwrap();

    assert_eq!(environment.id(), "test");
    assert_eq!(
        environment.data_source().url(),
        Some("jdbc:postgresql://test/blog")
    );
    assert!(!environment.transaction_factory().closes_connection());
}

#[test]
fn test_external_environment_overrides_default() {
    let configuration = builder(THREE_ENVIRONMENTS)
        .with_environment("prod")
        .with_variable("prod.url", "jdbc:mysql://prod/blog")
        .build()
        .unwrap();
    let environment = configuration.environment().unwrap();

    assert_eq!(environment.id(), "prod");
    assert_eq!(environment.data_source().url(), Some("jdbc:mysql://prod/blog"));
    assert!(environment.transaction_factory().closes_connection());
}

#[test]
fn test_unmatched_target_leaves_no_environment() {
    let configuration = builder(THREE_ENVIRONMENTS)
        .with_environment("staging")
        .build()
        .unwrap();
    assert!(configuration.environment().is_none());
}

#[test]
fn test_no_environment_specified() {
    let err = builder(
        r#"
[configuration.environments]

[[configuration.environments.environment]]
id = "dev"
transactionManager = { type = "JDBC" }
dataSource = { type = "UNPOOLED" }
"#,
    )
    .build()
    .unwrap_err();

    assert_eq!(err.context().unwrap().stage.as_deref(), Some("environments"));
    assert!(matches!(err.cause(), BuildError::NoEnvironmentSpecified));
}

#[test]
fn test_empty_environments_section_without_default() {
    let err = builder("[configuration.environments]\n").build().unwrap_err();
    assert!(matches!(err.cause(), BuildError::NoEnvironmentSpecified));

    // An external target satisfies the section even with nothing declared
    let configuration = builder("[configuration.environments]\n")
        .with_environment("dev")
        .build()
        .unwrap();
    assert!(configuration.environment().is_none());
}

#[test]
fn test_environment_requires_id() {
    let err = builder(
        r#"
[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
transactionManager = { type = "JDBC" }
dataSource = { type = "UNPOOLED" }
"#,
    )
    .build()
    .unwrap_err();

    assert!(matches!(err.cause(), BuildError::MissingEnvironmentId));
}

#[test]
fn test_unselected_environment_must_still_be_complete() {
    let err = builder(
        r#"
[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
id = "dev"
transactionManager = { type = "JDBC" }
dataSource = { type = "UNPOOLED" }

[[configuration.environments.environment]]
id = "prod"
transactionManager = { type = "JDBC" }
"#,
    )
    .build()
    .unwrap_err();

    assert!(matches!(
        err.cause(),
        BuildError::MissingFactory { environment, kind: FactoryKind::DataSource } if environment == "prod"
    ));
}

#[test]
fn test_missing_transaction_manager() {
    let err = builder(
        r#"
[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
id = "dev"
dataSource = { type = "UNPOOLED" }
"#,
    )
    .build()
    .unwrap_err();

    assert!(matches!(
        err.cause(),
        BuildError::MissingFactory { kind: FactoryKind::Transaction, .. }
    ));
}

#[test]
fn test_unknown_data_source_property() {
    let err = builder(
        r#"
[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
id = "dev"
transactionManager = { type = "JDBC" }
dataSource = { type = "POOLED", property = { poolMaximumFun = "1" } }
"#,
    )
    .build()
    .unwrap_err();

    match err.cause() {
        BuildError::Instantiation { reason, .. } => {
            assert!(reason.contains("poolMaximumFun"), "{reason}")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_vendor_database_id() {
    let source = format!(
        "{THREE_ENVIRONMENTS}\n{}",
        r#"
[configuration.databaseIdProvider]
type = "DB_VENDOR"

[configuration.databaseIdProvider.property]
PostgreSQL = "postgres"
MySQL = "mysql"
"#
    );
    let configuration = builder(&source).build().unwrap();
    assert_eq!(configuration.database_id(), Some("postgres"));
}

#[test]
fn test_legacy_vendor_alias_without_properties() {
    let source = format!(
        "{THREE_ENVIRONMENTS}\n[configuration.databaseIdProvider]\ntype = \"VENDOR\"\n"
    );
    let configuration = builder(&source).build().unwrap();
    assert_eq!(configuration.database_id(), Some("PostgreSQL"));
}

#[test]
fn test_database_id_without_environment_is_absent() {
    let configuration = builder(
        r#"
[configuration.databaseIdProvider]
type = "DB_VENDOR"
"#,
    )
    .build()
    .unwrap();

    assert!(configuration.environment().is_none());
    assert!(configuration.database_id().is_none());
}

#[test]
fn test_database_id_provider_must_resolve_without_environment() {
    let err = builder("[configuration.databaseIdProvider]\ntype = \"NOPE\"\n")
        .build()
        .unwrap_err();
    assert!(matches!(err.cause(), BuildError::UnresolvedType { .. }));
}

#[test]
fn test_unreachable_database() {
    let err = builder(
        r#"
[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
id = "dev"
transactionManager = { type = "JDBC" }
dataSource = { type = "blog.support.OfflineDataSourceFactory" }

[configuration.databaseIdProvider]
type = "DB_VENDOR"
"#,
    )
    .build()
    .unwrap_err();

    assert_eq!(
        err.context().unwrap().stage.as_deref(),
        Some("databaseIdProvider")
    );
    assert!(matches!(err.cause(), BuildError::DataSource(reason) if reason.contains("refused")));
}
