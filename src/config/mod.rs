//! Configuration document handling.
//!
//! This module provides the TOML-backed document tree consumed by the
//! configuration pipeline, placeholder substitution and document loading.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sqlmap::config::load_document;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = load_document("sqlmap.toml")?;
//! println!("Loaded {}", document.name());
//! # Ok(())
//! # }
//! ```
//!
//! # Document Structure
//!
//! The top-level `configuration` table holds optional sections; the pipeline,
//! not the document, decides the order in which they are processed:
//!
//! ```toml
//! [configuration.properties]
//! resource = "db.toml"
//!
//! [configuration.settings]
//! cacheEnabled = true
//!
//! [configuration.environments]
//! default = "dev"
//!
//! [[configuration.environments.environment]]
//! id = "dev"
//! [configuration.environments.environment.transactionManager]
//! type = "JDBC"
//! [configuration.environments.environment.dataSource]
//! type = "POOLED"
//! [configuration.environments.environment.dataSource.property]
//! url = "${db.url}"
//!
//! [[configuration.mappers.mapper]]
//! resource = "mappers/author.toml"
//! ```
//!
//! # Placeholders
//!
//! `${name}` in any attribute or property value is replaced with the
//! variable `name`. Variables come from the `properties` section, the
//! resource it references, and the caller.

pub mod document;
pub mod loader;
pub mod placeholder;
pub mod secret;

pub use document::{ConfigDocument, Node};
pub use loader::{load_document, parse_variable_pairs, variables_from_env};
pub use secret::{password, redact_url, Password, PasswordText};
