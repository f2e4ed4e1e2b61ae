// sqlmap - Configuration assembly for the sqlmap data-mapping engine
// Copyright (c) 2025 sqlmap Contributors
// Licensed under the MIT License

//! # sqlmap - configuration assembly
//!
//! sqlmap builds the validated runtime [`Configuration`](core::Configuration)
//! of a data-mapping engine from a hierarchical TOML document. The build is a
//! one-shot, ordered pipeline: variables first, then settings, extensions,
//! environments, type handlers and finally mappers.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface (`validate`, `init`)
//! - [`core`] - The build pipeline, the assembled configuration and its registries
//! - [`adapters`] - Extension traits and their built-in implementations
//! - [`domain`] - Errors, property bags and typed setting values
//! - [`config`] - Document tree, placeholder substitution and loading
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlmap::config::ConfigDocument;
//! use sqlmap::core::ConfigBuilder;
//!
//! let document = ConfigDocument::parse(
//!     r#"
//!     [configuration.environments]
//!     default = "dev"
//!
//!     [[configuration.environments.environment]]
//!     id = "dev"
//!     transactionManager = { type = "JDBC" }
//!     dataSource = { type = "UNPOOLED", property = { url = "${db.url}" } }
//!     "#,
//!     "inline",
//! )?;
//!
//! let configuration = ConfigBuilder::new(document)
//!     .with_variable("db.url", "jdbc:postgresql://localhost/blog")
//!     .build()?;
//!
//! let environment = configuration.environment().unwrap();
//! assert_eq!(environment.id(), "dev");
//! assert_eq!(
//!     environment.data_source().url(),
//!     Some("jdbc:postgresql://localhost/blog")
//! );
//! # Ok::<(), sqlmap::domain::BuildError>(())
//! ```
//!
//! ## Extensions
//!
//! Interceptors, factories, data sources, type handlers and the like are
//! referenced from the document by alias or type name. Register your own
//! implementations in a [`TypeRegistry`](core::TypeRegistry) and hand it to
//! [`ConfigBuilder::with_types`](core::ConfigBuilder::with_types); see
//! [`adapters`] for an example.
//!
//! ## Error Handling
//!
//! Every failure is a [`domain::BuildError`]. Failures raised while the
//! pipeline runs are wrapped with the resource and stage that produced them.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
