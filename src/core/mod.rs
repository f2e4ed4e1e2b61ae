//! Configuration assembly.
//!
//! This module turns a [`ConfigDocument`](crate::config::ConfigDocument) into a
//! validated [`Configuration`].
//!
//! # Modules
//!
//! - [`builder`] - the one-shot, ordered build pipeline
//! - [`configuration`] - the assembled aggregate and its settings
//! - [`registry`] - type, alias, type handler and mapper registries
//! - [`settings`] - the table of recognised settings
//!
//! # Build Order
//!
//! 1. **Properties**: resolve the variable table used for `${...}` placeholders
//! 2. **Settings**: parse and validate (not yet applied)
//! 3. **vfsImpl / logImpl**: install resource loaders and pick the log implementation
//! 4. **Type aliases, plugins, object/wrapper/reflector factories**
//! 5. **Apply settings**, with documented defaults for absent keys
//! 6. **Environments**: select and build the target environment
//! 7. **Database id**: query the active data source, if any
//! 8. **Type handlers**
//! 9. **Mappers**: delegate mapper documents to the [`MapperLoader`](crate::adapters::MapperLoader)
//!
//! # Example
//!
//! ```rust,no_run
//! use sqlmap::core::ConfigBuilder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ConfigBuilder::from_path("sqlmap.toml")?
//!     .with_environment("prod")
//!     .with_variable("password", "s3cret");
//!
//! let configuration = builder.build()?;
//! println!("database id: {:?}", configuration.database_id());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod configuration;
pub mod registry;
pub mod settings;

pub use builder::{stage_names, BuildContext, BuildState, ConfigBuilder, Stage, STAGES};
pub use configuration::{Configuration, Environment, Settings};
pub use registry::{TypeDescriptor, TypeKind, TypeRegistry};
