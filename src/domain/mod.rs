//! Domain types for sqlmap.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`BuildError`], [`ErrorContext`], [`FactoryKind`])
//! - **Result type alias** ([`Result`])
//! - **Property bag** ([`Properties`])
//! - **Typed settings** ([`AutoMappingBehavior`], [`ExecutorType`], [`JdbcType`], ...)
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BuildError>`]. Failures raised
//! inside the pipeline reach the caller wrapped in
//! [`BuildError::ConfigurationBuild`]; use [`BuildError::cause`] to inspect the
//! underlying error:
//!
//! ```rust
//! use sqlmap::domain::{BuildError, ErrorContext};
//!
//! let err = BuildError::NoEnvironmentSpecified.in_context(ErrorContext::new("sqlmap.toml"));
//! assert!(matches!(err.cause(), BuildError::NoEnvironmentSpecified));
//! ```

pub mod errors;
pub mod jdbc_type;
pub mod properties;
pub mod result;
pub mod types;

pub use errors::{BoxError, BuildError, ErrorContext, FactoryKind};
pub use jdbc_type::JdbcType;
pub use properties::Properties;
pub use result::Result;
pub use types::{
    AutoMappingBehavior, AutoMappingUnknownColumnBehavior, ExecutorType, LocalCacheScope,
    LogImpl, ResultSetType, UnknownSymbol,
};
