//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - a console layer filtered by level or `RUST_LOG`
//! - optional JSON file logging with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use sqlmap::logging::{init_logging, LoggingConfig};
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

use thiserror::Error;

/// Errors raised while setting up logging
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLevel(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly")]
    InvalidRotation(String),

    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Logging configuration of the command-line tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Write JSON logs to files under `local_path`
    pub local_enabled: bool,
    pub local_path: String,
    /// `daily` or `hourly`
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "logs".to_string(),
            local_rotation: "daily".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), LoggingError> {
        match self.local_rotation.as_str() {
            "daily" | "hourly" => Ok(()),
            other => Err(LoggingError::InvalidRotation(other.to_string())),
        }
    }
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use sqlmap::log_error_with_context;
/// use sqlmap::domain::BuildError;
///
/// let error = BuildError::NoEnvironmentSpecified;
/// log_error_with_context!(&error, "sqlmap.toml");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
