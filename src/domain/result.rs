//! Result type alias for sqlmap

use super::errors::BuildError;

/// Result type alias for configuration assembly
///
/// # Examples
///
/// ```
/// use sqlmap::domain::result::Result;
/// use sqlmap::domain::errors::BuildError;
///
/// fn failing_function() -> Result<()> {
///     Err(BuildError::NoEnvironmentSpecified)
/// }
/// ```
pub type Result<T> = std::result::Result<T, BuildError>;
