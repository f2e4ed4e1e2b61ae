//! Configuration document loading and caller-supplied variables

use super::document::ConfigDocument;
use crate::domain::errors::BuildError;
use crate::domain::result::Result;
use crate::domain::Properties;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that become caller-supplied variables
pub const ENV_VARIABLE_PREFIX: &str = "SQLMAP_VAR_";

/// Loads a configuration document from a TOML file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be found or read
/// - TOML parsing fails
/// - The document has no `configuration` table
///
/// # Examples
///
/// ```no_run
/// use sqlmap::config::loader::load_document;
///
/// let document = load_document("sqlmap.toml").expect("Failed to load document");
/// ```
pub fn load_document(path: impl AsRef<Path>) -> Result<ConfigDocument> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(BuildError::ResourceNotFound {
            name: path.display().to_string(),
        });
    }

    let contents = fs::read_to_string(path).map_err(|e| BuildError::ResourceRead {
        name: path.display().to_string(),
        reason: e.to_string(),
    })?;

    ConfigDocument::parse(&contents, path.display().to_string())
}

/// Collects caller variables from environment variables with the given prefix
///
/// The prefix is stripped and the remainder is used verbatim as the variable
/// name, so `SQLMAP_VAR_db.url` yields the variable `db.url`.
pub fn variables_from_env(prefix: &str) -> Properties {
    std::env::vars()
        .filter_map(|(key, value)| {
            key.strip_prefix(prefix)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), value))
        })
        .collect()
}

/// Parses `key=value` pairs into a property bag
///
/// # Errors
///
/// Returns an error naming the first pair without a `=`.
pub fn parse_variable_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Properties> {
    let mut properties = Properties::new();
    for pair in pairs {
        let pair = pair.as_ref();
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            BuildError::Document(format!("Variable '{pair}' must be written as key=value"))
        })?;
        properties.insert(key.trim(), value);
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_document_missing_file() {
        let result = load_document("nonexistent.toml");
        assert!(matches!(result, Err(BuildError::ResourceNotFound { .. })));
    }

    #[test]
    fn test_load_document_valid() {
        let toml_content = r#"
[configuration.settings]
cacheEnabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let document = load_document(temp_file.path()).unwrap();
        let vars = Properties::new();
        let settings = document.root(&vars).child("settings").unwrap();
        assert_eq!(settings.attribute("cacheEnabled").as_deref(), Some("false"));
    }

    #[test]
    fn test_variables_from_env() {
        std::env::set_var("SQLMAP_TEST_LOADER_user", "sa");
        let vars = variables_from_env("SQLMAP_TEST_LOADER_");
        assert_eq!(vars.get("user"), Some("sa"));
        std::env::remove_var("SQLMAP_TEST_LOADER_user");
    }

    #[test]
    fn test_parse_variable_pairs() {
        let vars = parse_variable_pairs(&["a=1", "url=postgres://h/db?x=y"]).unwrap();
        assert_eq!(vars.get("a"), Some("1"));
        assert_eq!(vars.get("url"), Some("postgres://h/db?x=y"));

        assert!(parse_variable_pairs(&["novalue"]).is_err());
    }
}
