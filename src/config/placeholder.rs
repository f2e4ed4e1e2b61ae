//! `${name}` placeholder substitution
//!
//! Attribute and property values read from the configuration document are
//! expanded against the active variable table. Unknown names are left as they
//! are. Default values (`${name:fallback}`) are opt-in through the
//! [`ENABLE_DEFAULT_VALUE`] variable.

use crate::domain::Properties;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Variable that enables `${name:fallback}` syntax when set to `true`
pub const ENABLE_DEFAULT_VALUE: &str = "sqlmap.parsing.enable-default-value";

/// Variable that overrides the separator between a name and its fallback
pub const DEFAULT_VALUE_SEPARATOR: &str = "sqlmap.parsing.default-value-separator";

const DEFAULT_SEPARATOR: &str = ":";

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").unwrap())
}

/// Expands every `${...}` placeholder in `input`
///
/// # Examples
///
/// ```
/// use sqlmap::config::placeholder::substitute;
/// use sqlmap::domain::Properties;
///
/// let vars: Properties = [("user", "sa")].into_iter().collect();
/// assert_eq!(substitute("name=${user}", &vars), "name=sa");
/// assert_eq!(substitute("${missing}", &vars), "${missing}");
/// ```
pub fn substitute(input: &str, variables: &Properties) -> String {
    if !input.contains("${") {
        return input.to_string();
    }

    let defaults_enabled = variables
        .get(ENABLE_DEFAULT_VALUE)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    let separator = variables
        .get(DEFAULT_VALUE_SEPARATOR)
        .unwrap_or(DEFAULT_SEPARATOR);

    placeholder_pattern()
        .replace_all(input, |caps: &Captures| {
            let content = &caps[1];
            if defaults_enabled {
                if let Some((key, fallback)) = content.split_once(separator) {
                    return variables.get(key).unwrap_or(fallback).to_string();
                }
            }
            match variables.get(content) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_substitutes_known_variables() {
        let v = vars(&[("host", "db"), ("port", "5432")]);
        assert_eq!(
            substitute("postgres://${host}:${port}/app", &v),
            "postgres://db:5432/app"
        );
    }

    #[test]
    fn test_unknown_variables_are_left_verbatim() {
        let v = vars(&[]);
        assert_eq!(substitute("${nope} and ${x:y}", &v), "${nope} and ${x:y}");
    }

    #[test]
    fn test_default_values_require_opt_in() {
        let v = vars(&[(ENABLE_DEFAULT_VALUE, "true")]);
        assert_eq!(substitute("${user:sa}", &v), "sa");

        let v = vars(&[(ENABLE_DEFAULT_VALUE, "true"), ("user", "admin")]);
        assert_eq!(substitute("${user:sa}", &v), "admin");
    }

    #[test]
    fn test_custom_separator() {
        let v = vars(&[
            (ENABLE_DEFAULT_VALUE, "true"),
            (DEFAULT_VALUE_SEPARATOR, "?:"),
        ]);
        assert_eq!(substitute("${db:name?:app}", &v), "app");
    }
}
