//! Property bag
//!
//! Flat, insertion-ordered string key/value data used for placeholder variables,
//! settings and extension properties.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered string-to-string mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Properties(IndexMap<String, String>);

impl Properties {
    /// Creates an empty property bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Copies every entry of `other` into this bag; `other` wins on collisions
    pub fn merge(&mut self, other: &Properties) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Flattens a TOML table into properties
    ///
    /// Nested tables become dotted keys, arrays of scalars are joined with `,`
    /// and other scalars are rendered in their plain textual form.
    pub fn from_toml(table: &toml::Table) -> Self {
        let mut properties = Self::new();
        flatten_into(&mut properties, None, table);
        properties
    }
}

fn flatten_into(properties: &mut Properties, prefix: Option<&str>, table: &toml::Table) {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            toml::Value::Table(nested) => flatten_into(properties, Some(&full_key), nested),
            other => {
                if let Some(text) = scalar_text(other) {
                    properties.insert(full_key, text);
                }
            }
        }
    }
}

/// Renders a scalar (or array of scalars) TOML value as plain text
pub(crate) fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(items) => {
            let parts: Option<Vec<String>> = items
                .iter()
                .map(|item| match item {
                    toml::Value::Array(_) | toml::Value::Table(_) => None,
                    scalar => scalar_text(scalar),
                })
                .collect();
            parts.map(|parts| parts.join(","))
        }
        toml::Value::Table(_) => None,
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
