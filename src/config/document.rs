//! Configuration document model
//!
//! A [`ConfigDocument`] is a parsed TOML document whose top-level
//! `configuration` table is navigated as a tree of [`Node`]s:
//!
//! - scalar entries of a table are the node's **attributes**
//! - sub-tables and array-of-table elements are its **children**, in document order
//! - the reserved `property` sub-table holds its **children as properties**
//!
//! Every value read through a node is expanded against the variable table the
//! node was created with (see [`crate::config::placeholder`]).

use super::placeholder::substitute;
use crate::domain::properties::scalar_text;
use crate::domain::{BuildError, Properties, Result};

/// Name of the root table
pub const ROOT: &str = "configuration";

/// Reserved key holding a node's key/value properties
pub const PROPERTY_KEY: &str = "property";

/// A parsed configuration document
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    name: String,
    root: toml::Table,
}

impl ConfigDocument {
    /// Parses a document from TOML source
    ///
    /// `name` identifies the document in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is not valid TOML or has no
    /// `configuration` table.
    pub fn parse(source: &str, name: impl Into<String>) -> Result<Self> {
        let table: toml::Table = toml::from_str(source)?;
        Self::from_table(table, name)
    }

    /// Wraps an already-parsed TOML table
    pub fn from_table(mut table: toml::Table, name: impl Into<String>) -> Result<Self> {
        let root = match table.remove(ROOT) {
            Some(toml::Value::Table(root)) => root,
            Some(_) => {
                return Err(BuildError::Document(format!(
                    "'{ROOT}' must be a table"
                )))
            }
            None => {
                return Err(BuildError::Document(format!(
                    "document has no '{ROOT}' table"
                )))
            }
        };

        Ok(Self {
            name: name.into(),
            root,
        })
    }

    /// Name of the document, used as the error-context resource
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the root node, expanding placeholders against `variables`
    pub fn root<'a>(&'a self, variables: &'a Properties) -> Node<'a> {
        Node {
            name: ROOT.to_string(),
            path: ROOT.to_string(),
            table: &self.root,
            variables,
        }
    }
}

/// A node of the configuration tree
#[derive(Debug, Clone)]
pub struct Node<'a> {
    name: String,
    path: String,
    table: &'a toml::Table,
    variables: &'a Properties,
}

impl<'a> Node<'a> {
    /// Element name of this node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path of this node from the root, with array indices
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns an attribute value with placeholders expanded
    pub fn attribute(&self, name: &str) -> Option<String> {
        let value = self.table.get(name)?;
        if is_child_value(value) {
            return None;
        }
        scalar_text(value).map(|text| substitute(&text, self.variables))
    }

    /// Returns an attribute value or fails naming the missing attribute
    pub fn required_attribute(&self, name: &str) -> Result<String> {
        self.attribute(name)
            .ok_or_else(|| BuildError::MissingAttribute {
                node: self.path.clone(),
                attribute: name.to_string(),
            })
    }

    /// Every key of this node in document order: attributes, children and `property`
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.table.keys().map(String::as_str)
    }

    /// Returns every attribute as a flat property bag
    pub fn attributes(&self) -> Properties {
        self.table
            .iter()
            .filter(|(_, value)| !is_child_value(value))
            .filter_map(|(key, value)| {
                scalar_text(value).map(|text| (key.clone(), substitute(&text, self.variables)))
            })
            .collect()
    }

    /// Returns the first child with the given name
    pub fn child(&self, name: &str) -> Option<Node<'a>> {
        if name == PROPERTY_KEY {
            return None;
        }
        match self.table.get(name)? {
            toml::Value::Table(table) => Some(self.make_child(name, None, table)),
            toml::Value::Array(items) => items.iter().enumerate().find_map(|(i, item)| {
                item.as_table()
                    .map(|table| self.make_child(name, Some(i), table))
            }),
            _ => None,
        }
    }

    /// Returns every child node in document order
    pub fn children(&self) -> Vec<Node<'a>> {
        let mut children = Vec::new();
        for (key, value) in self.table {
            if key == PROPERTY_KEY {
                continue;
            }
            match value {
                toml::Value::Table(table) => children.push(self.make_child(key, None, table)),
                toml::Value::Array(items) if is_child_value(value) => {
                    for (i, item) in items.iter().enumerate() {
                        if let Some(table) = item.as_table() {
                            children.push(self.make_child(key, Some(i), table));
                        }
                    }
                }
                _ => {}
            }
        }
        children
    }

    /// Returns the `property` sub-table as a flat property bag
    pub fn children_as_properties(&self) -> Properties {
        match self.table.get(PROPERTY_KEY) {
            Some(toml::Value::Table(table)) => table
                .iter()
                .filter_map(|(key, value)| {
                    scalar_text(value)
                        .map(|text| (key.clone(), substitute(&text, self.variables)))
                })
                .collect(),
            _ => Properties::new(),
        }
    }

    fn make_child(&self, name: &str, index: Option<usize>, table: &'a toml::Table) -> Node<'a> {
        let path = match index {
            Some(i) => format!("{}.{}[{}]", self.path, name, i),
            None => format!("{}.{}", self.path, name),
        };
        Node {
            name: name.to_string(),
            path,
            table,
            variables: self.variables,
        }
    }
}

/// Tables and arrays of tables are children, everything else is an attribute
fn is_child_value(value: &toml::Value) -> bool {
    match value {
        toml::Value::Table(_) => true,
        toml::Value::Array(items) => items.first().map(toml::Value::is_table).unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[configuration.settings]
cacheEnabled = true
defaultFetchSize = 100
lazyLoadTriggerMethods = ["equals", "clone"]

[configuration.environments]
default = "dev"

[[configuration.environments.environment]]
id = "dev"
[configuration.environments.environment.dataSource]
type = "POOLED"
[configuration.environments.environment.dataSource.property]
url = "${url}"
username = "sa"

[[configuration.environments.environment]]
id = "prod"
"#;

    #[test]
    fn test_parse_requires_configuration_root() {
        let err = ConfigDocument::parse("[other]\nx = 1", "test.toml").unwrap_err();
        assert!(matches!(err, BuildError::Document(_)));
    }

    #[test]
    fn test_attributes_are_scalars() {
        let doc = ConfigDocument::parse(SAMPLE, "test.toml").unwrap();
        let vars = Properties::new();
        let settings = doc.root(&vars).child("settings").unwrap();

        let attrs = settings.attributes();
        assert_eq!(attrs.get("cacheEnabled"), Some("true"));
        assert_eq!(attrs.get("defaultFetchSize"), Some("100"));
        assert_eq!(attrs.get("lazyLoadTriggerMethods"), Some("equals,clone"));
    }

    #[test]
    fn test_keys_include_children_and_properties() {
        let doc = ConfigDocument::parse(SAMPLE, "test.toml").unwrap();
        let vars = Properties::new();
        let environment = doc
            .root(&vars)
            .child("environments")
            .unwrap()
            .child("environment")
            .unwrap();
        let data_source = environment.child("dataSource").unwrap();

        assert_eq!(environment.keys().collect::<Vec<_>>(), vec!["id", "dataSource"]);
        assert_eq!(data_source.keys().collect::<Vec<_>>(), vec!["type", "property"]);
    }

    #[test]
    fn test_children_preserve_document_order() {
        let doc = ConfigDocument::parse(SAMPLE, "test.toml").unwrap();
        let vars = Properties::new();
        let envs = doc.root(&vars).child("environments").unwrap();

        let children = envs.children();
        let ids: Vec<_> = children.iter().filter_map(|c| c.attribute("id")).collect();
        assert_eq!(ids, vec!["dev", "prod"]);
        assert_eq!(
            children[1].path(),
            "configuration.environments.environment[1]"
        );
        assert_eq!(envs.attribute("default").as_deref(), Some("dev"));
    }

    #[test]
    fn test_children_as_properties_expand_placeholders() {
        let doc = ConfigDocument::parse(SAMPLE, "test.toml").unwrap();
        let vars: Properties = [("url", "postgres://localhost/app")].into_iter().collect();
        let env = doc.root(&vars).child("environments").unwrap().children()[0].clone();
        let ds = env.child("dataSource").unwrap();

        let props = ds.children_as_properties();
        assert_eq!(props.get("url"), Some("postgres://localhost/app"));
        assert_eq!(props.get("username"), Some("sa"));
        assert!(ds.children().is_empty());
    }

    #[test]
    fn test_required_attribute_names_node() {
        let doc = ConfigDocument::parse(SAMPLE, "test.toml").unwrap();
        let vars = Properties::new();
        let env = doc.root(&vars).child("environments").unwrap().children()[1].clone();

        match env.required_attribute("name").unwrap_err() {
            BuildError::MissingAttribute { node, attribute } => {
                assert_eq!(node, "configuration.environments.environment[1]");
                assert_eq!(attribute, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
