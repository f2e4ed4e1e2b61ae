//! Domain error types
//!
//! This module defines the error hierarchy for configuration assembly.
//! All errors are domain-specific and don't expose third-party types.

use std::fmt;
use thiserror::Error;

/// Boxed error returned by user-supplied extension code (factories, property
/// setters, mapper loaders).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The factory sub-section an environment declaration is missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryKind {
    /// `transactionManager`
    Transaction,
    /// `dataSource`, the connection-source factory
    DataSource,
}

impl FactoryKind {
    /// Name of the document node that declares this factory
    pub fn section(&self) -> &'static str {
        match self {
            FactoryKind::Transaction => "transactionManager",
            FactoryKind::DataSource => "dataSource",
        }
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryKind::Transaction => write!(f, "TransactionFactory"),
            FactoryKind::DataSource => write!(f, "DataSourceFactory"),
        }
    }
}

/// Where the pipeline was when a failure happened
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Resource being processed (the configuration document or a mapper resource)
    pub resource: String,

    /// Pipeline stage that was running
    pub stage: Option<String>,
}

impl ErrorContext {
    /// Creates a context for the given resource
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            stage: None,
        }
    }

    /// Sets the active stage
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.stage {
            Some(stage) => write!(f, "resource '{}', stage '{}'", self.resource, stage),
            None => write!(f, "resource '{}'", self.resource),
        }
    }
}

/// Main configuration build error type
#[derive(Debug, Error)]
pub enum BuildError {
    /// The builder was already used
    #[error("Each configuration builder can only be used once")]
    AlreadyParsed,

    /// A settings key with no corresponding mutator
    #[error("The setting '{key}' is not known. Make sure you spelled it correctly (case sensitive)")]
    UnknownSetting { key: String },

    /// A settings value that does not convert into the target type
    #[error("Invalid value '{value}' for setting '{key}': {reason}")]
    InvalidSettingValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Both `resource` and `url` given on the properties section
    #[error(
        "The properties section cannot specify both a url and a resource based property file reference. Please specify one or the other"
    )]
    ConflictingSource,

    /// Neither an alias nor a registered type matches
    #[error("Could not resolve type alias '{name}'")]
    UnresolvedType { name: String },

    /// An extension could not be constructed or configured
    #[error("Error instantiating '{type_name}': {reason}")]
    Instantiation { type_name: String, reason: String },

    /// An alias is already bound to another type
    #[error("The alias '{alias}' is already mapped to the value '{existing}'")]
    AliasConflict { alias: String, existing: String },

    /// The type of a `typeAlias` entry could not be loaded
    #[error("Error registering typeAlias for '{alias}'. Cause: {source}")]
    AliasRegistration {
        alias: String,
        #[source]
        source: Box<BuildError>,
    },

    /// Neither an external target nor a document default selects an environment
    #[error("No environment specified")]
    NoEnvironmentSpecified,

    /// An environment node without an id
    #[error("Environment requires an id attribute")]
    MissingEnvironmentId,

    /// An environment without one of its factory sub-sections
    #[error("Environment '{environment}' declaration requires a {kind}")]
    MissingFactory {
        environment: String,
        kind: FactoryKind,
    },

    /// A mapper entry naming none, or more than one, of resource/url/class
    #[error("A mapper element may only specify a url, resource or class, but not more than one")]
    ConflictingMapperReference,

    /// A mandatory attribute is absent
    #[error("Missing attribute '{attribute}' on '{node}'")]
    MissingAttribute { node: String, attribute: String },

    /// An attribute value that does not convert into its target type
    #[error("Invalid value '{value}' for attribute '{attribute}' on '{node}': {reason}")]
    InvalidAttribute {
        node: String,
        attribute: String,
        value: String,
        reason: String,
    },

    /// A class-based mapper reference that is not a mapper type
    #[error("Type '{type_name}' is not a mapper")]
    NotAMapper { type_name: String },

    /// A mapper type registered twice
    #[error("Type '{type_name}' is already known to the mapper registry")]
    DuplicateMapper { type_name: String },

    /// A mapper resource was declared but no mapper loader is available
    #[error("No mapper loader configured to load '{resource}'")]
    MissingMapperLoader { resource: String },

    /// The mapper loader rejected a mapper document
    #[error("Failed to load mapper '{resource}': {reason}")]
    MapperLoad { resource: String, reason: String },

    /// A named resource or URL could not be found
    #[error("Could not find resource '{name}'")]
    ResourceNotFound { name: String },

    /// A resource was found but could not be read or decoded
    #[error("Failed to read resource '{name}': {reason}")]
    ResourceRead { name: String, reason: String },

    /// The configuration document is malformed
    #[error("Document error: {0}")]
    Document(String),

    /// The connection source failed to answer
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Umbrella for any failure during the pipeline run
    #[error("Error building configuration in {context}. Cause: {source}")]
    ConfigurationBuild {
        context: ErrorContext,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    /// Wraps this error with positional context
    pub fn in_context(self, context: ErrorContext) -> Self {
        BuildError::ConfigurationBuild {
            context,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`BuildError::ConfigurationBuild`]
    pub fn cause(&self) -> &BuildError {
        match self {
            BuildError::ConfigurationBuild { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Returns the positional context if this error carries one
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            BuildError::ConfigurationBuild { context, .. } => Some(context),
            _ => None,
        }
    }

    pub(crate) fn instantiation(type_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        BuildError::Instantiation {
            type_name: type_name.into(),
            reason: reason.to_string(),
        }
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for BuildError {
    fn from(err: toml::de::Error) -> Self {
        BuildError::Document(format!("TOML parse error: {err}"))
    }
}
