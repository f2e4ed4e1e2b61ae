//! Configuration build pipeline
//!
//! [`ConfigBuilder`] runs a fixed, ordered list of [`Stage`]s over a
//! [`ConfigDocument`]. Later stages depend on state produced by earlier ones:
//! variables must be resolved before any other section is read, factories
//! must be installed before settings are applied, and an environment must be
//! active before the database id can be queried.
//!
//! Any stage failure aborts the build. The error is wrapped in
//! [`BuildError::ConfigurationBuild`] carrying the active resource and stage,
//! and no [`Configuration`] is returned.

mod aliases;
mod database_id;
mod environments;
mod factories;
mod mappers;
mod plugins;
mod properties;
mod settings;
mod type_handlers;

use super::configuration::Configuration;
use super::registry::TypeRegistry;
use crate::adapters::{MapperLoader, ResourceLoader, Resources};
use crate::config::{load_document, ConfigDocument, Node};
use crate::domain::{BuildError, ErrorContext, Properties, Result};
use std::path::{Path, PathBuf};

/// State shared by the stages of one build
pub struct BuildContext<'b> {
    /// The aggregate under construction
    pub configuration: Configuration,
    pub resources: Resources,
    /// Target environment id, external or from the document default
    pub environment: Option<String>,
    /// Parsed but not yet applied settings
    pub settings: Properties,
    pub mapper_loader: Option<&'b dyn MapperLoader>,
    /// Resource reported in error context
    resource: String,
}

/// A stage reads its section (if the stage has one and it is present) and
/// updates the build context.
pub type StageFn = fn(Option<&Node<'_>>, &mut BuildContext<'_>) -> Result<()>;

/// One step of the pipeline
#[derive(Clone, Copy)]
pub struct Stage {
    pub name: &'static str,
    /// Top-level section the stage reads, if any
    pub section: Option<&'static str>,
    run: StageFn,
}

const fn stage(name: &'static str, section: Option<&'static str>, run: StageFn) -> Stage {
    Stage { name, section, run }
}

/// The pipeline, in execution order
pub const STAGES: &[Stage] = &[
    stage("properties", Some("properties"), properties::run),
    stage("settings", Some("settings"), settings::parse),
    stage("vfsImpl", None, settings::load_vfs_impl),
    stage("logImpl", None, settings::load_log_impl),
    stage("typeAliases", Some("typeAliases"), aliases::run),
    stage("plugins", Some("plugins"), plugins::run),
    stage("objectFactory", Some("objectFactory"), factories::object_factory),
    stage(
        "objectWrapperFactory",
        Some("objectWrapperFactory"),
        factories::object_wrapper_factory,
    ),
    stage("reflectorFactory", Some("reflectorFactory"), factories::reflector_factory),
    stage("applySettings", None, settings::apply),
    stage("environments", Some("environments"), environments::run),
    stage("databaseIdProvider", Some("databaseIdProvider"), database_id::run),
    stage("typeHandlers", Some("typeHandlers"), type_handlers::run),
    stage("mappers", Some("mappers"), mappers::run),
];

/// Names of the pipeline stages, in execution order
pub fn stage_names() -> impl Iterator<Item = &'static str> {
    STAGES.iter().map(|stage| stage.name)
}

/// Lifecycle of a [`ConfigBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Fresh,
    Built,
    Failed,
}

/// One-shot builder of a [`Configuration`]
///
/// # Example
///
/// ```rust
/// use sqlmap::config::ConfigDocument;
/// use sqlmap::core::ConfigBuilder;
///
/// let document = ConfigDocument::parse(
///     r#"
///     [configuration.settings]
///     cacheEnabled = false
///     "#,
///     "inline",
/// )?;
///
/// let mut builder = ConfigBuilder::new(document);
/// let configuration = builder.build()?;
/// assert!(!configuration.settings.cache_enabled);
/// assert!(builder.build().is_err());
/// # Ok::<(), sqlmap::domain::BuildError>(())
/// ```
pub struct ConfigBuilder {
    document: ConfigDocument,
    types: TypeRegistry,
    variables: Properties,
    environment: Option<String>,
    base_dir: PathBuf,
    resource_loaders: Vec<Box<dyn ResourceLoader>>,
    mapper_loader: Option<Box<dyn MapperLoader>>,
    state: BuildState,
}

impl ConfigBuilder {
    /// Creates a builder over the built-in type registry
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            document,
            types: TypeRegistry::with_builtins(),
            variables: Properties::new(),
            environment: None,
            base_dir: PathBuf::from("."),
            resource_loaders: Vec::new(),
            mapper_loader: None,
            state: BuildState::Fresh,
        }
    }

    /// Loads a document from disk; relative resources resolve against its directory
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = load_document(path)?;
        let base_dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::new(document).with_base_dir(base_dir))
    }

    /// Replaces the type registry
    ///
    /// Start from [`TypeRegistry::with_builtins`] to keep the built-in aliases resolvable.
    pub fn with_types(mut self, types: TypeRegistry) -> Self {
        self.types = types;
        self
    }

    /// Caller-supplied variables; these win over every document-declared value
    pub fn with_variables(mut self, variables: Properties) -> Self {
        self.variables.merge(&variables);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key, value);
        self
    }

    /// Selects the environment, overriding the document default
    pub fn with_environment(mut self, id: impl Into<String>) -> Self {
        self.environment = Some(id.into());
        self
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Adds a resource loader consulted before the file system
    pub fn with_resource_loader(mut self, loader: Box<dyn ResourceLoader>) -> Self {
        self.resource_loaders.push(loader);
        self
    }

    /// Sets the loader that parses resource- and url-based mapper documents
    pub fn with_mapper_loader(mut self, loader: Box<dyn MapperLoader>) -> Self {
        self.mapper_loader = Some(loader);
        self
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Runs the pipeline
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::AlreadyParsed`] if this builder already ran, and
    /// [`BuildError::ConfigurationBuild`] wrapping the first stage failure.
    pub fn build(&mut self) -> Result<Configuration> {
        if self.state != BuildState::Fresh {
            return Err(BuildError::AlreadyParsed);
        }

        let span = tracing::info_span!("build_configuration", resource = self.document.name());
        let _enter = span.enter();

        let mut resources = Resources::new(&self.base_dir);
        for loader in std::mem::take(&mut self.resource_loaders) {
            resources.add_loader(loader);
        }

        let mut ctx = BuildContext {
            configuration: Configuration::new(
                std::mem::take(&mut self.types),
                std::mem::take(&mut self.variables),
            ),
            resources,
            environment: self.environment.clone(),
            settings: Properties::new(),
            mapper_loader: self.mapper_loader.as_deref(),
            resource: self.document.name().to_string(),
        };

        match run_stages(&self.document, &mut ctx) {
            Ok(()) => {
                self.state = BuildState::Built;
                tracing::info!(
                    environment = ctx.configuration.environment().map(|env| env.id()),
                    mappers = ctx.configuration.mappers().len(),
                    "Configuration built"
                );
                Ok(ctx.configuration)
            }
            Err(e) => {
                self.state = BuildState::Failed;
                tracing::error!(error = %e, "Configuration build failed");
                Err(e)
            }
        }
    }
}

fn run_stages(document: &ConfigDocument, ctx: &mut BuildContext<'_>) -> Result<()> {
    for stage in STAGES {
        // Sections are re-read per stage so placeholders see the current variables
        let variables = ctx.configuration.variables().clone();
        let root = document.root(&variables);
        let section = stage.section.and_then(|name| root.child(name));

        tracing::debug!(
            stage = stage.name,
            present = section.is_some(),
            "Running build stage"
        );

        (stage.run)(section.as_ref(), ctx).map_err(|e| {
            e.in_context(ErrorContext::new(ctx.resource.clone()).with_stage(stage.name))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(source: &str) -> ConfigBuilder {
        ConfigBuilder::new(ConfigDocument::parse(source, "test.toml").unwrap())
    }

    #[test]
    fn test_stage_order() {
        let names: Vec<_> = stage_names().collect();
        assert_eq!(
            names,
            vec![
                "properties",
                "settings",
                "vfsImpl",
                "logImpl",
                "typeAliases",
                "plugins",
                "objectFactory",
                "objectWrapperFactory",
                "reflectorFactory",
                "applySettings",
                "environments",
                "databaseIdProvider",
                "typeHandlers",
                "mappers",
            ]
        );
    }

    #[test]
    fn test_empty_document_builds_defaults() {
        let mut builder = builder("[configuration]\n");
        let configuration = builder.build().unwrap();
        assert!(configuration.environment().is_none());
        assert_eq!(builder.state(), BuildState::Built);
    }

    #[test]
    fn test_second_build_fails_after_failure() {
        let mut builder = builder("[configuration.settings]\nbogus = 1\n");
        assert!(builder.build().is_err());
        assert_eq!(builder.state(), BuildState::Failed);
        assert!(matches!(builder.build(), Err(BuildError::AlreadyParsed)));
    }

    #[test]
    fn test_errors_carry_stage_and_resource() {
        let mut builder = builder("[configuration.settings]\nbogus = 1\n");
        let err = builder.build().unwrap_err();
        let context = err.context().unwrap();
        assert_eq!(context.resource, "test.toml");
        assert_eq!(context.stage.as_deref(), Some("settings"));
        assert!(matches!(err.cause(), BuildError::UnknownSetting { key } if key == "bogus"));
    }
}
