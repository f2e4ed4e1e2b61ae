//! Resource resolution
//!
//! Named resources are looked up through an ordered chain of
//! [`ResourceLoader`]s: loaders installed through the `vfsImpl` setting come
//! first, the file-system loader rooted at the base directory comes last.
//! URL resources are read from disk (`file:`) or fetched over HTTP(S).

use super::traits::{Configurable, Extension, ResourceLoader};
use crate::domain::{BoxError, BuildError, Properties, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

/// Loads resources relative to a base directory
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    base_dir: PathBuf,
}

impl FileSystemLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Default for FileSystemLoader {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Extension for FileSystemLoader {
    fn as_configurable(&mut self) -> Option<&mut dyn Configurable> {
        Some(self)
    }
}

impl Configurable for FileSystemLoader {
    fn set_properties(&mut self, properties: Properties) -> std::result::Result<(), BoxError> {
        for (key, value) in properties.iter() {
            match key {
                "baseDir" => self.base_dir = PathBuf::from(value),
                other => return Err(format!("Unknown resource loader property: {other}").into()),
            }
        }
        Ok(())
    }
}

impl ResourceLoader for FileSystemLoader {
    fn load(&self, name: &str) -> std::result::Result<Option<Vec<u8>>, BoxError> {
        match fs::read(self.base_dir.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Resource resolution service used while assembling a configuration
#[derive(Debug)]
pub struct Resources {
    loaders: Vec<Box<dyn ResourceLoader>>,
    fallback: FileSystemLoader,
}

impl Resources {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            loaders: Vec::new(),
            fallback: FileSystemLoader::new(base_dir),
        }
    }

    /// Adds a loader ahead of the file-system fallback
    pub fn add_loader(&mut self, loader: Box<dyn ResourceLoader>) {
        self.loaders.push(loader);
    }

    pub fn base_dir(&self) -> &Path {
        self.fallback.base_dir()
    }

    /// Reads a named resource
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ResourceNotFound`] when no loader knows the name
    /// and [`BuildError::ResourceRead`] when a loader fails.
    pub fn resource_as_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let chain = self
            .loaders
            .iter()
            .map(|loader| loader.as_ref() as &dyn ResourceLoader)
            .chain(std::iter::once(&self.fallback as &dyn ResourceLoader));

        for loader in chain {
            match loader.load(name) {
                Ok(Some(bytes)) => {
                    tracing::debug!(resource = name, loader = ?loader, "Loaded resource");
                    return Ok(bytes);
                }
                Ok(None) => continue,
                Err(err) => {
                    return Err(BuildError::ResourceRead {
                        name: name.to_string(),
                        reason: err.to_string(),
                    })
                }
            }
        }

        Err(BuildError::ResourceNotFound {
            name: name.to_string(),
        })
    }

    /// Reads a `file:` or `http(s):` URL
    pub fn url_as_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let read_error = |reason: String| BuildError::ResourceRead {
            name: url.to_string(),
            reason,
        };
        let parsed = Url::parse(url).map_err(|e| read_error(e.to_string()))?;

        match parsed.scheme() {
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|_| read_error("not a local file path".to_string()))?;
                fs::read(&path).map_err(|err| match err.kind() {
                    ErrorKind::NotFound => BuildError::ResourceNotFound {
                        name: url.to_string(),
                    },
                    _ => read_error(err.to_string()),
                })
            }
            "http" | "https" => {
                tracing::debug!(url, "Fetching URL resource");
                let response =
                    reqwest::blocking::get(parsed).map_err(|e| read_error(e.to_string()))?;
                if response.status() == reqwest::StatusCode::NOT_FOUND {
                    return Err(BuildError::ResourceNotFound {
                        name: url.to_string(),
                    });
                }
                let response = response
                    .error_for_status()
                    .map_err(|e| read_error(e.to_string()))?;
                let bytes = response.bytes().map_err(|e| read_error(e.to_string()))?;
                Ok(bytes.to_vec())
            }
            other => Err(read_error(format!("unsupported URL scheme '{other}'"))),
        }
    }

    /// Reads a named resource as a TOML property file
    pub fn resource_as_properties(&self, name: &str) -> Result<Properties> {
        let bytes = self.resource_as_bytes(name)?;
        parse_properties(name, &bytes)
    }

    /// Reads a URL as a TOML property file
    pub fn url_as_properties(&self, url: &str) -> Result<Properties> {
        let bytes = self.url_as_bytes(url)?;
        parse_properties(url, &bytes)
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new(".")
    }
}

fn parse_properties(name: &str, bytes: &[u8]) -> Result<Properties> {
    let read_error = |reason: String| BuildError::ResourceRead {
        name: name.to_string(),
        reason,
    };
    let text = std::str::from_utf8(bytes).map_err(|e| read_error(e.to_string()))?;
    let table: toml::Table = toml::from_str(text).map_err(|e| read_error(e.to_string()))?;
    Ok(Properties::from_toml(&table))
}
