//! Locating, reading and writing configuration documents.
//!
//! [`ConfigLoader`] searches an ordered list of directories for a named
//! document. The first directory containing a match wins; documents are never
//! merged across directories.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_yaml::Value;

use crate::config::document::Document;
use crate::config::error::ConfigError;
use crate::error::Result;

/// Directory, relative to the working directory, holding bundled templates.
pub const TEMPLATE_DIR: &str = "tecli";

/// Serialization formats a document can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl ConfigFormat {
    /// File extensions probed for this format, in order.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Yaml => &["yaml", "yml"],
            Self::Json => &["json"],
            Self::Toml => &["toml"],
        }
    }

    fn parse(self, contents: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str::<serde_json::Value>(contents)
                .map_err(|e| e.to_string())
                .and_then(|v| serde_yaml::to_value(v).map_err(|e| e.to_string())),
            Self::Toml => toml::from_str::<toml::Value>(contents)
                .map_err(|e| e.to_string())
                .and_then(|v| serde_yaml::to_value(v).map_err(|e| e.to_string())),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

impl TryFrom<&str> for ConfigFormat {
    type Error = String;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(format!("Unknown configuration format: {s}")),
        }
    }
}

/// Loads named documents from an ordered list of search paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a directory to the search list.
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Loads the first document called `name` found in the search paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no search path holds the document,
    /// or [`ConfigError::Parse`] if the first match cannot be parsed.
    pub fn load(&self, name: &str, format: ConfigFormat) -> Result<Document> {
        let path = self
            .find(name, format)
            .ok_or_else(|| ConfigError::NotFound {
                name: name.to_string(),
            })?;

        read_document(&path, name, format)
    }

    /// Returns the file the loader would read for `name`, if any.
    #[must_use]
    pub fn find(&self, name: &str, format: ConfigFormat) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .flat_map(|dir| {
                format
                    .extensions()
                    .iter()
                    .map(move |ext| dir.join(format!("{name}.{ext}")))
            })
            .find(|candidate| candidate.is_file())
    }

    /// Loads `name` from exactly one directory.
    pub fn load_from(dir: &Path, name: &str, format: ConfigFormat) -> Result<Document> {
        Self::new().with_search_path(dir).load(name, format)
    }

    /// Loads a bundled YAML template from [`TEMPLATE_DIR`].
    ///
    /// Templates are rewritten after being read, so on Unix the file is made
    /// world-writable first.
    pub fn load_template(name: &str) -> Result<Document> {
        Self::load_template_in(Path::new(TEMPLATE_DIR), name)
    }

    fn load_template_in(dir: &Path, name: &str) -> Result<Document> {
        let loader = Self::new().with_search_path(dir);
        let path = loader
            .find(name, ConfigFormat::Yaml)
            .ok_or_else(|| ConfigError::NotFound {
                name: name.to_string(),
            })?;

        make_world_writable(&path)?;
        read_document(&path, name, ConfigFormat::Yaml)
    }
}

/// Marshals `value` to YAML and writes it to `path`, replacing the file.
///
/// The file is rewritten in place; a crash mid-write can leave it truncated.
///
/// # Errors
///
/// Returns [`ConfigError::Serialization`] if `value` cannot be represented as
/// YAML, or [`ConfigError::Filesystem`] if the write fails.
pub fn write_yaml<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let contents =
        serde_yaml::to_string(value).map_err(|e| ConfigError::Serialization(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ConfigError::filesystem(path, e))?;
    tracing::debug!(path = %path.display(), "wrote document");
    Ok(())
}

fn read_document(path: &Path, name: &str, format: ConfigFormat) -> Result<Document> {
    tracing::debug!(path = %path.display(), %format, "reading document");

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::filesystem(path, e))?;
    let parse_error = |cause: String| ConfigError::Parse {
        name: name.to_string(),
        path: path.to_path_buf(),
        cause,
    };

    let value = format.parse(&contents).map_err(parse_error)?;
    let document = Document::from_value(value)
        .ok_or_else(|| parse_error("top level must be a mapping".to_string()))?;

    Ok(document.with_source(name, path))
}

#[cfg(unix)]
fn make_world_writable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o777))
        .map_err(|e| ConfigError::filesystem(path, e))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_world_writable(path: &Path) -> Result<()> {
    let mut permissions = fs::metadata(path)
        .map_err(|e| ConfigError::filesystem(path, e))?
        .permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions).map_err(|e| ConfigError::filesystem(path, e))?;
    Ok(())
}
