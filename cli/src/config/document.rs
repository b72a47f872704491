//! Format-agnostic configuration documents.
//!
//! A [`Document`] is an ordered mapping of string keys to YAML values. YAML,
//! JSON and TOML files all decode into the same shape, so callers never care
//! which format was on disk.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use crate::config::error::ConfigError;
use crate::error::Result;

/// An ordered key-value document loaded from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Mapping,
    source: Option<Source>,
}

/// The file a document was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Source {
    name: String,
    path: PathBuf,
}

impl Document {
    /// Wraps a parsed value. An empty file (`null`) becomes an empty document.
    ///
    /// Returns `None` when the top level is not a mapping.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::default()),
            Value::Mapping(root) => Some(Self { root, source: None }),
            _ => None,
        }
    }

    /// Records that this document is `name`, read from `path`.
    #[must_use]
    pub fn with_source(mut self, name: &str, path: &Path) -> Self {
        self.source = Some(Source {
            name: name.to_string(),
            path: path.to_path_buf(),
        });
        self
    }

    /// File the document was read from, if it came from disk.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.source.as_ref().map(|source| source.path.as_path())
    }

    /// Returns `true` if the document has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Top-level keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.root.keys().filter_map(Value::as_str)
    }

    /// Looks up a key; dots walk into nested mappings (`api.base_url`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.root.get(parts.next()?)?;
        for part in parts {
            current = current.as_mapping()?.get(part)?;
        }
        Some(current)
    }

    /// Returns `true` if `key` resolves to a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        self.typed(key, "string", Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.typed(key, "boolean", Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        self.typed(key, "integer", Value::as_i64)
    }

    pub fn get_sequence(&self, key: &str) -> Result<Option<&Vec<Value>>> {
        self.typed(key, "sequence", Value::as_sequence)
    }

    pub fn get_mapping(&self, key: &str) -> Result<Option<&Mapping>> {
        self.typed(key, "mapping", Value::as_mapping)
    }

    /// Converts the whole document into a typed value.
    ///
    /// A document read from disk whose shape doesn't fit `T` is reported as
    /// [`ConfigError::Parse`] against that file.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        serde_yaml::from_value(Value::Mapping(self.root.clone())).map_err(|e| {
            let cause = e.to_string();
            match &self.source {
                Some(source) => ConfigError::Parse {
                    name: source.name.clone(),
                    path: source.path.clone(),
                    cause,
                },
                None => ConfigError::Serialization(cause),
            }
            .into()
        })
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        cast: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => cast(value).map(Some).ok_or_else(|| {
                ConfigError::TypeMismatch {
                    key: key.to_string(),
                    expected,
                }
                .into()
            }),
        }
    }
}
