//! Configuration-specific error types.
//!
//! This module defines the closed set of failures the configuration layer can
//! produce:
//! - [`ConfigError`] - lookup, parse, filesystem and serialization failures

use std::path::PathBuf;

use thiserror::Error;

/// Errors specific to configuration directory and document handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No document with the given name exists in any search path.
    #[error("Configuration '{name}' not found. Run 'tecli configure create' to create it.")]
    NotFound {
        /// Name of the document that was looked up.
        name: String,
    },

    /// The document exists but could not be parsed.
    #[error("Unable to parse configuration '{name}' at {}: {cause}", path.display())]
    Parse {
        /// Name of the document.
        name: String,
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message.
        cause: String,
    },

    /// An OS-level failure on the given path.
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An in-memory value could not be marshaled.
    #[error("Unable to serialize configuration: {0}")]
    Serialization(String),

    /// A document key holds a value of a different type than requested.
    #[error("Configuration key '{key}' is not a {expected}")]
    TypeMismatch {
        /// Dotted key that was looked up.
        key: String,
        /// Name of the expected type.
        expected: &'static str,
    },

    /// The platform offers no configuration directory.
    #[error("Cannot determine configuration directory")]
    NoConfigDir,
}

impl ConfigError {
    /// Wraps an IO error with the path it occurred on.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Checks if this is a "not found" error that bootstrapping can recover from.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
