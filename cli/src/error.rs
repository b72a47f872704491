//! Error types and result aliases for tecli.
//!
//! This module provides the error handling system with:
//! - Specific error variants for different failure modes
//! - User-friendly error messages with recovery suggestions
//! - Automatic conversion from module errors and common library errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::profile::ProfileError;

/// Main error type for tecli operations.
#[derive(Error, Debug)]
pub enum TecliError {
    /// Configuration directory or document error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Credential profile error.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Reading from standard input failed or input was closed.
    #[error("Unable to read user input: {0}")]
    Input(String),

    /// A workspace operation was invoked without a flag it needs.
    #[error("Workspace operation '{operation}' requires --{flag}")]
    MissingArgument {
        /// Operation name as typed on the command line.
        operation: String,
        /// Flag name without dashes.
        flag: &'static str,
    },

    /// API returned a non-success status code.
    #[error("API request failed ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// API returned 401 Unauthorized.
    #[error("API server returned unauthorized (401). Check the team token with 'tecli configure read'.")]
    Unauthorized,

    /// API server is unreachable (503 or connection failed).
    #[error("API server is unavailable. Check your network connection or try again later.")]
    ApiUnavailable,

    /// Request timed out.
    #[error("Request timed out. The server may be slow or unreachable. Try again later.")]
    Timeout,

    /// Network error during HTTP request.
    #[error("Network error: {0}. Check your internet connection.")]
    Network(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Data serialization error: {0}")]
    Serialization(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TecliError {
    /// Checks if this error means the named configuration document is missing.
    #[must_use]
    pub const fn is_config_not_found(&self) -> bool {
        matches!(self, Self::Config(ConfigError::NotFound { .. }))
    }
}

/// Result type alias using [`TecliError`].
pub type Result<T> = std::result::Result<T, TecliError>;

impl From<serde_json::Error> for TecliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<reqwest::Error> for TecliError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ApiUnavailable
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for TecliError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => Self::Network(e.to_string()),
        }
    }
}
