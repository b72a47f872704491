//! Platform-specific path utilities for tecli.

use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::settings::env;
use crate::error::Result;

/// Directory name used under the platform configuration directory.
const APP_NAME: &str = "tecli";

/// Base name of the credentials document.
pub const CREDENTIALS_NAME: &str = "credentials";

/// Base name of the general configuration document.
pub const CONFIGURATIONS_NAME: &str = "configurations";

/// File type shared by the credentials and configuration documents.
pub const DEFAULT_TYPE: &str = "yaml";

/// Where tecli keeps its files.
///
/// Built once per invocation and passed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Directory holding every tecli document.
    pub configurations_dir: PathBuf,
    /// Path of the general configuration document.
    pub configurations_path: PathBuf,
    /// Base name of the credentials document.
    pub credentials_name: String,
    /// File type (extension) of the credentials document.
    pub credentials_type: String,
    /// Path of the credentials document.
    pub credentials_path: PathBuf,
}

impl AppInfo {
    /// Builds the layout rooted at `dir`.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        let configurations_dir = dir.into();
        let configurations_path =
            configurations_dir.join(format!("{CONFIGURATIONS_NAME}.{DEFAULT_TYPE}"));
        let credentials_path = configurations_dir.join(format!("{CREDENTIALS_NAME}.{DEFAULT_TYPE}"));

        Self {
            configurations_dir,
            configurations_path,
            credentials_name: CREDENTIALS_NAME.to_string(),
            credentials_type: DEFAULT_TYPE.to_string(),
            credentials_path,
        }
    }

    /// Resolves the layout for this process.
    ///
    /// An explicit directory wins, then `TECLI_CONFIG_DIR`, then the platform
    /// default:
    /// - Linux: `~/.config/tecli`
    /// - macOS: `~/Library/Application Support/tecli`
    /// - Windows: `%APPDATA%\tecli`
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::with_dir(dir));
        }

        if let Ok(dir) = std::env::var(env::CONFIG_DIR) {
            if !dir.is_empty() {
                return Ok(Self::with_dir(dir));
            }
        }

        Ok(Self::with_dir(config_dir()?))
    }
}

/// Get the platform configuration directory for tecli.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_dir_derives_all_paths() {
        let app = AppInfo::with_dir("/tmp/tecli-test");

        assert_eq!(app.configurations_dir, PathBuf::from("/tmp/tecli-test"));
        assert_eq!(
            app.credentials_path,
            PathBuf::from("/tmp/tecli-test/credentials.yaml")
        );
        assert_eq!(
            app.configurations_path,
            PathBuf::from("/tmp/tecli-test/configurations.yaml")
        );
        assert_eq!(app.credentials_name, "credentials");
        assert_eq!(app.credentials_type, "yaml");
    }

    #[test]
    fn resolve_prefers_explicit_dir() {
        let app = AppInfo::resolve(Some(Path::new("/opt/tecli"))).unwrap();
        assert_eq!(app.configurations_dir, PathBuf::from("/opt/tecli"));
    }

    #[test]
    fn resolve_is_deterministic() {
        let a = AppInfo::resolve(Some(Path::new("/opt/tecli"))).unwrap();
        let b = AppInfo::resolve(Some(Path::new("/opt/tecli"))).unwrap();
        assert_eq!(a, b);
    }
}
