//! Configuration management for tecli.
//!
//! Owns the configuration directory: where it lives, how it is bootstrapped,
//! and how the documents inside it are read and written.

pub mod document;
pub mod error;
pub mod fs;
pub mod loader;
pub mod paths;
pub mod settings;

pub use document::Document;
pub use error::ConfigError;
pub use loader::{write_yaml, ConfigFormat, ConfigLoader};
pub use paths::AppInfo;
pub use settings::{ApiConfig, TecliConfig};

use crate::error::Result;

/// Load `configurations.yaml` from the configuration directory.
///
/// If the document doesn't exist, returns default configuration.
pub fn load_config(app: &AppInfo) -> Result<TecliConfig> {
    let loader = ConfigLoader::new().with_search_path(&app.configurations_dir);
    tracing::debug!(path = %app.configurations_path.display(), "loading configuration");

    let config = match loader.load(paths::CONFIGURATIONS_NAME, ConfigFormat::Yaml) {
        Ok(doc) => doc.deserialize::<TecliConfig>()?,
        Err(e) if e.is_config_not_found() => TecliConfig::default(),
        Err(e) => return Err(e),
    };

    Ok(config.with_env_overrides())
}

/// Ensure the configuration directory and an empty credentials file exist.
///
/// Returns `true` if anything had to be created.
pub fn bootstrap(app: &AppInfo) -> Result<bool> {
    let (created_dir, dir) = fs::create_dir(&app.configurations_dir)?;
    if created_dir {
        tracing::debug!(path = %dir.display(), "created configuration directory");
    }

    let created_file = if fs::file_exists(&app.credentials_path) {
        false
    } else {
        fs::create_empty_file(&app.credentials_path)?;
        true
    };

    Ok(created_dir || created_file)
}

/// Delete tecli's documents from the configuration directory.
///
/// Only `credentials` and `configurations` files are removed. The directory
/// itself goes only when nothing else is left in it.
///
/// Returns `false` if there was nothing to delete.
pub fn purge(app: &AppInfo) -> Result<bool> {
    if !fs::dir_exists(&app.configurations_dir) {
        return Ok(false);
    }

    let mut removed = false;
    for name in [app.credentials_name.as_str(), paths::CONFIGURATIONS_NAME] {
        for ext in ConfigFormat::Yaml.extensions() {
            let path = app.configurations_dir.join(format!("{name}.{ext}"));
            if fs::file_exists(&path) {
                fs::delete_file(&path)?;
                removed = true;
            }
        }
    }

    if fs::dir_is_empty(&app.configurations_dir)? {
        fs::delete_dir_all(&app.configurations_dir)?;
        removed = true;
    } else {
        tracing::debug!(
            path = %app.configurations_dir.display(),
            "configuration directory holds other files; keeping it"
        );
    }

    Ok(removed)
}
