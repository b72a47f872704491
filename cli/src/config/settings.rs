//! Application configuration settings.

use serde::{Deserialize, Serialize};
use url::Url;

/// Main configuration for tecli, read from `configurations.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TecliConfig {
    /// API client settings.
    pub api: ApiConfig,
}

/// API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Terraform Cloud / Enterprise API base URL.
    #[serde(with = "url_serde")]
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("valid default URL"),
            timeout_secs: 30,
        }
    }
}

/// Terraform Cloud API v2 root.
pub const DEFAULT_BASE_URL: &str = "https://app.terraform.io/api/v2/";

/// Custom serde module for URL serialization.
mod url_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S>(url: &Url, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(url.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Environment variables that can override configuration.
pub mod env {
    pub const API_URL: &str = "TECLI_API_URL";
    pub const CONFIG_DIR: &str = "TECLI_CONFIG_DIR";
    pub const LOG_LEVEL: &str = "TECLI_LOG";
}

impl TecliConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(env::API_URL) {
            match Url::parse(&url) {
                Ok(parsed) => self.api.base_url = parsed,
                Err(e) => tracing::warn!("ignoring {}: {e}", env::API_URL),
            }
        }

        self
    }
}
