//! Gateway configuration.
//!
//! Resolution order, lowest to highest: built-in defaults, `config.toml` in
//! the platform config directory (or an explicit path), environment, then
//! whatever the caller overrides afterwards (CLI flags).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "BOOKSTA_API_BASE_URL";
pub const ENV_ACCESS_TOKEN: &str = "BOOKSTA_ACCESS_TOKEN";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Bearer token sent with every request when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            access_token: None,
        }
    }
}

impl GatewayConfig {
    /// Loads from `path`, or from the default location when `None`, then
    /// applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => match Self::config_path() {
                Some(path) => Self::load_from(&path)?,
                None => Self::default(),
            },
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    /// Reads a TOML file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            GatewayError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            GatewayError::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                GatewayError::InvalidConfig(format!("failed to create config directory: {e}"))
            })?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| GatewayError::InvalidConfig(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)
            .map_err(|e| GatewayError::InvalidConfig(format!("failed to write config: {e}")))
    }

    /// Default config file path, if a home directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "Booksta", "booksta")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Applies environment overrides through `lookup`. Blank values are ignored.
    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(base_url) = non_blank(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(token) = non_blank(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GatewayError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got {base:?}"
            )));
        }
        if self.timeout_secs == 0 {
            return Err(GatewayError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
