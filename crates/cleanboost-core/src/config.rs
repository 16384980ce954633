//! Client configuration.
//!
//! Loaded from `$CLEANBOOST_HOME/config.toml` (or `~/.cleanboost/config.toml`)
//! with environment overrides for the API endpoint and token. A missing file
//! just means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs::home_dir;
use serde::Deserialize;
use thiserror::Error;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Env override for the backend base URL.
pub const API_URL_ENV_VAR: &str = "CLEANBOOST_API_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Returns the CleanBoost home directory, or `None` if the user's home
/// cannot be resolved. `CLEANBOOST_HOME` overrides.
pub fn try_cleanboost_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("CLEANBOOST_HOME") {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".cleanboost"))
}

/// Config file path: `~/.cleanboost/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    try_cleanboost_home().map(|home| home.join("config.toml"))
}

/// Tunables for the orchestration client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backend API base, including the `/api/v1` prefix.
    pub base_url: String,
    /// Cadence for `/scan/results` polls, milliseconds.
    pub poll_interval_ms: u64,
    /// Cadence for `/system/status` polls, milliseconds.
    pub telemetry_interval_ms: u64,
    /// Delay between a successful cleanup and the follow-up rescan,
    /// milliseconds.
    pub rescan_delay_ms: u64,
    /// Bearer token for authenticated endpoints. `CLEANBOOST_TOKEN` takes
    /// precedence when set.
    pub token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: 2000,
            telemetry_interval_ms: 1000,
            rescan_delay_ms: 2000,
            token: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply env overrides.
    ///
    /// # Errors
    ///
    /// Only an unreadable or malformed existing file is an error; an absent
    /// file (or unresolvable home) falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_path(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from an explicit file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(API_URL_ENV_VAR).ok(),
            std::env::var(crate::auth::TOKEN_ENV_VAR).ok(),
        );
    }

    /// Environment values beat file values; an unset or empty variable
    /// leaves the file value alone.
    fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.is_empty()) {
            self.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn telemetry_interval(&self) -> Duration {
        Duration::from_millis(self.telemetry_interval_ms)
    }

    pub fn rescan_delay(&self) -> Duration {
        Duration::from_millis(self.rescan_delay_ms)
    }
}
