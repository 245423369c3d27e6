use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{ConfigError, provider::DEFAULT_TIMEOUT};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const MODEL_PATH_ENV: &str = "RAIN_MODEL_PATH";

pub const DEFAULT_LOCATION: &str = "Delhi,IN";
pub const DEFAULT_MODEL_PATH: &str = "rain_prediction_model.json";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// model_path = "/opt/models/rain_prediction_model.json"
/// default_location = "Pune,IN"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_path: Option<PathBuf>,
    pub default_location: Option<String>,
    /// Request timeout for the weather provider, in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "rain-advisory", "rain-advisory")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; non-empty values win over the file.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(path) = lookup(MODEL_PATH_ENV) {
            self.model_path = Some(PathBuf::from(path));
        }

        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or(ConfigError::MissingApiKey)
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }

    pub fn default_location(&self) -> &str {
        self.default_location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT)
    }
}
