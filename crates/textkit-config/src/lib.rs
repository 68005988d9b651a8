use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use self::model::ModelConfig;
use self::registry::RegistryConfig;

pub mod model;
pub mod registry;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub registry: RegistryConfig,
}

impl Config {
    /// Defaults overridden by `TEXTKIT_*` environment variables
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Load a JSON config file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment, .env map, tests)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TEXTKIT_MODEL") {
            self.model.name = name;
        }

        if let Some(dir) = lookup("TEXTKIT_MODELS_DIR") {
            self.model.models_dir = dir;
        }

        if let Some(url) = lookup("TEXTKIT_REGISTRY_URL") {
            self.registry.url = url;
        }

        if let Some(timeout) = lookup("TEXTKIT_DOWNLOAD_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.registry.timeout_secs = timeout;
        }

        if let Some(offline) = lookup("TEXTKIT_OFFLINE") {
            self.registry.offline = matches!(offline.as_str(), "1" | "true" | "yes");
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        PathBuf::from(&self.model.models_dir)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.registry.timeout_secs)
    }
}
