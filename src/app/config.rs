//! Application configuration.
//!
//! Settings come from an optional `config.toml` in the platform config
//! directory; every key is optional. The API key is never stored in the file,
//! it is read from the environment (a `.env` file in the working directory is
//! loaded by `main` before this runs).
//!
//! # config.toml Format
//!
//! ```toml
//! model = "gemini-2.5-flash"
//! endpoint = "https://generativelanguage.googleapis.com"
//! api_key_env = "GEMINI_API_KEY"
//! theme = "Mocha"
//! ```

use crate::app::dashui::app::ThemeChoice;
use crate::app::error::ConfigError;
use crate::app::optimizer::ApiKey;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Checked when the configured variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    pub endpoint: String,
    pub api_key_env: String,
    pub theme: ThemeChoice,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            theme: ThemeChoice::default(),
        }
    }
}

impl AppConfig {
    /// `<config_dir>/config.toml`, when the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", "prompt-architect")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            debug!("No platform config directory, using default configuration");
            return Self::default();
        };

        if !path.exists() {
            debug!("No config file at {:?}, using default configuration", path);
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(config) => {
                info!(
                    "Loaded configuration from {:?}: model={}, endpoint={}",
                    path, config.model, config.endpoint
                );
                config
            }
            Err(e) => {
                warn!("Ignoring config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.endpoint).map_err(|source| ConfigError::Endpoint {
            endpoint: self.endpoint.clone(),
            source,
        })?;
        Ok(())
    }

    /// Resolve the API key from the process environment.
    pub fn resolve_api_key(&self) -> Option<ApiKey> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key through `lookup`; blank values count as unset.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<ApiKey>
    where
        F: Fn(&str) -> Option<String>,
    {
        [self.api_key_env.as_str(), FALLBACK_API_KEY_ENV]
            .into_iter()
            .find_map(|name| {
                lookup(name)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| {
                        debug!("API key found in ${}", name);
                        ApiKey::new(value.trim())
                    })
            })
    }
}
