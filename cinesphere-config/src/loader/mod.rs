pub mod error;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::models::{API_KEY_ENV, ConfigSource, GalaxyConfig};
use crate::validation::{ConfigWarnings, apply_guard_rails};
use error::ConfigLoadError;

/// A validated configuration plus what it took to produce it.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: GalaxyConfig,
    pub source: ConfigSource,
    pub warnings: ConfigWarnings,
    /// Whether `catalog.api_key` came from `TMDB_API_KEY`.
    pub api_key_from_env: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    read_dotenv: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            path: None,
            read_dotenv: true,
        }
    }

    /// Load this file instead of searching the environment and defaults.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_dotenv(mut self, enabled: bool) -> Self {
        self.read_dotenv = enabled;
        self
    }

    /// Load against the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        if self.read_dotenv {
            match dotenvy::dotenv() {
                Ok(path) => debug!(path = %path.display(), "loaded .env"),
                Err(err) if err.not_found() => {}
                Err(err) => return Err(err.into()),
            }
        }
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Load against an arbitrary variable lookup.
    pub fn load_with<F>(&self, lookup: F) -> Result<ConfigLoad, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, source) = match &self.path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigLoadError::MissingFile { path: path.clone() });
                }
                let config = GalaxyConfig::load_from_file(path)
                    .map_err(ConfigLoadError::Parse)?;
                (config, ConfigSource::Explicit(path.clone()))
            }
            None => GalaxyConfig::resolve(&lookup).map_err(ConfigLoadError::Parse)?,
        };

        let api_key_from_env = match lookup(API_KEY_ENV) {
            Some(key) if !key.trim().is_empty() => {
                config.catalog.api_key = key.trim().to_string();
                true
            }
            _ => false,
        };

        let warnings = apply_guard_rails(&config)?;
        info!(
            %source,
            api_key_from_env,
            warnings = warnings.len(),
            "configuration loaded"
        );

        Ok(ConfigLoad {
            config,
            source,
            warnings,
            api_key_from_env,
        })
    }
}
