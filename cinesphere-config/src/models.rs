use anyhow::{Context, anyhow};
use cinesphere_core::camera::RigSettings;
use cinesphere_core::layout::RadiusPolicy;
use cinesphere_core::providers::TmdbSettings;
use cinesphere_core::session::SessionSettings;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Env var naming a TOML or JSON config file.
pub const CONFIG_PATH_ENV: &str = "CINESPHERE_CONFIG_PATH";
/// Env var holding the whole config as inline JSON.
pub const CONFIG_JSON_ENV: &str = "CINESPHERE_CONFIG_JSON";
/// Env var that overrides `catalog.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
    Explicit(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::EnvPath(path) => {
                write!(f, "{} (via {CONFIG_PATH_ENV})", path.display())
            }
            ConfigSource::EnvInline => write!(f, "{CONFIG_JSON_ENV}"),
            ConfigSource::File(path) | ConfigSource::Explicit(path) => {
                write!(f, "{}", path.display())
            }
        }
    }
}

/// Everything a galaxy host needs to start. Missing sections and fields
/// fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// TMDB connection. The API key is normally supplied through
    /// `TMDB_API_KEY` rather than written to disk.
    pub catalog: TmdbSettings,
    /// Sphere radius growth.
    pub layout: RadiusPolicy,
    /// Camera easing, focus distance, warp and idle spin.
    pub camera: RigSettings,
    /// Reload pacing.
    pub session: SessionSettings,
}

impl GalaxyConfig {
    /// Resolve a configuration from the given variable lookup.
    /// Evaluation order:
    /// 1) `$CINESPHERE_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$CINESPHERE_CONFIG_JSON` (inline JSON),
    /// 3) the first default file that exists,
    /// 4) defaults.
    pub fn resolve<F>(lookup: F) -> anyhow::Result<(Self, ConfigSource)>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path_str) = lookup(CONFIG_PATH_ENV)
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str.trim());
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_ENV)
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_ENV}"))?;
            return Ok((parsed, ConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read config from {}", path.display())
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents)
                .with_context(|| format!("invalid config {}", path.display())),
            Some("toml") | Some("tml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid config {}: {}", path.display(), err)
            }),
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    /// TOML first, then JSON.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid config json: {err}"))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render config as TOML")
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "cinesphere.toml",
            "cinesphere.json",
            "config/cinesphere.toml",
        ];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(|path| path.to_path_buf())
    }
}
