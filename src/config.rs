//! Startup configuration: CLI/env overrides layered over an optional TOML file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::api::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing API key (pass --api-key, set API_KEY, or add `api_key` to {0})")]
    MissingApiKey(String),
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk config. Example:
///
/// ```toml
/// api_key = "..."
/// endpoint = "https://api.openweathermap.org/data/2.5/weather"
/// timeout_secs = 10
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Read and parse `path`; the file must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like `load`, but a missing file means empty config
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            result => result,
        }
    }
}

/// Values given on the command line (or via env through clap)
#[derive(Debug, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolved configuration, fixed for the life of the process
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("weather-prompt").join("config.toml"))
    }

    /// Read the file at `path` (or the default location) and layer `overrides` on top.
    ///
    /// Only the default location may be absent.
    pub fn load(overrides: Overrides, path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let (path, file) = match path {
            Some(path) => {
                let file = FileConfig::load(&path)?;
                (Some(path), file)
            }
            None => {
                let path = Self::default_path();
                let file = match &path {
                    Some(path) => FileConfig::load_or_default(path)?,
                    None => FileConfig::default(),
                };
                (path, file)
            }
        };
        let origin = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "the config file".to_string());
        Self::resolve(overrides, file, &origin)
    }

    /// Overrides win over the file; blank values count as unset
    pub fn resolve(
        overrides: Overrides,
        file: FileConfig,
        origin: &str,
    ) -> Result<Self, ConfigError> {
        let api_key = non_blank(overrides.api_key)
            .or_else(|| non_blank(file.api_key))
            .ok_or_else(|| ConfigError::MissingApiKey(origin.to_string()))?;
        let endpoint = non_blank(overrides.endpoint)
            .or_else(|| non_blank(file.endpoint))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let timeout = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_key,
            endpoint,
            timeout,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
