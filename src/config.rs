//! Connection settings.
//!
//! Values come from the command line or environment first, then from an
//! optional TOML file stored in the platform configuration directory:
//!
//! - **macOS/Linux**: `~/.config/azure-devops-server-mcp/config.toml`
//! - **Windows**: `%APPDATA%\azure-devops-server-mcp\config.toml`

use crate::azure::client::DEFAULT_API_VERSION;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR_NAME: &str = "azure-devops-server-mcp";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ADO_SERVER_URL environment variable is required")]
    MissingServerUrl,
    #[error("ADO_PAT_TOKEN environment variable is required")]
    MissingToken,
    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Contents of the optional configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub pat: Option<String>,
}

impl FileConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads `path`, treating a missing file as empty.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("Config file {} does not exist, skipping", path.display());
            return Ok(Self::default());
        }
        Self::read(path)
    }

    /// Loads an explicitly requested file, which must exist.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub pat: Option<String>,
    pub api_version: Option<String>,
}

/// Fully resolved settings needed to open the upstream connection.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub pat: String,
    pub api_version: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("server_url", &self.server_url)
            .field("pat", &"<redacted>")
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Settings {
    pub fn resolve(overrides: Overrides, file: FileConfig) -> Result<Self, ConfigError> {
        let server_url = pick(overrides.server_url, file.server_url)
            .ok_or(ConfigError::MissingServerUrl)?;
        let pat = pick(overrides.pat, file.pat).ok_or(ConfigError::MissingToken)?;
        let api_version = pick(overrides.api_version, file.api_version)
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        validate_url(&server_url)?;

        Ok(Self {
            server_url,
            pat,
            api_version,
        })
    }
}

fn pick(preferred: Option<String>, fallback: Option<String>) -> Option<String> {
    preferred
        .filter(|v| !v.trim().is_empty())
        .or(fallback.filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
}

fn validate_url(url: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}
