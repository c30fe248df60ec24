//! Application configuration
//!
//! Values come from `studyhub.toml` in the user config directory (or an
//! explicit path), then environment variables override them:
//!
//! | variable               | field               |
//! |------------------------|---------------------|
//! | `STUDYHUB_DATA_DIR`    | `data_dir`          |
//! | `STUDYHUB_BIND`        | `server.bind`       |
//! | `GEMINI_API_KEY`       | `ai.api_key`        |
//! | `API_KEY`              | `ai.api_key` (fallback) |
//! | `STUDYHUB_AI_BASE_URL` | `ai.base_url`       |

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::FileStorage;

pub const CONFIG_FILE_NAME: &str = "studyhub.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Data directory not found")]
    DataDirNotFound,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where collection files live; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
    pub server: ServerConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Drive the pomodoro timer from a background task
    pub pomodoro_runner: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 7878)),
            pomodoro_runner: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    /// Used for study plans, chat and critiques
    pub pro_model: String,
    /// Used for everything else
    pub flash_model: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            pro_model: "gemini-2.5-pro".to_string(),
            flash_model: "gemini-2.5-flash".to_string(),
            timeout_secs: 120,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("studyhub").join(CONFIG_FILE_NAME))
    }

    /// Load from `path` (or the default location) and apply environment
    /// overrides. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            _ => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override fields from environment variables, looked up through `var`
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty("STUDYHUB_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(bind) = non_empty("STUDYHUB_BIND") {
            self.server.bind = bind.parse().map_err(|_| ConfigError::InvalidValue {
                name: "STUDYHUB_BIND".to_string(),
                value: bind.clone(),
            })?;
        }
        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.ai.api_key = Some(key);
        }
        if let Some(url) = non_empty("STUDYHUB_AI_BASE_URL") {
            self.ai.base_url = url;
        }
        Ok(())
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }
}
