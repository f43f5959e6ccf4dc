use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "BLOG_API_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid PORT override {0:?}")]
    Port(String),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file path, or `:memory:` for a throwaway database.
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "data/blog.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub enabled: bool,
    /// Read at startup instead of the bundled text when set.
    pub resource_path: Option<PathBuf>,
    pub title: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            resource_path: None,
            title: "Hello World!".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `$BLOG_API_CONFIG` or `config.toml`.
    ///
    /// A missing default file falls back to built-in defaults; a missing
    /// explicitly named file is an error. `PORT` overrides `server.port`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Path::new(DEFAULT_CONFIG_PATH), |key| std::env::var(key).ok())
    }

    /// `load` with the default file and environment lookup supplied.
    pub fn load_with<F>(default_path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match env(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(path)?,
            None if default_path.exists() => Self::from_file(default_path)?,
            None => Self::default(),
        };

        if let Some(port) = env("PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::Port(port))?;
        }

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
