//! Configuration module
//!
//! Loaded from a TOML file (default `~/.config/station-registry/config.toml`).
//! Every section and key is optional; missing values fall back to defaults.
//!
//! ```toml
//! [database]
//! path = "/var/lib/station-registry/stations.db"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [admin]
//! username = "admin"
//! password = "change-me"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "STATION_REGISTRY_CONFIG";

/// Password of the `[admin]` section when the file does not set one
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
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
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub admin: AdminSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite file path, used when `url` is unset
    pub path: String,
    /// Full connection URL, wins over `path`
    pub url: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: "./stations.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => DatabaseConfig::sqlite(&self.path).url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// First administrator, created only while the users table is empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSection {
    pub username: String,
    pub password: String,
}

impl Default for AdminSection {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl AdminSection {
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_ADMIN_PASSWORD
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.connection_url(),
        }
    }
}

/// `$STATION_REGISTRY_CONFIG`, else `<config dir>/station-registry/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("station-registry")
        .join("config.toml")
}
