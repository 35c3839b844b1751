//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/carshare/config.toml`).
//! Every section and field has a default, so a partial file or no file at
//! all yields a runnable configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::database::DatabaseConfig;

/// Environment variable that overrides the database URL from the file
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds in-flight requests get to finish after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "carshare=debug,tower_http=info"
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// How long a request waits for a vehicle already being worked on
    pub guard_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            guard_timeout_ms: 5_000,
        }
    }
}

impl EngineConfig {
    pub fn guard_timeout(&self) -> Duration {
        Duration::from_millis(self.guard_timeout_ms)
    }
}

impl AppConfig {
    /// Load from `path`. A missing file gives the defaults; `DATABASE_URL`
    /// wins over the file's database url.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.database.url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "database.url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                field: "database.max_connections",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.engine.guard_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "engine.guard_timeout_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        if !matches!(
            self.logging.format.to_lowercase().as_str(),
            "text" | "json"
        ) {
            return Err(ConfigError::Invalid {
                field: "logging.format",
                reason: format!("expected \"text\" or \"json\", got \"{}\"", self.logging.format),
            });
        }
        Ok(())
    }
}

/// `~/.config/carshare/config.toml`, or `./config.toml` when the platform
/// has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("carshare").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
[server]
port = 9090

[engine]
guard_timeout_ms = 250
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.engine.guard_timeout(), Duration::from_millis(250));
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(AppConfig::from_toml("").unwrap(), AppConfig::default());
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_guard_timeout_is_rejected() {
        let err = AppConfig::from_toml("[engine]\nguard_timeout_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "engine.guard_timeout_ms",
                ..
            }
        ));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = AppConfig::from_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "logging.format", .. }));
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = std::env::temp_dir().join(format!("carshare-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.server.port = 7070;
        config.logging.format = "json".to_string();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 7070);
        assert_eq!(loaded.logging.format, "json");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("carshare-does-not-exist/config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn default_path_ends_in_carshare_config() {
        let path = default_config_path();
        assert!(path.ends_with("config.toml"));
    }
}
