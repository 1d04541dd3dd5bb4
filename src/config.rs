use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::DEFAULT_USER_AGENT;
use crate::error::{Result, ScraperError};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
    pub default_territory: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 3600 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
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
            port: 3000,
        }
    }
}

impl Config {
    /// Loads `FONDS_CONFIG` (or `config.toml`) when present, defaults otherwise.
    /// `PORT` overrides the configured server port.
    pub fn load() -> Result<Self> {
        let config_path =
            std::env::var("FONDS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Config::default()
        };

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| ScraperError::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }

        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.http.timeout_seconds, 10);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.server.port, 3000);
        assert!(config.default_territory.is_none());
    }

    #[test]
    fn test_partial_config_overrides() {
        let config = Config::from_toml(
            r#"
            default_territory = "martinique"

            [http]
            timeout_seconds = 3

            [cache]
            ttl_seconds = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.http.timeout(), Duration::from_secs(3));
        assert_eq!(config.http.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.cache.ttl(), Duration::from_secs(60));
        assert_eq!(config.default_territory.as_deref(), Some("martinique"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            Config::from_toml("[http\ntimeout_seconds = 3"),
            Err(ScraperError::Toml(_))
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/fonds.toml").unwrap_err();
        assert!(matches!(err, ScraperError::Config(_)));
    }
}
