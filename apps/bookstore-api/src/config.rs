//! API server configuration module.
//!
//! Configuration is loaded from environment variables (optionally seeded
//! from a `.env` file by `main`) with fallback to defaults.

use std::env;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub port: u16,

    /// Deployment environment (`dev`, `staging`, `prod`, ...)
    pub environment: String,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub db_max_connections: u32,

    /// Per-request deadline
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let request_timeout_secs: u64 = parse(&lookup, "REQUEST_TIMEOUT_SECS", "30")?;
        if request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string()));
        }

        let config = ApiConfig {
            port: parse(&lookup, "PORT", "8080")?,

            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "dev".to_string()),

            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "./bookstore.db".to_string()),

            db_max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", "5")?,

            request_timeout: Duration::from_secs(request_timeout_secs),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_PATH".to_string()));
        }

        Ok(config)
    }

    /// Whether this is a development deployment.
    pub fn is_dev(&self) -> bool {
        self.environment == "dev"
    }

    /// Socket address to bind.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.is_dev());
        assert_eq!(config.database_path, "./bookstore.db");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("ENVIRONMENT", "prod"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(!config.is_dev());
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("PORT", "eighty"),
            ("DB_MAX_CONNECTIONS", "0"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ] {
            match load(&[(key, value)]) {
                Err(ConfigError::InvalidValue(k)) => assert_eq!(k, key),
                other => panic!("{key}={value}: unexpected {other:?}"),
            }
        }
    }
}
