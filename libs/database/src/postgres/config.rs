use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

use core_config::{env_or_default, env_required, ConfigError, FromEnv};

/// PostgreSQL connection pool configuration.
///
/// Construct manually with [`PostgresConfig::new`] or load from environment
/// variables via [`FromEnv`].
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL (required)
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,

    /// Connection idle timeout in seconds
    pub idle_timeout_secs: u64,

    /// Enable SQL query logging
    pub sqlx_logging: bool,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 50,
            min_connections: 5,
            connect_timeout_secs: 8,
            acquire_timeout_secs: 8,
            idle_timeout_secs: 60,
            sqlx_logging: true,
        }
    }

    /// Convert into SeaORM [`ConnectOptions`]
    pub fn into_connect_options(self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        opt
    }
}

impl FromEnv for PostgresConfig {
    /// Reads from environment variables:
    /// - `DATABASE_URL` (required)
    /// - `DATABASE_MAX_CONNECTIONS` (default 50)
    /// - `DATABASE_MIN_CONNECTIONS` (default 5)
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required("DATABASE_URL")?;

        let max_connections = env_or_default("DATABASE_MAX_CONNECTIONS", "50")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        let min_connections = env_or_default("DATABASE_MIN_CONNECTIONS", "5")
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "DATABASE_MIN_CONNECTIONS".to_string(),
                details: format!("{}", e),
            })?;

        let mut config = Self::new(url);
        config.max_connections = max_connections;
        config.min_connections = min_connections;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_requires_url() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let result = PostgresConfig::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("DATABASE_URL"));
        });
    }

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/lendhub")),
                ("DATABASE_MAX_CONNECTIONS", None),
                ("DATABASE_MIN_CONNECTIONS", None),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.url, "postgresql://localhost/lendhub");
                assert_eq!(config.max_connections, 50);
                assert_eq!(config.min_connections, 5);
            },
        );
    }

    #[test]
    fn test_from_env_pool_override() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/lendhub")),
                ("DATABASE_MAX_CONNECTIONS", Some("10")),
                ("DATABASE_MIN_CONNECTIONS", Some("2")),
            ],
            || {
                let config = PostgresConfig::from_env().unwrap();
                assert_eq!(config.max_connections, 10);
                assert_eq!(config.min_connections, 2);
            },
        );
    }

    #[test]
    fn test_from_env_invalid_pool_size() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgresql://localhost/lendhub")),
                ("DATABASE_MAX_CONNECTIONS", Some("lots")),
            ],
            || {
                let result = PostgresConfig::from_env();
                assert!(result.is_err());
            },
        );
    }
}
