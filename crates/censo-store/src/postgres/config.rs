//! Connection settings for the tracker database

use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

/// How the census map connects to the tracker's PostgreSQL database.
///
/// Sessions are opened read-only by default; the adapter never writes.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    /// Reported in `pg_stat_activity`
    pub application_name: String,
    /// Upper bound for any single census query
    pub statement_timeout: Duration,
    pub read_only: bool,
    pub pool: PoolConfig,
}

impl PostgresConfig {
    pub fn from_database_url(database_url: &str) -> Result<Self, ConfigError> {
        let config = Self {
            database_url: database_url.trim().to_string(),
            application_name: "censo-api".to_string(),
            statement_timeout: Duration::from_secs(10),
            read_only: true,
            pool: PoolConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read `DATABASE_URL` and apply the `CENSO_DB_*` overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?;
        Self::from_database_url(&database_url)?.with_env_overrides()
    }

    /// Apply `CENSO_DB_MAX_CONNECTIONS` and `CENSO_DB_STATEMENT_TIMEOUT_MS`
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(max) = env_number::<u32>("CENSO_DB_MAX_CONNECTIONS")? {
            self.pool.max_connections = max;
            self.pool.min_connections = self.pool.min_connections.min(max);
        }
        if let Some(ms) = env_number::<u64>("CENSO_DB_STATEMENT_TIMEOUT_MS")? {
            self.statement_timeout = Duration::from_millis(ms);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.is_empty() {
            return Err(invalid("database_url", "cannot be empty"));
        }

        if !self.database_url.starts_with("postgres://")
            && !self.database_url.starts_with("postgresql://")
        {
            return Err(invalid("database_url", "expected a postgres:// or postgresql:// URL"));
        }

        if self.statement_timeout.is_zero() {
            return Err(invalid("statement_timeout", "must be greater than 0"));
        }

        self.pool.validate()
    }

    /// Session parameters sent with every new connection
    pub fn session_options(&self) -> Vec<(&'static str, String)> {
        let mut options = vec![(
            "statement_timeout",
            self.statement_timeout.as_millis().to_string(),
        )];
        if self.read_only {
            options.push(("default_transaction_read_only", "on".to_string()));
        }
        options
    }

    /// The connection URL with any password masked, for logs
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.database_url.split_once("://") else {
            return self.database_url.clone();
        };
        match rest.split_once('@') {
            Some((userinfo, host)) if userinfo.contains(':') => {
                let user = userinfo.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            _ => self.database_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(invalid("pool.max_connections", "must be greater than 0"));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                key: "pool.min_connections".to_string(),
                reason: format!(
                    "{} exceeds max_connections ({})",
                    self.min_connections, self.max_connections
                ),
            });
        }

        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(key, &format!("'{}' is not a number", raw))),
        Err(_) => Ok(None),
    }
}
