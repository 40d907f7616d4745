//! PostgreSQL storage adapter over the tracker's schema
//!
//! The tracker owns the schema; this adapter only reads from it and runs no
//! migrations.

pub mod census;
pub mod config;

pub use census::parse_possible_values;
pub use config::{ConfigError, PoolConfig, PostgresConfig};

use censo_core::error::{CensoError, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Read-only adapter over the tracker database
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate().map_err(|e| CensoError::ConfigInvalid {
            key: "database_url".to_string(),
            reason: e.to_string(),
        })?;

        let connect_options = config
            .database_url
            .parse::<PgConnectOptions>()
            .map_err(|e| CensoError::ConfigInvalid {
                key: "database_url".to_string(),
                reason: e.to_string(),
            })?
            .application_name(&config.application_name)
            .options(config.session_options());

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| CensoError::Storage(format!("Failed to connect to database: {}", e)))?;

        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .map_err(|e| CensoError::Storage(format!("Connection test failed: {}", e)))?;

        tracing::info!(
            database = %config.redacted_url(),
            max_connections = config.pool.max_connections,
            read_only = config.read_only,
            "Connected to tracker database"
        );

        Ok(Self { pool })
    }
}
