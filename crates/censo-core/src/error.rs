//! Error types for the census map

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CensoError {
    // Tracker lookups
    #[error("Project not found: {project}")]
    ProjectNotFound { project: String },

    #[error("Custom field not found: {id}")]
    CustomFieldNotFound { id: i32 },

    // Record ingestion
    #[error("Invalid census record: {reason}")]
    InvalidRecord { reason: String },

    // Map surface errors
    #[error("Map surface error: {0}")]
    Surface(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CensoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CensoError>;
