//! Error types for tourmap

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TourmapError {
    // Record source errors
    #[error("Dataset not found: {id}")]
    DatasetNotFound { id: String },

    #[error("Dataset source at {path} is not usable: {reason}")]
    InvalidRecordSource { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TourmapError {
    fn from(err: serde_json::Error) -> Self {
        TourmapError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TourmapError>;
