//! Error types for the layered configuration store and the application shell.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration store errors
#[derive(Debug, Error)]
pub enum ConfigStoreError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Config file {path:?} contains no section header before key '{key}'")]
    MissingSectionHeader { path: PathBuf, key: String },

    #[error("Invalid config key '{0}': expected 'section.option'")]
    InvalidKey(String),

    #[error("Invalid value for '{key}': '{value}' ({message})")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigStoreError),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}
