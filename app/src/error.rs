//! Error handling for the SCA Cupping Journal
//!
//! Every failure path leaves the application in a previously-valid state:
//! malformed stored data degrades to "no data", rejected imports take no
//! action, and out-of-range numeric input is massaged at the model
//! boundary rather than surfaced here.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
