//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request body limit must be greater than zero")]
    InvalidBodyLimit,

    #[error("Storage directory for {0} must not be empty")]
    EmptyDirectory(&'static str),

    #[error("Storage directories must be distinct, {0} is used twice")]
    DuplicateDirectory(String),

    #[error("PDF engine must not be empty")]
    EmptyPdfEngine,

    #[error("Invalid conversion timeout")]
    InvalidConversionTimeout,
}
