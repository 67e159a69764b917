//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `POLICY_PRESS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use policy_press::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.bind_address());
//! ```

mod converter;
mod error;
mod server;
mod storage;

pub use converter::ConverterConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Bare variable that overrides `server.port` when set.
const PORT_OVERRIDE_VAR: &str = "PORT";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, limits, static assets)
    #[serde(default)]
    pub server: ServerConfig,

    /// Output directories for templates, PDFs and DOCX files
    #[serde(default)]
    pub storage: StorageConfig,

    /// Rendering backend (pandoc) settings
    #[serde(default)]
    pub converter: ConverterConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `POLICY_PRESS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies a bare `PORT` variable on top, if set
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `POLICY_PRESS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `POLICY_PRESS__STORAGE__PDF_DIR=/data/pdf` -> `storage.pdf_dir = /data/pdf`
    /// - `PORT=8080` -> `server.port = 8080`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("POLICY_PRESS")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var(PORT_OVERRIDE_VAR).ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.converter.validate()?;
        Ok(())
    }
}
