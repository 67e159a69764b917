//! Rendering backend configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Pandoc converter configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Path to the pandoc executable; searched on PATH when unset
    pub pandoc_path: Option<String>,

    /// Engine pandoc uses to produce PDFs
    #[serde(default = "default_pdf_engine")]
    pub pdf_engine: String,

    /// Per-conversion timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ConverterConfig {
    /// Validate converter configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.pdf_engine.trim().is_empty() {
            return Err(ValidationError::EmptyPdfEngine);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidConversionTimeout);
        }
        Ok(())
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            pandoc_path: None,
            pdf_engine: default_pdf_engine(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_pdf_engine() -> String {
    "wkhtmltopdf".to_string()
}

fn default_timeout() -> u64 {
    30
}
