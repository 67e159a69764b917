//! Document Converter Port - HTML to binary format conversion.
//!
//! This port defines the contract for turning rendered policy HTML into one
//! output format (PDF or DOCX). The orchestrator depends on this trait, while
//! adapters (like `PandocConverter`) drive the actual rendering backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::policy::{ArtifactFormat, PolicyError};

/// Port for converting HTML into a single output format.
///
/// # Contract
///
/// Implementations must:
/// - Accept arbitrary HTML without pre-validating it
/// - Be stateless between calls
/// - Resolve only once the full output is available
/// - Report failures as [`ConversionError`] tagged with [`Self::format`]
///
/// # Usage
///
/// ```rust,ignore
/// let pdf: &dyn DocumentConverter = get_pdf_converter();
/// let bytes = pdf.convert("<h1>Policy</h1>").await?;
/// ```
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// The format this converter produces.
    fn format(&self) -> ArtifactFormat;

    /// Convert HTML to the output format's bytes.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError` if the backend is missing, fails, times out
    /// or produces nothing.
    async fn convert(&self, html: &str) -> Result<Vec<u8>, ConversionError>;

    /// Check whether the rendering backend can be reached.
    ///
    /// Used for startup diagnostics only.
    async fn is_available(&self) -> bool;
}

/// A failed conversion, tagged with the format that was being produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{format} conversion failed: {cause}")]
pub struct ConversionError {
    /// Format being produced.
    pub format: ArtifactFormat,

    /// What went wrong.
    pub cause: ConversionFailure,
}

/// Reasons a conversion can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionFailure {
    /// External converter is not installed or cannot be started.
    #[error("rendering backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Backend ran but reported an error.
    #[error("rendering backend error: {0}")]
    RenderFailed(String),

    /// Backend exited successfully without producing output.
    #[error("rendering backend produced no output")]
    EmptyOutput,

    /// Backend did not finish in time.
    #[error("timed out after {0} seconds")]
    Timeout(u64),

    /// Pipe or process I/O failure.
    #[error("I/O error: {0}")]
    Io(String),
}

impl ConversionError {
    /// Creates a conversion error.
    pub fn new(format: ArtifactFormat, cause: ConversionFailure) -> Self {
        Self { format, cause }
    }

    /// Creates a backend unavailable error.
    pub fn backend_unavailable(format: ArtifactFormat, reason: impl Into<String>) -> Self {
        Self::new(format, ConversionFailure::BackendUnavailable(reason.into()))
    }

    /// Creates a render failure error.
    pub fn render_failed(format: ArtifactFormat, reason: impl Into<String>) -> Self {
        Self::new(format, ConversionFailure::RenderFailed(reason.into()))
    }

    /// Creates an I/O error.
    pub fn io(format: ArtifactFormat, reason: impl Into<String>) -> Self {
        Self::new(format, ConversionFailure::Io(reason.into()))
    }

    /// Creates a timeout error.
    pub fn timeout(format: ArtifactFormat, secs: u64) -> Self {
        Self::new(format, ConversionFailure::Timeout(secs))
    }
}

impl From<ConversionError> for PolicyError {
    fn from(err: ConversionError) -> Self {
        PolicyError::conversion(err.format, err.cause.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
