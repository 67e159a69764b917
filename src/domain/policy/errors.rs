//! Error taxonomy for the policy generation pipeline.

use thiserror::Error;

use super::ArtifactFormat;

/// Errors raised while saving or listing policy documents.
///
/// The variants are conceptual: the HTTP boundary reports all of them as a
/// generic failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Missing or malformed policy identifiers or content.
    #[error("Invalid policy input: {0}")]
    InvalidInput(String),

    /// Directory creation, file write, or directory listing failed.
    #[error("Storage failure: {0}")]
    Storage(String),

    /// A rendering backend failed to produce the requested format.
    #[error("{format} conversion failed: {cause}")]
    Conversion {
        format: ArtifactFormat,
        cause: String,
    },
}

impl PolicyError {
    /// Creates an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Creates a storage error.
    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }

    /// Creates a conversion error for the given format.
    pub fn conversion(format: ArtifactFormat, cause: impl Into<String>) -> Self {
        Self::Conversion {
            format,
            cause: cause.into(),
        }
    }

    /// Stable machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            PolicyError::InvalidInput(_) => "INVALID_INPUT",
            PolicyError::Storage(_) => "STORAGE_ERROR",
            PolicyError::Conversion { .. } => "CONVERSION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_names_the_format() {
        let err = PolicyError::conversion(ArtifactFormat::Pdf, "engine crashed");
        assert_eq!(err.to_string(), "pdf conversion failed: engine crashed");
    }

    #[test]
    fn codes_distinguish_variants() {
        assert_eq!(PolicyError::invalid_input("x").code(), "INVALID_INPUT");
        assert_eq!(PolicyError::storage("x").code(), "STORAGE_ERROR");
        assert_eq!(
            PolicyError::conversion(ArtifactFormat::Docx, "x").code(),
            "CONVERSION_ERROR"
        );
    }
}
