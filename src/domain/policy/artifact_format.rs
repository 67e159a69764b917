//! The three persisted representations of a policy.

use serde::{Deserialize, Serialize};

/// Output format of a stored artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// The raw HTML as submitted.
    Template,
    /// Paged PDF rendering.
    Pdf,
    /// Editable word-processor document.
    Docx,
}

impl ArtifactFormat {
    /// All formats, in pipeline order.
    pub const ALL: [ArtifactFormat; 3] = [
        ArtifactFormat::Template,
        ArtifactFormat::Pdf,
        ArtifactFormat::Docx,
    ];

    /// File extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactFormat::Template => "html",
            ArtifactFormat::Pdf => "pdf",
            ArtifactFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactFormat::Template => write!(f, "template"),
            ArtifactFormat::Pdf => write!(f, "pdf"),
            ArtifactFormat::Docx => write!(f, "docx"),
        }
    }
}
