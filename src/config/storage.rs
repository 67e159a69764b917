//! Storage layout configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::policy::ArtifactFormat;

use super::error::ValidationError;

/// The three output directories, one per artifact format.
///
/// Built once at startup and shared read-only by the storage adapter.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Raw HTML templates
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Rendered PDFs
    #[serde(default = "default_pdf_dir")]
    pub pdf_dir: PathBuf,

    /// Editable DOCX documents
    #[serde(default = "default_docx_dir")]
    pub docx_dir: PathBuf,
}

impl StorageConfig {
    /// Creates a layout rooted under `base`, using the default directory names.
    pub fn rooted_at(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            templates_dir: base.join(default_templates_dir()),
            pdf_dir: base.join(default_pdf_dir()),
            docx_dir: base.join(default_docx_dir()),
        }
    }

    /// Directory that holds artifacts of `format`.
    pub fn dir_for(&self, format: ArtifactFormat) -> &Path {
        match format {
            ArtifactFormat::Template => &self.templates_dir,
            ArtifactFormat::Pdf => &self.pdf_dir,
            ArtifactFormat::Docx => &self.docx_dir,
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for format in ArtifactFormat::ALL {
            if self.dir_for(format).as_os_str().is_empty() {
                return Err(ValidationError::EmptyDirectory(format.extension()));
            }
        }
        let dirs = [&self.templates_dir, &self.pdf_dir, &self.docx_dir];
        for (i, dir) in dirs.iter().enumerate() {
            if dirs[i + 1..].contains(dir) {
                return Err(ValidationError::DuplicateDirectory(
                    dir.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            pdf_dir: default_pdf_dir(),
            docx_dir: default_docx_dir(),
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_pdf_dir() -> PathBuf {
    PathBuf::from("PDF")
}

fn default_docx_dir() -> PathBuf {
    PathBuf::from("Editaveis")
}
