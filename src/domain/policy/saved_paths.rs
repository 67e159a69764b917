//! Where one successful save put its three artifacts.

use std::path::PathBuf;

/// Paths of the template, PDF and DOCX written by one save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPolicyPaths {
    pub template: PathBuf,
    pub pdf: PathBuf,
    pub docx: PathBuf,
}

impl SavedPolicyPaths {
    pub fn new(
        template: impl Into<PathBuf>,
        pdf: impl Into<PathBuf>,
        docx: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template: template.into(),
            pdf: pdf.into(),
            docx: docx.into(),
        }
    }
}
