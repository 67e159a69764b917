//! Local Filesystem Storage Adapter - Implementation of PolicyFileStorage.
//!
//! Stores policy artifacts as flat files in one directory per format.
//! Directory contents are the only index: listing is a fresh scan.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::config::StorageConfig;
use crate::domain::foundation::Timestamp;
use crate::domain::policy::{ArtifactFormat, BaseName};
use crate::ports::{FilePath, PolicyFileStorage, PolicyListingEntry, StorageError, StoredArtifact};

/// Local filesystem storage for policy artifacts.
///
/// # Directory Structure
///
/// ```text
/// templates/
/// └── acme_corp__remote_work_2024_01_15t10_30_45z.html
/// PDF/
/// └── acme_corp__remote_work_2024_01_15t10_30_45z.pdf
/// Editaveis/
/// └── acme_corp__remote_work_2024_01_15t10_30_45z.docx
/// ```
///
/// # Writes
///
/// Each artifact is written with a single whole-buffer write. There is no
/// temp-file/rename step and no locking: concurrent saves that derive the
/// same base name race, and the last writer wins.
///
/// # Usage
///
/// ```rust,ignore
/// let storage = LocalPolicyFileStorage::new(StorageConfig::default());
///
/// storage.ensure_layout().await?;
/// let artifact = storage.write(&base, ArtifactFormat::Template, html.as_bytes()).await?;
/// let pdfs = storage.list_pdfs().await?;
/// ```
#[derive(Debug, Clone)]
pub struct LocalPolicyFileStorage {
    layout: StorageConfig,
}

impl LocalPolicyFileStorage {
    /// Creates storage over the given directory layout.
    pub fn new(layout: StorageConfig) -> Self {
        Self { layout }
    }

    /// The directory layout in use.
    pub fn layout(&self) -> &StorageConfig {
        &self.layout
    }

    /// Creates a directory (and parents) unless it already exists.
    async fn create_dir(dir: &Path) -> Result<(), StorageError> {
        fs::create_dir_all(dir).await.map_err(|e| {
            StorageError::create_directory(dir.display().to_string(), e.to_string())
        })
    }

    /// Maps an I/O failure on `path` to a storage error.
    fn io_error(action: &str, path: &Path, err: std::io::Error) -> StorageError {
        match err.kind() {
            ErrorKind::PermissionDenied => StorageError::permission_denied(path.display().to_string()),
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), err)),
        }
    }

    fn is_pdf(file_name: &str) -> bool {
        file_name.ends_with(&format!(".{}", ArtifactFormat::Pdf.extension()))
    }
}

#[async_trait]
impl PolicyFileStorage for LocalPolicyFileStorage {
    async fn ensure_layout(&self) -> Result<(), StorageError> {
        for format in ArtifactFormat::ALL {
            Self::create_dir(self.layout.dir_for(format)).await?;
        }
        Ok(())
    }

    fn resolve_path(&self, base: &BaseName, format: ArtifactFormat) -> FilePath {
        FilePath::new(self.layout.dir_for(format).join(base.file_name(format)))
    }

    async fn write(
        &self,
        base: &BaseName,
        format: ArtifactFormat,
        content: &[u8],
    ) -> Result<StoredArtifact, StorageError> {
        let path = self.resolve_path(base, format);

        fs::write(path.as_path(), content)
            .await
            .map_err(|e| Self::io_error("write", path.as_path(), e))?;

        debug!(path = %path, format = %format, bytes = content.len(), "Artifact written");
        Ok(StoredArtifact::new(path, format))
    }

    async fn list_pdfs(&self) -> Result<Vec<PolicyListingEntry>, StorageError> {
        let pdf_dir = &self.layout.pdf_dir;

        let mut entries = match fs::read_dir(pdf_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(dir = %pdf_dir.display(), "PDF directory absent, nothing stored yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(Self::io_error("read directory", pdf_dir, e)),
        };

        let mut files = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::io_error("read directory", pdf_dir, e))?
        {
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !Self::is_pdf(&file_name) {
                continue;
            }

            let path = entry.path();
            // Follows symlinks, so a linked PDF reports its target's metadata.
            let meta = match fs::metadata(&path).await {
                Ok(meta) => meta,
                // Removed between the scan and the stat, or a dangling link.
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(Self::io_error("stat", &path, e)),
            };
            if !meta.is_file() {
                continue;
            }

            let modified = meta
                .modified()
                .map_err(|e| Self::io_error("read modification time of", &path, e))?;

            files.push(PolicyListingEntry::pdf(
                file_name,
                path,
                Timestamp::from_system_time(modified),
            ));
        }

        // Newest first; name breaks ties so the order is stable
        files.sort_by(|a, b| {
            b.created
                .cmp(&a.created)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(files)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
