//! Policy File Storage Port - Filesystem layout, writes and listing.
//!
//! This port defines the contract for persisting policy artifacts. The
//! application layer depends on this trait, while adapters (like
//! `LocalPolicyFileStorage`) provide the implementation.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::foundation::Timestamp;
use crate::domain::policy::{ArtifactFormat, BaseName, PolicyError};

/// Port for filesystem operations on policy artifacts.
///
/// # Contract
///
/// Implementations must:
/// - Keep one flat directory per [`ArtifactFormat`]
/// - Map `(base, format)` to `{dir(format)}/{base}.{ext}` deterministically
/// - Create missing directories idempotently
/// - Write each artifact as one complete buffer (last writer wins)
/// - Treat a missing PDF directory as an empty listing
///
/// # Layout
///
/// ```text
/// {templates_dir}/{base}.html
/// {pdf_dir}/{base}.pdf
/// {docx_dir}/{base}.docx
/// ```
///
/// # Usage
///
/// ```rust,ignore
/// let storage: &dyn PolicyFileStorage = get_storage();
///
/// storage.ensure_layout().await?;
/// let artifact = storage.write(&base, ArtifactFormat::Pdf, &pdf_bytes).await?;
/// let listing = storage.list_pdfs().await?;
/// ```
#[async_trait]
pub trait PolicyFileStorage: Send + Sync {
    /// Create the three output directories if absent.
    ///
    /// Must succeed when the directories already exist.
    async fn ensure_layout(&self) -> Result<(), StorageError>;

    /// Resolve the path an artifact of `format` with this base name lives at.
    fn resolve_path(&self, base: &BaseName, format: ArtifactFormat) -> FilePath;

    /// Write an artifact, replacing any existing file at the same path.
    ///
    /// # Returns
    ///
    /// The stored artifact (path + format). The storage keeps no reference
    /// to the content afterwards.
    async fn write(
        &self,
        base: &BaseName,
        format: ArtifactFormat,
        content: &[u8],
    ) -> Result<StoredArtifact, StorageError>;

    /// Scan the PDF directory and describe every `.pdf` file in it.
    ///
    /// Each call re-scans; nothing is cached.
    async fn list_pdfs(&self) -> Result<Vec<PolicyListingEntry>, StorageError>;
}

/// Represents a file path (absolute or relative).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath(PathBuf);

impl FilePath {
    /// Creates a new file path from a PathBuf.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string (lossy conversion for non-UTF8 paths).
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().to_string()
    }

    /// Returns a reference to the inner PathBuf.
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl From<PathBuf> for FilePath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self::new(PathBuf::from(s))
    }
}

/// One artifact persisted by a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    /// Where the artifact was written.
    pub path: FilePath,

    /// Which representation it holds.
    pub format: ArtifactFormat,
}

impl StoredArtifact {
    /// Creates a stored artifact record.
    pub fn new(path: impl Into<FilePath>, format: ArtifactFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }
}

/// Read-only view of a stored PDF, computed at listing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyListingEntry {
    /// File name including the extension.
    pub name: String,

    /// Always [`ArtifactFormat::Pdf`] for the current listing.
    pub format: ArtifactFormat,

    /// Path as resolved by the storage layout.
    pub path: FilePath,

    /// Last modification time of the file.
    pub created: Timestamp,
}

impl PolicyListingEntry {
    /// Creates a listing entry for a PDF file.
    pub fn pdf(name: impl Into<String>, path: impl Into<FilePath>, created: Timestamp) -> Self {
        Self {
            name: name.into(),
            format: ArtifactFormat::Pdf,
            path: path.into(),
            created,
        }
    }
}

/// Errors that can occur during file storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Directory could not be created.
    #[error("Failed to create directory {path}: {message}")]
    CreateDirectory { path: String, message: String },

    /// Permission denied accessing the file or directory.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },
}

impl StorageError {
    /// Creates a directory creation error.
    pub fn create_directory(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::CreateDirectory {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<StorageError> for PolicyError {
    fn from(err: StorageError) -> Self {
        PolicyError::storage(err.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
