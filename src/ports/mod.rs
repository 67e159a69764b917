//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application layer and the outside world. Adapters implement these ports.
//!
//! - `PolicyFileStorage` - Directory layout, artifact writes, PDF listing
//! - `DocumentConverter` - HTML to PDF / DOCX rendering backends

mod document_converter;
mod policy_file_storage;

pub use document_converter::{ConversionError, ConversionFailure, DocumentConverter};
pub use policy_file_storage::{
    FilePath, PolicyFileStorage, PolicyListingEntry, StorageError, StoredArtifact,
};
