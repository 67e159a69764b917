//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Local filesystem storage for policy artifacts
//! - `document` - Pandoc rendering backend
//! - `http` - Axum REST API and static frontend

pub mod document;
pub mod http;
pub mod storage;

pub use document::PandocConverter;
pub use storage::LocalPolicyFileStorage;
