//! HTTP adapter for the policy module.
//!
//! # Endpoints
//!
//! - `POST /api/save-policy` - Persist a policy as template, PDF and DOCX
//! - `GET /api/policies` - List previously generated PDFs

pub mod dto;
pub mod handlers;
pub mod routes;

// Re-export commonly used types
pub use handlers::PolicyAppState;
pub use routes::policy_router;
