//! HTTP adapters - REST API implementations.
//!
//! `policy` exposes the save/list endpoints; `app` assembles the full router
//! with static files and middleware.

pub mod app;
pub mod policy;

// Re-export key types for convenience
pub use app::build_app;
pub use policy::{policy_router, PolicyAppState};
