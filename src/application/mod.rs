//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (save) are kept apart from query handlers (list).

pub mod handlers;

pub use handlers::{ListPoliciesHandler, SavePolicyCommand, SavePolicyHandler, SavePolicyResult};
