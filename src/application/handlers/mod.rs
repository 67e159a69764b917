//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod policy;

pub use policy::{ListPoliciesHandler, SavePolicyCommand, SavePolicyHandler, SavePolicyResult};
