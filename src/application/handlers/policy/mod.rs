//! Policy command and query handlers.

// Command handlers
mod save_policy;

// Query handlers
mod list_policies;

pub use list_policies::ListPoliciesHandler;
pub use save_policy::{SavePolicyCommand, SavePolicyHandler, SavePolicyResult};
