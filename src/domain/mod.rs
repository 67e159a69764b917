//! Domain layer containing the policy vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared value objects (timestamps)
//! - `policy` - Policy input, base-name derivation, artifact formats, errors

pub mod foundation;
pub mod policy;
