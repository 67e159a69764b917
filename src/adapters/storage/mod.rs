//! Storage Adapters
//!
//! Implementations of the PolicyFileStorage port.
//!
//! ## Available Adapters
//!
//! - **LocalPolicyFileStorage** - One flat directory per artifact format
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::LocalPolicyFileStorage;
//!
//! let storage = LocalPolicyFileStorage::new(config.storage.clone());
//! ```

mod local_policy_storage;

pub use local_policy_storage::LocalPolicyFileStorage;
