//! Foundation module - Shared domain primitives.
//!
//! Value objects that form the vocabulary of the policy domain.

mod timestamp;

pub use timestamp::Timestamp;
