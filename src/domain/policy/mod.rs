//! Policy module - what gets saved, and under which name.
//!
//! - `PolicyInput` - caller-supplied metadata (`companyName`, `title`, ...)
//! - `BaseName` - sanitised name shared by the three artifacts
//! - `ArtifactFormat` - template / pdf / docx
//! - `SavedPolicyPaths` - where a successful save wrote its artifacts
//! - `PolicyError` - pipeline error taxonomy

mod artifact_format;
mod base_name;
mod errors;
mod policy_input;
mod saved_paths;

pub use artifact_format::ArtifactFormat;
pub use base_name::BaseName;
pub use errors::PolicyError;
pub use policy_input::{PolicyInput, COMPANY_NAME_FIELD, TITLE_FIELD};
pub use saved_paths::SavedPolicyPaths;
