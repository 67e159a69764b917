//! HTTP DTOs (Data Transfer Objects) for policy endpoints.
//!
//! Field names follow the browser client: camelCase requests, an envelope
//! with a `success` flag on every response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::SavePolicyCommand;
use crate::domain::policy::{ArtifactFormat, PolicyError, PolicyInput, SavedPolicyPaths};
use crate::ports::PolicyListingEntry;

/// Message returned after all three artifacts are written.
pub const SAVED_MESSAGE: &str = "Documents saved successfully";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to save a policy.
///
/// Both fields are optional at the JSON level so that a missing one becomes a
/// pipeline failure with a readable message rather than a body rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePolicyRequest {
    /// Policy metadata; must carry `companyName` and `title`.
    #[serde(default)]
    pub policy_data: Value,
    /// Rendered HTML document.
    #[serde(default)]
    pub html_content: Option<String>,
}

impl SavePolicyRequest {
    /// Validates the payload shape and builds the save command.
    pub fn into_command(self) -> Result<SavePolicyCommand, PolicyError> {
        let policy = PolicyInput::from_value(self.policy_data)?;
        let html_content = self
            .html_content
            .ok_or_else(|| PolicyError::invalid_input("'htmlContent' is required"))?;

        Ok(SavePolicyCommand {
            policy,
            html_content,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Paths of the saved artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedPathsResponse {
    pub template: String,
    pub pdf: String,
    pub docx: String,
}

impl From<&SavedPolicyPaths> for SavedPathsResponse {
    fn from(paths: &SavedPolicyPaths) -> Self {
        Self {
            template: paths.template.to_string_lossy().to_string(),
            pdf: paths.pdf.to_string_lossy().to_string(),
            docx: paths.docx.to_string_lossy().to_string(),
        }
    }
}

/// Response for a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePolicyResponse {
    pub success: bool,
    pub message: String,
    pub paths: SavedPathsResponse,
}

impl SavePolicyResponse {
    pub fn saved(paths: &SavedPolicyPaths) -> Self {
        Self {
            success: true,
            message: SAVED_MESSAGE.to_string(),
            paths: paths.into(),
        }
    }
}

/// One stored PDF in a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyListingResponse {
    /// File name including the extension.
    pub name: String,
    /// Always `"pdf"`.
    #[serde(rename = "type")]
    pub format: ArtifactFormat,
    /// Path relative to the storage layout.
    pub path: String,
    /// Last modification time, RFC 3339 UTC.
    pub created: String,
}

impl From<&PolicyListingEntry> for PolicyListingResponse {
    fn from(entry: &PolicyListingEntry) -> Self {
        Self {
            name: entry.name.clone(),
            format: entry.format,
            path: entry.path.to_string_lossy(),
            created: entry.created.to_rfc3339(),
        }
    }
}

/// Response for the policy listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPoliciesResponse {
    pub success: bool,
    pub policies: Vec<PolicyListingResponse>,
}

impl ListPoliciesResponse {
    pub fn from_entries(entries: &[PolicyListingEntry]) -> Self {
        Self {
            success: true,
            policies: entries.iter().map(PolicyListingResponse::from).collect(),
        }
    }
}

/// Failure envelope shared by every policy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
