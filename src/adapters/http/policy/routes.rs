//! Route configuration for policy endpoints.
//!
//! Configures Axum router with policy-related routes.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{list_policies, save_policy, PolicyAppState};

/// Creates the policy router with all endpoints.
///
/// Routes:
/// - `POST /api/save-policy` - Save template, PDF and DOCX
/// - `GET /api/policies` - List stored PDFs
pub fn policy_router() -> Router<PolicyAppState> {
    Router::new()
        .route("/api/save-policy", post(save_policy))
        .route("/api/policies", get(list_policies))
}
