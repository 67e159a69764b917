//! HTTP handlers for policy endpoints.
//!
//! These handlers connect Axum routes to the save and list handlers of the
//! application layer. Every failure is answered with the same
//! `{ success: false, error }` envelope.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{ListPoliciesHandler, SavePolicyHandler};
use crate::domain::policy::PolicyError;
use crate::ports::{DocumentConverter, PolicyFileStorage};

use super::dto::{ErrorResponse, ListPoliciesResponse, SavePolicyRequest, SavePolicyResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct PolicyAppState {
    pub storage: Arc<dyn PolicyFileStorage>,
    pub pdf_converter: Arc<dyn DocumentConverter>,
    pub docx_converter: Arc<dyn DocumentConverter>,
}

impl PolicyAppState {
    pub fn new(
        storage: Arc<dyn PolicyFileStorage>,
        pdf_converter: Arc<dyn DocumentConverter>,
        docx_converter: Arc<dyn DocumentConverter>,
    ) -> Self {
        Self {
            storage,
            pdf_converter,
            docx_converter,
        }
    }

    pub fn save_policy_handler(&self) -> SavePolicyHandler {
        SavePolicyHandler::new(
            self.storage.clone(),
            self.pdf_converter.clone(),
            self.docx_converter.clone(),
        )
    }

    pub fn list_policies_handler(&self) -> ListPoliciesHandler {
        ListPoliciesHandler::new(self.storage.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/save-policy - Save a policy as template, PDF and DOCX
pub async fn save_policy(
    State(state): State<PolicyAppState>,
    payload: Result<Json<SavePolicyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PolicyApiError> {
    let Json(request) = payload?;
    let cmd = request.into_command()?;

    let result = state.save_policy_handler().handle(cmd).await?;

    Ok(Json(SavePolicyResponse::saved(&result.paths)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/policies - List stored PDFs
pub async fn list_policies(
    State(state): State<PolicyAppState>,
) -> Result<impl IntoResponse, PolicyApiError> {
    let entries = state.list_policies_handler().handle().await?;

    Ok(Json(ListPoliciesResponse::from_entries(&entries)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug)]
pub enum PolicyApiError {
    /// Body was not acceptable JSON.
    BadRequest(String),
    /// The pipeline failed; the cause is not distinguished outwardly.
    Internal(String),
}

impl From<JsonRejection> for PolicyApiError {
    fn from(rejection: JsonRejection) -> Self {
        PolicyApiError::BadRequest(rejection.body_text())
    }
}

impl From<PolicyError> for PolicyApiError {
    fn from(err: PolicyError) -> Self {
        PolicyApiError::Internal(err.to_string())
    }
}

impl IntoResponse for PolicyApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            PolicyApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            PolicyApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
