//! Notice email dispatch.
//!
//! `POST /send` answers with a flat `{success, messageId | error}` body
//! instead of the usual envelope.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use council_common::AppResult;
use council_core::{DispatchEmailInput, DispatchOutcome, EmailLogResponse};
use serde::Serialize;

use crate::{extractors::AdminAuth, middleware::AppState, response::ApiResponse};

/// Error reported to the client when the transport fails.
const SEND_FAILED: &str = "Failed to send email";

/// Error reported when the body lacks a required key or has the wrong shape.
const MISSING_FIELDS: &str = "Missing required fields";

/// Create email router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(send_email))
        .route("/logs", get(email_logs))
}

/// Body of a dispatch response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
}

impl SendEmailResponse {
    fn failure(error: impl Into<String>, log_id: Option<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
            log_id,
        }
    }
}

impl From<DispatchOutcome> for SendEmailResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        if outcome.success {
            Self {
                success: true,
                message_id: outcome.message_id,
                error: None,
                log_id: outcome.log_id,
            }
        } else {
            Self::failure(SEND_FAILED, outcome.log_id)
        }
    }
}

/// Compose and send a notice email, then log the attempt.
async fn send_email(
    _admin: AdminAuth,
    State(state): State<AppState>,
    body: Result<Json<DispatchEmailInput>, JsonRejection>,
) -> Response {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected email request body");
            let error = match rejection {
                JsonRejection::JsonDataError(_) => MISSING_FIELDS.to_string(),
                other => other.body_text(),
            };
            return (
                StatusCode::BAD_REQUEST,
                Json(SendEmailResponse::failure(error, None)),
            )
                .into_response();
        }
    };

    match state.dispatch_service.dispatch(input).await {
        Ok(outcome) => {
            let status = if outcome.success {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, Json(SendEmailResponse::from(outcome))).into_response()
        }
        Err(e) => {
            if e.is_server_error() {
                tracing::error!(error = %e, "Email dispatch failed");
            }
            (
                e.status_code(),
                Json(SendEmailResponse::failure(e.to_string(), None)),
            )
                .into_response()
        }
    }
}

/// Most recent dispatch attempts.
async fn email_logs(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<EmailLogResponse>>> {
    let logs = state.dispatch_service.recent_logs().await?;
    Ok(ApiResponse::ok(logs))
}
