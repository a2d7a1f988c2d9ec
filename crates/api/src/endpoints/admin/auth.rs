//! Admin login, logout and session endpoints.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use council_common::AppResult;
use council_core::{LoginInput, LoginResponse, SessionInfo};

use crate::{
    extractors::AdminAuth,
    middleware::AppState,
    response::{self, ApiResponse},
};

/// Create auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
}

/// Exchange the admin password for a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let session = state.admin_auth_service.login(input).await?;
    Ok(ApiResponse::ok(session))
}

/// End the current session.
async fn logout(
    AdminAuth(session): AdminAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.admin_auth_service.logout(&session.token).await?;
    Ok(response::ok())
}

async fn session(AdminAuth(session): AdminAuth) -> ApiResponse<SessionInfo> {
    ApiResponse::ok(SessionInfo::from(&session))
}
