//! Admin reports.

use axum::{Router, extract::State, routing::get};
use council_common::AppResult;
use council_core::AdminReport;

use crate::{extractors::AdminAuth, middleware::AppState, response::ApiResponse};

/// Create reports router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(report))
}

/// Site counts with the class medal table and top performers.
async fn report(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AdminReport>> {
    let report = state.dashboard_service.report().await?;
    Ok(ApiResponse::ok(report))
}
