//! Public winner endpoints.

use axum::{Router, extract::State, routing::get};
use council_common::AppResult;
use council_core::WinnerResponse;

use crate::{middleware::AppState, response::ApiResponse};

/// Create winner router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_winners))
}

/// All winners with their event and fest.
async fn list_winners(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<WinnerResponse>>> {
    let winners = state.winner_service.list().await?;
    Ok(ApiResponse::ok(winners))
}
