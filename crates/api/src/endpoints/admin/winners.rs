//! Winner management.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use council_common::AppResult;
use council_core::{CreateWinnerInput, UpdateWinnerInput, WinnerResponse};

use crate::{
    extractors::AdminAuth,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Create admin winner router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_winners).post(create_winner))
        .route("/{id}", put(update_winner).delete(delete_winner))
}

async fn list_winners(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<WinnerResponse>>> {
    let winners = state.winner_service.list().await?;
    Ok(ApiResponse::ok(winners))
}

async fn create_winner(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateWinnerInput>,
) -> AppResult<Created<WinnerResponse>> {
    let winner = state.winner_service.create(input).await?;
    Ok(Created(winner))
}

async fn update_winner(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateWinnerInput>,
) -> AppResult<ApiResponse<WinnerResponse>> {
    let winner = state.winner_service.update(&id, input).await?;
    Ok(ApiResponse::ok(winner))
}

async fn delete_winner(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.winner_service.delete(&id).await?;
    Ok(response::ok())
}
