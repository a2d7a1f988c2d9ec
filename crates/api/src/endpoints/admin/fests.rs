//! Fest management.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use council_common::AppResult;
use council_core::{CreateFestInput, FestResponse, UpdateFestInput};

use crate::{
    extractors::AdminAuth,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Create admin fest router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fests).post(create_fest))
        .route("/{id}", put(update_fest).delete(delete_fest))
}

/// All fests by name, for pickers.
async fn list_fests(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FestResponse>>> {
    let fests = state.fest_service.list_by_name().await?;
    Ok(ApiResponse::ok(fests))
}

async fn create_fest(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateFestInput>,
) -> AppResult<Created<FestResponse>> {
    let fest = state.fest_service.create(input).await?;
    Ok(Created(fest))
}

async fn update_fest(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateFestInput>,
) -> AppResult<ApiResponse<FestResponse>> {
    let fest = state.fest_service.update(&id, input).await?;
    Ok(ApiResponse::ok(fest))
}

/// Delete a fest with its events and winners.
async fn delete_fest(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.fest_service.delete(&id).await?;
    Ok(response::ok())
}
