//! Event management.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use council_common::AppResult;
use council_core::{CreateEventInput, EventResponse, UpdateEventInput};

use crate::{
    extractors::AdminAuth,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Create admin event router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/{id}", put(update_event).delete(delete_event))
}

async fn list_events(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let events = state.event_service.list().await?;
    Ok(ApiResponse::ok(events))
}

async fn create_event(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateEventInput>,
) -> AppResult<Created<EventResponse>> {
    let event = state.event_service.create(input).await?;
    Ok(Created(event))
}

async fn update_event(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateEventInput>,
) -> AppResult<ApiResponse<EventResponse>> {
    let event = state.event_service.update(&id, input).await?;
    Ok(ApiResponse::ok(event))
}

async fn delete_event(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.event_service.delete(&id).await?;
    Ok(response::ok())
}
