//! Public event endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use council_common::AppResult;
use council_core::{EventDetailResponse, EventResponse, GalleryItemResponse, WinnerResponse};

use super::LimitQuery;
use crate::{middleware::AppState, response::ApiResponse};

const UPCOMING_LIMIT: u64 = 20;

/// Create event router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events))
        .route("/upcoming", get(upcoming_events))
        .route("/{id}", get(get_event))
        .route("/{id}/winners", get(event_winners))
        .route("/{id}/gallery", get(event_gallery))
}

/// All events with their fest.
async fn list_events(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let events = state.event_service.list().await?;
    Ok(ApiResponse::ok(events))
}

async fn upcoming_events(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let today = Utc::now().date_naive();
    let events = state
        .event_service
        .upcoming(today, query.or(UPCOMING_LIMIT))
        .await?;
    Ok(ApiResponse::ok(events))
}

/// An event with its fest and winners grouped by medal.
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<EventDetailResponse>> {
    let event = state.event_service.detail(&id).await?;
    Ok(ApiResponse::ok(event))
}

async fn event_winners(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<WinnerResponse>>> {
    let winners = state.winner_service.by_event(&id).await?;
    Ok(ApiResponse::ok(winners))
}

async fn event_gallery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<GalleryItemResponse>>> {
    let items = state.gallery_service.by_event(&id).await?;
    Ok(ApiResponse::ok(items))
}
