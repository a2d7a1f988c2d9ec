//! Public fest endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use council_common::AppResult;
use council_core::{EventResponse, FestDetailResponse, FestResponse, GalleryItemResponse};
use council_db::entities::fest::FestType;
use serde::Deserialize;

use super::LimitQuery;
use crate::{middleware::AppState, response::ApiResponse};

const UPCOMING_LIMIT: u64 = 20;

/// Create fest router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fests))
        .route("/upcoming", get(upcoming_fests))
        .route("/{id}", get(get_fest))
        .route("/{id}/events", get(fest_events))
        .route("/{id}/gallery", get(fest_gallery))
}

#[derive(Debug, Deserialize)]
struct ListFestsQuery {
    #[serde(rename = "type")]
    fest_type: Option<FestType>,
}

/// List fests, newest first, optionally by type.
async fn list_fests(
    State(state): State<AppState>,
    Query(query): Query<ListFestsQuery>,
) -> AppResult<ApiResponse<Vec<FestResponse>>> {
    let fests = state.fest_service.list(query.fest_type).await?;
    Ok(ApiResponse::ok(fests))
}

/// Fests that have not ended yet.
async fn upcoming_fests(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<ApiResponse<Vec<FestResponse>>> {
    let today = Utc::now().date_naive();
    let fests = state
        .fest_service
        .upcoming(today, query.or(UPCOMING_LIMIT))
        .await?;
    Ok(ApiResponse::ok(fests))
}

/// A fest with its events.
async fn get_fest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<FestDetailResponse>> {
    let fest = state.fest_service.detail(&id).await?;
    Ok(ApiResponse::ok(fest))
}

async fn fest_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<EventResponse>>> {
    let events = state.event_service.by_fest(&id).await?;
    Ok(ApiResponse::ok(events))
}

async fn fest_gallery(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<GalleryItemResponse>>> {
    let items = state.gallery_service.by_fest(&id).await?;
    Ok(ApiResponse::ok(items))
}
