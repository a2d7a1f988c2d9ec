//! Public gallery endpoints.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use council_common::AppResult;
use council_core::{GalleryItemResponse, gallery::DEFAULT_RECENT_LIMIT};

use super::LimitQuery;
use crate::{middleware::AppState, response::ApiResponse};

/// Create gallery router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items))
        .route("/recent", get(recent_items))
}

/// All gallery items with their fest and event.
async fn list_items(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<GalleryItemResponse>>> {
    let items = state.gallery_service.list().await?;
    Ok(ApiResponse::ok(items))
}

async fn recent_items(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<ApiResponse<Vec<GalleryItemResponse>>> {
    let items = state
        .gallery_service
        .recent(query.or(DEFAULT_RECENT_LIMIT))
        .await?;
    Ok(ApiResponse::ok(items))
}
