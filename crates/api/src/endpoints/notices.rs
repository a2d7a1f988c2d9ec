//! Public notice endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::get,
};
use council_common::AppResult;
use council_core::{NoticeRange, NoticeResponse, notice::DEFAULT_RECENT_LIMIT};

use super::LimitQuery;
use crate::{middleware::AppState, response::ApiResponse};

/// Create notice router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notices))
        .route("/recent", get(recent_notices))
        .route("/{id}", get(get_notice))
}

/// Published notices, newest first, optionally within `?start=&end=`.
async fn list_notices(
    State(state): State<AppState>,
    Query(range): Query<NoticeRange>,
) -> AppResult<ApiResponse<Vec<NoticeResponse>>> {
    let notices = state.notice_service.list_published(range).await?;
    Ok(ApiResponse::ok(notices))
}

async fn recent_notices(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> AppResult<ApiResponse<Vec<NoticeResponse>>> {
    let notices = state
        .notice_service
        .recent(query.or(DEFAULT_RECENT_LIMIT))
        .await?;
    Ok(ApiResponse::ok(notices))
}

/// A published notice. Drafts are reported as missing.
async fn get_notice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<NoticeResponse>> {
    let notice = state.notice_service.get_published(&id).await?;
    Ok(ApiResponse::ok(notice))
}
