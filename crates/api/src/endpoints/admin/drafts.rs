//! Notice drafts.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use council_common::AppResult;
use council_core::{CreateNoticeInput, NoticeResponse, UpdateNoticeInput};

use crate::{
    extractors::AdminAuth,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Create admin draft router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drafts).post(create_draft))
        .route(
            "/{id}",
            get(get_draft).put(update_draft).delete(delete_draft),
        )
        .route("/{id}/publish", post(publish_draft))
}

/// Drafts and published notices, newest first.
async fn list_drafts(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<NoticeResponse>>> {
    let drafts = state.notice_service.list_all().await?;
    Ok(ApiResponse::ok(drafts))
}

async fn get_draft(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<NoticeResponse>> {
    let draft = state.notice_service.get(&id).await?;
    Ok(ApiResponse::ok(draft))
}

async fn create_draft(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateNoticeInput>,
) -> AppResult<Created<NoticeResponse>> {
    let draft = state.notice_service.create(input).await?;
    Ok(Created(draft))
}

async fn update_draft(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateNoticeInput>,
) -> AppResult<ApiResponse<NoticeResponse>> {
    let draft = state.notice_service.update(&id, input).await?;
    Ok(ApiResponse::ok(draft))
}

/// Publish a draft. Already published notices are returned unchanged.
async fn publish_draft(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<NoticeResponse>> {
    let notice = state.notice_service.publish(&id).await?;
    Ok(ApiResponse::ok(notice))
}

async fn delete_draft(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.notice_service.delete(&id).await?;
    Ok(response::ok())
}
