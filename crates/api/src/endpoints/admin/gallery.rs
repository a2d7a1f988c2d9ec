//! Gallery management.

use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, put},
};
use council_common::AppResult;
use council_core::{CreateGalleryItemInput, GalleryItemResponse, UpdateGalleryItemInput};

use crate::{
    extractors::AdminAuth,
    middleware::AppState,
    response::{self, ApiResponse, Created},
};

/// Create admin gallery router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", put(update_item).delete(delete_item))
}

async fn list_items(
    _admin: AdminAuth,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<GalleryItemResponse>>> {
    let items = state.gallery_service.list().await?;
    Ok(ApiResponse::ok(items))
}

async fn create_item(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateGalleryItemInput>,
) -> AppResult<Created<GalleryItemResponse>> {
    let item = state.gallery_service.create(input).await?;
    Ok(Created(item))
}

async fn update_item(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateGalleryItemInput>,
) -> AppResult<ApiResponse<GalleryItemResponse>> {
    let item = state.gallery_service.update(&id, input).await?;
    Ok(ApiResponse::ok(item))
}

async fn delete_item(
    _admin: AdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    state.gallery_service.delete(&id).await?;
    Ok(response::ok())
}
