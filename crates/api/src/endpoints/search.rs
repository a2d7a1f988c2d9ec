//! Site search and home page counts.

use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use council_common::AppResult;
use council_core::{DashboardStats, SearchResults};
use serde::Deserialize;

use crate::{middleware::AppState, response::ApiResponse};

/// Create search router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/stats", get(stats))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Search fests, events and published notices.
async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<ApiResponse<SearchResults>> {
    let results = state.dashboard_service.search(&query.q).await?;
    Ok(ApiResponse::ok(results))
}

async fn stats(State(state): State<AppState>) -> AppResult<ApiResponse<DashboardStats>> {
    let stats = state.dashboard_service.stats().await?;
    Ok(ApiResponse::ok(stats))
}
