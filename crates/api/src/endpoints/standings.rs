//! Medal standings and exports.

use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::Utc;
use council_common::AppResult;
use council_core::{
    FestWinners, KeyedMedalCount, Standings, StandingsQuery, csv_filename, to_csv,
    to_printable_html,
};

use crate::{
    middleware::AppState,
    response::{ApiResponse, CsvAttachment},
};

/// Create standings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_standings))
        .route("/by-fest", get(winners_by_fest))
        .route("/departments", get(department_counts))
        .route("/classes", get(class_counts))
        .route("/export.csv", get(export_csv))
        .route("/export.html", get(export_html))
}

/// Class and department rankings, fest chart and medal distribution.
async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<StandingsQuery>,
) -> AppResult<ApiResponse<Standings>> {
    let standings = state.standings_service.standings(&query).await?;
    Ok(ApiResponse::ok(standings))
}

async fn winners_by_fest(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FestWinners>>> {
    let groups = state.standings_service.winners_by_fest().await?;
    Ok(ApiResponse::ok(groups))
}

async fn department_counts(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<KeyedMedalCount>>> {
    let counts = state.standings_service.department_medal_counts().await?;
    Ok(ApiResponse::ok(counts))
}

async fn class_counts(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<KeyedMedalCount>>> {
    let counts = state.standings_service.class_medal_counts().await?;
    Ok(ApiResponse::ok(counts))
}

/// Full standings as a CSV download.
async fn export_csv(State(state): State<AppState>) -> AppResult<CsvAttachment> {
    let now = Utc::now();
    let data = state
        .standings_service
        .export_data(&state.site.council_name, now)
        .await?;

    tracing::info!(
        classes = data.classes.len(),
        departments = data.departments.len(),
        "Standings exported as CSV"
    );

    Ok(CsvAttachment {
        filename: csv_filename(now.date_naive()),
        body: to_csv(&data),
    })
}

/// Full standings as a printable page.
async fn export_html(State(state): State<AppState>) -> AppResult<Html<String>> {
    let data = state
        .standings_service
        .export_data(&state.site.council_name, Utc::now())
        .await?;
    Ok(Html(to_printable_html(&data)))
}
