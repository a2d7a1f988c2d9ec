//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use council_common::config::SiteConfig;
use council_core::{
    AdminAuthService, DashboardService, DispatchService, EventService, FestService,
    GalleryService, NoticeService, StandingsService, WinnerService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub fest_service: FestService,
    pub event_service: EventService,
    pub winner_service: WinnerService,
    pub gallery_service: GalleryService,
    pub notice_service: NoticeService,
    pub standings_service: StandingsService,
    pub dashboard_service: DashboardService,
    pub dispatch_service: DispatchService,
    pub admin_auth_service: AdminAuthService,
    pub site: SiteConfig,
}

/// Bearer token from the `Authorization` header, if present.
pub fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware.
///
/// Resolves the bearer token to an unexpired admin session. Requests
/// without one pass through unauthenticated.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req).map(str::to_owned) {
        match state.admin_auth_service.authenticate(&token).await {
            Ok(session) => {
                req.extensions_mut().insert(session);
            }
            Err(e) if e.is_server_error() => {
                tracing::warn!(error = %e, "Session lookup failed");
            }
            Err(_) => {}
        }
    }

    next.run(req).await
}
