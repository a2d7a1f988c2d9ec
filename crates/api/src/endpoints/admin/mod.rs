//! Admin console endpoints.
//!
//! Everything except `/login` requires an [`AdminAuth`](crate::extractors::AdminAuth)
//! session.

mod auth;
mod drafts;
mod emails;
mod events;
mod fests;
mod gallery;
mod reports;
mod winners;

use axum::Router;

use crate::middleware::AppState;

/// Create admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/fests", fests::router())
        .nest("/events", events::router())
        .nest("/winners", winners::router())
        .nest("/gallery", gallery::router())
        .nest("/drafts", drafts::router())
        .nest("/emails", emails::router())
        .nest("/reports", reports::router())
}
