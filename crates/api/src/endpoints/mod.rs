//! API endpoints.

mod admin;
mod events;
mod fests;
mod gallery;
mod notices;
mod search;
mod standings;
mod winners;

use axum::Router;
use serde::Deserialize;

use crate::middleware::AppState;

/// Upper bound for caller-supplied list limits.
const MAX_LIMIT: u64 = 100;

/// `?limit=` query shared by the short list endpoints.
#[derive(Debug, Default, Deserialize)]
struct LimitQuery {
    limit: Option<u64>,
}

impl LimitQuery {
    fn or(&self, default: u64) -> u64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(search::router())
        .nest("/fests", fests::router())
        .nest("/events", events::router())
        .nest("/winners", winners::router())
        .nest("/standings", standings::router())
        .nest("/gallery", gallery::router())
        .nest("/notices", notices::router())
        .nest("/admin", admin::router())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_defaults_and_clamps() {
        assert_eq!(LimitQuery { limit: None }.or(12), 12);
        assert_eq!(LimitQuery { limit: Some(0) }.or(12), 1);
        assert_eq!(LimitQuery { limit: Some(5000) }.or(12), MAX_LIMIT);
    }
}
