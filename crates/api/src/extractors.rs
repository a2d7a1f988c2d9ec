//! Request extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use council_common::AppError;
use council_db::entities::admin_session;

/// Authenticated admin extractor.
///
/// The session is placed in request extensions by
/// [`auth_middleware`](crate::middleware::auth_middleware).
#[derive(Debug, Clone)]
pub struct AdminAuth(pub admin_session::Model);

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<admin_session::Model>()
            .cloned()
            .map(AdminAuth)
            .ok_or(AppError::Unauthorized)
    }
}
