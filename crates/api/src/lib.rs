//! HTTP API layer for the student council site.
//!
//! - **Endpoints**: public read views and the admin console
//! - **Extractors**: admin authentication
//! - **Middleware**: bearer session resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
