//! Student council site server entry point.
//!
//! `council` serves the API. `council hash-password <password>` prints an
//! Argon2 hash for the `admin.password_hash` setting.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{Router, middleware};
use council_api::{AppState, auth_middleware, router as api_router};
use council_common::Config;
use council_core::{
    AdminAuthService, DashboardService, DispatchService, EmailService, EventService,
    FestService, GalleryService, NoticeService, StandingsService, WinnerService, hash_password,
};
use council_db::repositories::{
    AdminSessionRepository, DraftRepository, EmailLogRepository, EventRepository,
    FestRepository, GalleryRepository, WinnerRepository,
};
use sea_orm::DatabaseConnection;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Wire repositories into services.
fn build_state(db: Arc<DatabaseConnection>, config: &Config) -> AppState {
    let fest_repo = FestRepository::new(Arc::clone(&db));
    let event_repo = EventRepository::new(Arc::clone(&db));
    let winner_repo = WinnerRepository::new(Arc::clone(&db));
    let gallery_repo = GalleryRepository::new(Arc::clone(&db));
    let draft_repo = DraftRepository::new(Arc::clone(&db));
    let email_log_repo = EmailLogRepository::new(Arc::clone(&db));
    let session_repo = AdminSessionRepository::new(db);

    let email_service = EmailService::new(config.email.clone());
    if !email_service.is_enabled() {
        tracing::warn!("Email is not configured; notice dispatch will report failures");
    }

    AppState {
        fest_service: FestService::new(fest_repo.clone()),
        event_service: EventService::new(
            event_repo.clone(),
            fest_repo.clone(),
            winner_repo.clone(),
        ),
        winner_service: WinnerService::new(winner_repo.clone(), event_repo.clone()),
        gallery_service: GalleryService::new(
            gallery_repo.clone(),
            fest_repo.clone(),
            event_repo.clone(),
        ),
        notice_service: NoticeService::new(draft_repo.clone()),
        standings_service: StandingsService::new(winner_repo.clone()),
        dashboard_service: DashboardService::new(
            fest_repo,
            event_repo,
            winner_repo,
            gallery_repo,
            draft_repo.clone(),
        ),
        dispatch_service: DispatchService::new(
            draft_repo,
            email_log_repo,
            Arc::new(email_service),
            config.site.clone(),
        ),
        admin_auth_service: AdminAuthService::new(session_repo, &config.admin),
        site: config.site.clone(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let password = args.next().context("usage: council hash-password <password>")?;
        println!("{}", hash_password(&password)?);
        return Ok(());
    }

    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "council=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting council server...");

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Connect to database
    let db = council_db::init(&config.database).await?;

    // Run migrations
    let applied = council_db::migrate(&db).await?;
    info!(applied, "Migrations completed");

    let state = build_state(Arc::new(db), &config);

    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("invalid server.host: {}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Listening on {} ({})", addr, config.server.url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
