//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `council_test`)
//!   `TEST_DB_PASSWORD` (default: `council_test`)
//!   `TEST_DB_NAME` (default: `council_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use council_db::entities::{admin_session, draft, event, fest, winner};
use council_db::repositories::{
    AdminSessionRepository, DraftRepository, EventRepository, FestRepository, WinnerRepository,
};
use council_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_fest_with_winner(db: &TestDatabase) -> Arc<sea_orm::DatabaseConnection> {
    let conn = Arc::new(db.connection().clone());

    FestRepository::new(conn.clone())
        .create(fest::ActiveModel {
            id: Set("fest1".to_string()),
            name: Set("Aurora".to_string()),
            fest_type: Set(fest::FestType::Cultural),
            description: Set("Cultural fest".to_string()),
            start_date: Set(date(2025, 1, 10)),
            end_date: Set(date(2025, 1, 12)),
            banner_url: Set(None),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    EventRepository::new(conn.clone())
        .create(event::ActiveModel {
            id: Set("event1".to_string()),
            fest_id: Set("fest1".to_string()),
            name: Set("Solo Dance".to_string()),
            description: Set(String::new()),
            event_date: Set(date(2025, 1, 11)),
            venue: Set(None),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    WinnerRepository::new(conn.clone())
        .create(winner::ActiveModel {
            id: Set("winner1".to_string()),
            event_id: Set("event1".to_string()),
            student_name: Set("Asha".to_string()),
            class_name: Set("TE-COMP".to_string()),
            department: Set("Computer".to_string()),
            medal: Set(winner::Medal::Gold),
            position: Set(1),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();

    conn
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_winner_join_resolves_event_and_fest() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    let conn = seed_fest_with_winner(&db).await;

    let rows = WinnerRepository::new(conn).find_all_with_event().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].event.as_ref().unwrap().name, "Solo Dance");
    assert_eq!(rows[0].fest.as_ref().unwrap().name, "Aurora");

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_fest_cascades_to_winners() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    let conn = seed_fest_with_winner(&db).await;

    FestRepository::new(conn.clone()).delete("fest1").await.unwrap();

    let winners = WinnerRepository::new(conn.clone());
    assert_eq!(winners.count().await.unwrap(), 0);
    assert!(
        EventRepository::new(conn)
            .find_by_id("event1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_publish_lists_newest_first() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    let conn = Arc::new(db.connection().clone());
    let repo = DraftRepository::new(conn);

    for id in ["d1", "d2"] {
        repo.create(draft::ActiveModel {
            id: Set(id.to_string()),
            title: Set(format!("Notice {id}")),
            content: Set("Body".to_string()),
            file_url: Set(None),
            status: Set(draft::DraftStatus::Draft),
            published_at: Set(None),
            created_by: Set("admin".to_string()),
            created_at: Set(Utc::now().into()),
        })
        .await
        .unwrap();
    }

    assert!(repo.find_published().await.unwrap().is_empty());

    let now = Utc::now();
    repo.publish("d1", now).await.unwrap();
    repo.publish("d2", now + Duration::seconds(5)).await.unwrap();

    let published = repo.find_published().await.unwrap();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].id, "d2");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_expired_sessions_are_not_active() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    db.cleanup().await.unwrap();
    let conn = Arc::new(db.connection().clone());
    let repo = AdminSessionRepository::new(conn);
    let now = Utc::now();

    repo.create(admin_session::ActiveModel {
        id: Set("s1".to_string()),
        token: Set("expired-token".to_string()),
        created_at: Set((now - Duration::hours(13)).into()),
        expires_at: Set((now - Duration::hours(1)).into()),
    })
    .await
    .unwrap();

    assert!(
        repo.find_active_by_token("expired-token", now)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}
