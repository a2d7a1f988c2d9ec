//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250601_000001_create_fest_table;
mod m20250601_000002_create_event_table;
mod m20250601_000003_create_winner_table;
mod m20250601_000004_create_gallery_table;
mod m20250601_000005_create_draft_table;
mod m20250601_000006_create_email_log_table;
mod m20250601_000007_create_admin_session_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_fest_table::Migration),
            Box::new(m20250601_000002_create_event_table::Migration),
            Box::new(m20250601_000003_create_winner_table::Migration),
            Box::new(m20250601_000004_create_gallery_table::Migration),
            Box::new(m20250601_000005_create_draft_table::Migration),
            Box::new(m20250601_000006_create_email_log_table::Migration),
            Box::new(m20250601_000007_create_admin_session_table::Migration),
        ]
    }
}
