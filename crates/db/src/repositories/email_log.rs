//! Email log repository.

use std::sync::Arc;

use council_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect,
};

use crate::entities::{EmailLog, email_log};

/// Repository for email log operations.
#[derive(Clone)]
pub struct EmailLogRepository {
    db: Arc<DatabaseConnection>,
}

impl EmailLogRepository {
    /// Create a new email log repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Record a dispatch attempt.
    pub async fn create(&self, model: email_log::ActiveModel) -> AppResult<email_log::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The `limit` most recent dispatch attempts.
    pub async fn find_recent(&self, limit: u64) -> AppResult<Vec<email_log::Model>> {
        EmailLog::find()
            .order_by_desc(email_log::Column::SentAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all logged attempts.
    pub async fn count(&self) -> AppResult<u64> {
        EmailLog::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, Set};
    use serde_json::json;

    fn test_log(id: &str, status: email_log::EmailStatus) -> email_log::Model {
        email_log::Model {
            id: id.to_string(),
            draft_id: None,
            subject: "Fest results".to_string(),
            recipients: json!(["a@example.edu", "b@example.edu"]),
            sent_at: Utc::now().into(),
            status,
        }
    }

    #[tokio::test]
    async fn test_create_returns_inserted_row() {
        let log = test_log("l1", email_log::EmailStatus::Failed);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[log.clone()]])
                .into_connection(),
        );

        let repo = EmailLogRepository::new(db);
        let created = repo
            .create(email_log::ActiveModel {
                id: Set(log.id.clone()),
                draft_id: Set(None),
                subject: Set(log.subject.clone()),
                recipients: Set(log.recipients.clone()),
                sent_at: Set(log.sent_at),
                status: Set(log.status),
            })
            .await
            .unwrap();

        assert_eq!(created.status, email_log::EmailStatus::Failed);
        assert_eq!(created.recipient_list(), vec!["a@example.edu", "b@example.edu"]);
    }

    #[tokio::test]
    async fn test_find_recent_returns_rows() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_log("l2", email_log::EmailStatus::Sent),
                    test_log("l1", email_log::EmailStatus::Failed),
                ]])
                .into_connection(),
        );

        let repo = EmailLogRepository::new(db);
        let logs = repo.find_recent(50).await.unwrap();

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id, "l2");
    }
}
