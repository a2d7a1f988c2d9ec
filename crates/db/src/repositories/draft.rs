//! Draft (notice) repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use council_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::lower_like;
use crate::entities::{Draft, draft};

/// Repository for draft operations.
#[derive(Clone)]
pub struct DraftRepository {
    db: Arc<DatabaseConnection>,
}

impl DraftRepository {
    /// Create a new draft repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a draft by ID, in any status.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<draft::Model>> {
        Draft::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a draft by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<draft::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Draft: {id}")))
    }

    /// Find a draft by ID only if it is published.
    pub async fn find_published_by_id(&self, id: &str) -> AppResult<Option<draft::Model>> {
        Draft::find_by_id(id)
            .filter(draft::Column::Status.eq(draft::DraftStatus::Published))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All drafts for the admin list, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<draft::Model>> {
        Draft::find()
            .order_by_desc(draft::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Published drafts, most recently published first.
    pub async fn find_published(&self) -> AppResult<Vec<draft::Model>> {
        Draft::find()
            .filter(draft::Column::Status.eq(draft::DraftStatus::Published))
            .order_by_desc(draft::Column::PublishedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The `limit` most recently published drafts.
    pub async fn find_recent_published(&self, limit: u64) -> AppResult<Vec<draft::Model>> {
        Draft::find()
            .filter(draft::Column::Status.eq(draft::DraftStatus::Published))
            .order_by_desc(draft::Column::PublishedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Published drafts whose `published_at` falls within `[start, end]`.
    pub async fn find_published_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<draft::Model>> {
        Draft::find()
            .filter(draft::Column::Status.eq(draft::DraftStatus::Published))
            .filter(draft::Column::PublishedAt.gte(start))
            .filter(draft::Column::PublishedAt.lte(end))
            .order_by_desc(draft::Column::PublishedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Case-insensitive substring search over published titles and content.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<draft::Model>> {
        Draft::find()
            .filter(draft::Column::Status.eq(draft::DraftStatus::Published))
            .filter(
                Condition::any()
                    .add(lower_like(draft::Column::Title, query))
                    .add(lower_like(draft::Column::Content, query)),
            )
            .order_by_desc(draft::Column::PublishedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all drafts.
    pub async fn count(&self) -> AppResult<u64> {
        Draft::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count published drafts.
    pub async fn count_published(&self) -> AppResult<u64> {
        Draft::find()
            .filter(draft::Column::Status.eq(draft::DraftStatus::Published))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new draft.
    pub async fn create(&self, model: draft::ActiveModel) -> AppResult<draft::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a draft.
    pub async fn update(&self, model: draft::ActiveModel) -> AppResult<draft::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark a draft as published at `now`.
    pub async fn publish(&self, id: &str, now: DateTime<Utc>) -> AppResult<draft::Model> {
        let draft = self.get_by_id(id).await?;

        let mut active: draft::ActiveModel = draft.into();
        active.status = Set(draft::DraftStatus::Published);
        active.published_at = Set(Some(now.into()));

        self.update(active).await
    }

    /// Delete a draft. Email logs that referenced it keep their rows.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Draft::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_draft(id: &str, status: draft::DraftStatus) -> draft::Model {
        let published_at = match status {
            draft::DraftStatus::Published => Some(Utc::now().into()),
            draft::DraftStatus::Draft => None,
        };
        draft::Model {
            id: id.to_string(),
            title: "Holiday notice".to_string(),
            content: "College closed on Friday".to_string(),
            file_url: None,
            status,
            published_at,
            created_by: "admin".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_published_by_id_hides_drafts() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<draft::Model>::new()])
                .into_connection(),
        );

        let repo = DraftRepository::new(db);
        assert!(repo.find_published_by_id("d1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_publish_sets_status_and_timestamp() {
        let original = test_draft("d1", draft::DraftStatus::Draft);
        let now = Utc::now();
        let mut published = original.clone();
        published.status = draft::DraftStatus::Published;
        published.published_at = Some(now.into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[original]])
                .append_query_results([[published]])
                .into_connection(),
        );

        let repo = DraftRepository::new(db);
        let result = repo.publish("d1", now).await.unwrap();

        assert_eq!(result.status, draft::DraftStatus::Published);
        assert!(result.published_at.is_some());
    }

    #[tokio::test]
    async fn test_publish_missing_draft_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<draft::Model>::new()])
                .into_connection(),
        );

        let repo = DraftRepository::new(db);
        let result = repo.publish("missing", Utc::now()).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_count_published() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(7))
                }]])
                .into_connection(),
        );

        let repo = DraftRepository::new(db);
        assert_eq!(repo.count_published().await.unwrap(), 7);
    }
}
