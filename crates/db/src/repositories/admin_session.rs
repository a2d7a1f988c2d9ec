//! Admin session repository.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use council_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entities::{AdminSession, admin_session};

/// Repository for admin session operations.
#[derive(Clone)]
pub struct AdminSessionRepository {
    db: Arc<DatabaseConnection>,
}

impl AdminSessionRepository {
    /// Create a new admin session repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Store a new session.
    pub async fn create(
        &self,
        model: admin_session::ActiveModel,
    ) -> AppResult<admin_session::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a session by token that has not expired at `now`.
    pub async fn find_active_by_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<admin_session::Model>> {
        AdminSession::find()
            .filter(admin_session::Column::Token.eq(token))
            .filter(admin_session::Column::ExpiresAt.gt(now))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete the session with this token. Returns whether a row was removed.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<bool> {
        let result = AdminSession::delete_many()
            .filter(admin_session::Column::Token.eq(token))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Delete all sessions that expired at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = AdminSession::delete_many()
            .filter(admin_session::Column::ExpiresAt.lte(now))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
