//! Fest repository.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use council_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::lower_like;
use crate::entities::{Event, Fest, event, fest};

/// Minimal fest reference attached to joined rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FestRef {
    pub id: String,
    pub name: String,
    pub fest_type: fest::FestType,
}

impl From<&fest::Model> for FestRef {
    fn from(f: &fest::Model) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
            fest_type: f.fest_type,
        }
    }
}

/// A fest together with its events (event date ascending).
#[derive(Debug, Clone)]
pub struct FestWithEvents {
    pub fest: fest::Model,
    pub events: Vec<event::Model>,
}

/// Load fests by ID, keyed by ID.
pub(crate) async fn fetch_fest_map(
    db: &DatabaseConnection,
    ids: Vec<String>,
) -> AppResult<HashMap<String, fest::Model>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let fests = Fest::find()
        .filter(fest::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(fests.into_iter().map(|f| (f.id.clone(), f)).collect())
}

/// Repository for fest operations.
#[derive(Clone)]
pub struct FestRepository {
    db: Arc<DatabaseConnection>,
}

impl FestRepository {
    /// Create a new fest repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a fest by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<fest::Model>> {
        Fest::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a fest by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<fest::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fest: {id}")))
    }

    /// All fests, most recent start date first.
    pub async fn find_all(&self) -> AppResult<Vec<fest::Model>> {
        Fest::find()
            .order_by_desc(fest::Column::StartDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All fests ordered by name, for admin pickers.
    pub async fn find_all_by_name(&self) -> AppResult<Vec<fest::Model>> {
        Fest::find()
            .order_by_asc(fest::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fests of one type, most recent start date first.
    pub async fn find_by_type(&self, fest_type: fest::FestType) -> AppResult<Vec<fest::Model>> {
        Fest::find()
            .filter(fest::Column::FestType.eq(fest_type))
            .order_by_desc(fest::Column::StartDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fests starting on or after `today`, soonest first.
    pub async fn find_upcoming(&self, today: NaiveDate, limit: u64) -> AppResult<Vec<fest::Model>> {
        Fest::find()
            .filter(fest::Column::StartDate.gte(today))
            .order_by_asc(fest::Column::StartDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// A fest with all of its events.
    pub async fn find_with_events(&self, id: &str) -> AppResult<Option<FestWithEvents>> {
        let Some(fest) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let events = Event::find()
            .filter(event::Column::FestId.eq(id))
            .order_by_asc(event::Column::EventDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(Some(FestWithEvents { fest, events }))
    }

    /// Case-insensitive substring search on name and description.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<fest::Model>> {
        Fest::find()
            .filter(
                Condition::any()
                    .add(lower_like(fest::Column::Name, query))
                    .add(lower_like(fest::Column::Description, query)),
            )
            .order_by_desc(fest::Column::StartDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all fests.
    pub async fn count(&self) -> AppResult<u64> {
        Fest::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new fest.
    pub async fn create(&self, model: fest::ActiveModel) -> AppResult<fest::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a fest.
    pub async fn update(&self, model: fest::ActiveModel) -> AppResult<fest::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a fest. Its events and their winners go with it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Fest::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
