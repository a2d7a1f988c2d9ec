//! Event repository.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use council_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::fest::{FestRef, fetch_fest_map};
use super::lower_like;
use crate::entities::{Event, event};

/// Minimal event reference attached to joined rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRef {
    pub id: String,
    pub name: String,
    pub fest_id: String,
}

impl From<&event::Model> for EventRef {
    fn from(e: &event::Model) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            fest_id: e.fest_id.clone(),
        }
    }
}

/// An event with its owning fest, if that fest still exists.
#[derive(Debug, Clone)]
pub struct EventWithFest {
    pub event: event::Model,
    pub fest: Option<FestRef>,
}

/// Load events by ID, keyed by ID.
pub(crate) async fn fetch_event_map(
    db: &DatabaseConnection,
    ids: Vec<String>,
) -> AppResult<HashMap<String, event::Model>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let events = Event::find()
        .filter(event::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(events.into_iter().map(|e| (e.id.clone(), e)).collect())
}

/// Repository for event operations.
#[derive(Clone)]
pub struct EventRepository {
    db: Arc<DatabaseConnection>,
}

impl EventRepository {
    /// Create a new event repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<event::Model>> {
        Event::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an event by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<event::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event: {id}")))
    }

    /// All events, most recent first.
    pub async fn find_all(&self) -> AppResult<Vec<event::Model>> {
        Event::find()
            .order_by_desc(event::Column::EventDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All events with their fests, most recent first.
    pub async fn find_all_with_fest(&self) -> AppResult<Vec<EventWithFest>> {
        let events = self.find_all().await?;
        self.attach_fests(events).await
    }

    /// A single event with its fest.
    pub async fn find_with_fest(&self, id: &str) -> AppResult<Option<EventWithFest>> {
        let Some(event) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.attach_fests(vec![event]).await?.pop())
    }

    /// Events of one fest, in date order.
    pub async fn find_by_fest(&self, fest_id: &str) -> AppResult<Vec<event::Model>> {
        Event::find()
            .filter(event::Column::FestId.eq(fest_id))
            .order_by_asc(event::Column::EventDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Events on or after `today`, soonest first, with their fests.
    pub async fn find_upcoming(&self, today: NaiveDate, limit: u64) -> AppResult<Vec<EventWithFest>> {
        let events = Event::find()
            .filter(event::Column::EventDate.gte(today))
            .order_by_asc(event::Column::EventDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.attach_fests(events).await
    }

    /// Case-insensitive substring search on name and description.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<EventWithFest>> {
        let events = Event::find()
            .filter(
                Condition::any()
                    .add(lower_like(event::Column::Name, query))
                    .add(lower_like(event::Column::Description, query)),
            )
            .order_by_desc(event::Column::EventDate)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.attach_fests(events).await
    }

    /// Count all events.
    pub async fn count(&self) -> AppResult<u64> {
        Event::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new event.
    pub async fn create(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an event.
    pub async fn update(&self, model: event::ActiveModel) -> AppResult<event::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an event. Its winners go with it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Event::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn attach_fests(&self, events: Vec<event::Model>) -> AppResult<Vec<EventWithFest>> {
        let mut fest_ids: Vec<String> = events.iter().map(|e| e.fest_id.clone()).collect();
        fest_ids.sort();
        fest_ids.dedup();

        let fests = fetch_fest_map(self.db.as_ref(), fest_ids).await?;

        Ok(events
            .into_iter()
            .map(|event| {
                let fest = fests.get(&event.fest_id).map(FestRef::from);
                EventWithFest { event, fest }
            })
            .collect())
    }
}
