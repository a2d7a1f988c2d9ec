//! Event service.

use chrono::{NaiveDate, Utc};
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::{event, winner::Medal};
use council_db::repositories::{
    EventRef, EventRepository, EventWithFest, FestRepository, WinnerRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fest::FestRefResponse;
use super::winner::WinnerResponse;

/// Input for creating an event.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    #[validate(length(min = 1))]
    pub fest_id: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: String,
    pub event_date: NaiveDate,
    #[validate(length(max = 200))]
    pub venue: Option<String>,
}

/// Input for updating an event.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    #[validate(length(min = 1))]
    pub fest_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub venue: Option<Option<String>>,
}

/// Event as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub fest_id: String,
    pub name: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub venue: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fest: Option<FestRefResponse>,
}

impl From<event::Model> for EventResponse {
    fn from(e: event::Model) -> Self {
        Self {
            id: e.id,
            fest_id: e.fest_id,
            name: e.name,
            description: e.description,
            event_date: e.event_date,
            venue: e.venue,
            created_at: e.created_at.to_rfc3339(),
            fest: None,
        }
    }
}

impl From<EventWithFest> for EventResponse {
    fn from(row: EventWithFest) -> Self {
        let mut response = Self::from(row.event);
        response.fest = row.fest.map(FestRefResponse::from);
        response
    }
}

/// Short event reference nested in other responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRefResponse {
    pub id: String,
    pub name: String,
    pub fest_id: String,
}

impl From<EventRef> for EventRefResponse {
    fn from(e: EventRef) -> Self {
        Self {
            id: e.id,
            name: e.name,
            fest_id: e.fest_id,
        }
    }
}

/// Winners of one event, split by medal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WinnersByMedal {
    pub gold: Vec<WinnerResponse>,
    pub silver: Vec<WinnerResponse>,
    pub bronze: Vec<WinnerResponse>,
}

/// An event with its fest and winners.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: EventResponse,
    pub winners: WinnersByMedal,
}

/// Service for managing events.
#[derive(Clone)]
pub struct EventService {
    event_repo: EventRepository,
    fest_repo: FestRepository,
    winner_repo: WinnerRepository,
    id_gen: IdGenerator,
}

impl EventService {
    /// Create a new event service.
    #[must_use]
    pub const fn new(
        event_repo: EventRepository,
        fest_repo: FestRepository,
        winner_repo: WinnerRepository,
    ) -> Self {
        Self {
            event_repo,
            fest_repo,
            winner_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All events with their fests, most recent first.
    pub async fn list(&self) -> AppResult<Vec<EventResponse>> {
        let rows = self.event_repo.find_all_with_fest().await?;
        Ok(rows.into_iter().map(EventResponse::from).collect())
    }

    /// Events of one fest, in date order.
    pub async fn by_fest(&self, fest_id: &str) -> AppResult<Vec<EventResponse>> {
        let events = self.event_repo.find_by_fest(fest_id).await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    /// Events on or after `today`.
    pub async fn upcoming(&self, today: NaiveDate, limit: u64) -> AppResult<Vec<EventResponse>> {
        let rows = self.event_repo.find_upcoming(today, limit).await?;
        Ok(rows.into_iter().map(EventResponse::from).collect())
    }

    /// An event with its fest and winners grouped by medal.
    pub async fn detail(&self, id: &str) -> AppResult<EventDetailResponse> {
        let row = self
            .event_repo
            .find_with_fest(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event: {id}")))?;

        let mut winners = WinnersByMedal::default();
        for w in self.winner_repo.find_by_event(id).await? {
            let bucket = match w.medal {
                Medal::Gold => &mut winners.gold,
                Medal::Silver => &mut winners.silver,
                Medal::Bronze => &mut winners.bronze,
            };
            bucket.push(WinnerResponse::from(w));
        }

        Ok(EventDetailResponse {
            event: row.into(),
            winners,
        })
    }

    async fn require_fest(&self, fest_id: &str) -> AppResult<()> {
        if self.fest_repo.find_by_id(fest_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("Unknown fest: {fest_id}")));
        }
        Ok(())
    }

    /// Create an event under an existing fest.
    pub async fn create(&self, input: CreateEventInput) -> AppResult<EventResponse> {
        input.validate()?;
        self.require_fest(&input.fest_id).await?;

        let model = event::ActiveModel {
            id: Set(self.id_gen.generate()),
            fest_id: Set(input.fest_id),
            name: Set(input.name),
            description: Set(input.description),
            event_date: Set(input.event_date),
            venue: Set(input.venue),
            created_at: Set(Utc::now().into()),
        };

        let event = self.event_repo.create(model).await?;
        tracing::info!(event_id = %event.id, fest_id = %event.fest_id, "Event created");
        Ok(event.into())
    }

    /// Update an event.
    pub async fn update(&self, id: &str, input: UpdateEventInput) -> AppResult<EventResponse> {
        input.validate()?;

        let event = self.event_repo.get_by_id(id).await?;
        if let Some(fest_id) = input.fest_id.as_deref().filter(|f| *f != event.fest_id) {
            self.require_fest(fest_id).await?;
        }

        let mut active: event::ActiveModel = event.into();
        if let Some(fest_id) = input.fest_id {
            active.fest_id = Set(fest_id);
        }
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(event_date) = input.event_date {
            active.event_date = Set(event_date);
        }
        if let Some(venue) = input.venue {
            active.venue = Set(venue);
        }

        let event = self.event_repo.update(active).await?;
        tracing::info!(event_id = %event.id, "Event updated");
        Ok(event.into())
    }

    /// Delete an event and its winners.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.event_repo.get_by_id(id).await?;
        self.event_repo.delete(id).await?;
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_db::entities::{fest, winner};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mock_fest(id: &str) -> fest::Model {
        fest::Model {
            id: id.to_string(),
            name: "Techfiesta".to_string(),
            fest_type: fest::FestType::Technical,
            description: String::new(),
            start_date: date(2026, 3, 1),
            end_date: date(2026, 3, 3),
            banner_url: None,
            created_at: Utc::now().into(),
        }
    }

    fn mock_event(id: &str, fest_id: &str) -> event::Model {
        event::Model {
            id: id.to_string(),
            fest_id: fest_id.to_string(),
            name: "Hackathon".to_string(),
            description: "24h build".to_string(),
            event_date: date(2026, 3, 2),
            venue: Some("Lab 3".to_string()),
            created_at: Utc::now().into(),
        }
    }

    fn mock_winner(id: &str, medal: Medal, position: i32) -> winner::Model {
        winner::Model {
            id: id.to_string(),
            event_id: "e1".to_string(),
            student_name: format!("Student {id}"),
            class_name: "TE-A".to_string(),
            department: "Computer".to_string(),
            medal,
            position,
            created_at: Utc::now().into(),
        }
    }

    fn service(db: DatabaseConnection) -> EventService {
        let db = Arc::new(db);
        EventService::new(
            EventRepository::new(db.clone()),
            FestRepository::new(db.clone()),
            WinnerRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_detail_groups_winners_by_medal() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_event("e1", "f1")]])
            .append_query_results([[mock_fest("f1")]])
            .append_query_results([[
                mock_winner("w1", Medal::Gold, 1),
                mock_winner("w2", Medal::Silver, 2),
                mock_winner("w3", Medal::Bronze, 3),
                mock_winner("w4", Medal::Bronze, 3),
            ]])
            .into_connection();

        let detail = service(db).detail("e1").await.unwrap();

        assert_eq!(detail.event.name, "Hackathon");
        assert_eq!(detail.event.fest.as_ref().unwrap().name, "Techfiesta");
        assert_eq!(detail.winners.gold.len(), 1);
        assert_eq!(detail.winners.silver.len(), 1);
        assert_eq!(detail.winners.bronze.len(), 2);
    }

    #[tokio::test]
    async fn test_detail_missing_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<event::Model>::new()])
            .into_connection();

        let err = service(db).detail("nope").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_requires_existing_fest() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<fest::Model>::new()])
            .into_connection();

        let err = service(db)
            .create(CreateEventInput {
                fest_id: "missing".to_string(),
                name: "Quiz".to_string(),
                description: String::new(),
                event_date: date(2026, 3, 2),
                venue: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_create_event() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_fest("f1")]])
            .append_query_results([[mock_event("e1", "f1")]])
            .into_connection();

        let event = service(db)
            .create(CreateEventInput {
                fest_id: "f1".to_string(),
                name: "Hackathon".to_string(),
                description: "24h build".to_string(),
                event_date: date(2026, 3, 2),
                venue: Some("Lab 3".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(event.id, "e1");
        assert!(event.fest.is_none());
    }
}
