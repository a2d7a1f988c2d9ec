//! Winner service.

use chrono::Utc;
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::winner::{self, Medal};
use council_db::repositories::{EventRepository, WinnerRepository, WinnerWithEvent};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::event::EventRefResponse;
use super::fest::FestRefResponse;

/// Input for recording a winner.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWinnerInput {
    #[validate(length(min = 1))]
    pub event_id: String,
    #[validate(length(min = 1, max = 200))]
    pub student_name: String,
    #[validate(length(min = 1, max = 50))]
    pub class_name: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    pub medal: Medal,
    #[validate(range(min = 1))]
    pub position: i32,
}

/// Input for updating a winner.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWinnerInput {
    #[validate(length(min = 1))]
    pub event_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub student_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub class_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    pub medal: Option<Medal>,
    #[validate(range(min = 1))]
    pub position: Option<i32>,
}

/// Winner as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerResponse {
    pub id: String,
    pub event_id: String,
    pub student_name: String,
    pub class_name: String,
    pub department: String,
    pub medal: Medal,
    pub position: i32,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRefResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fest: Option<FestRefResponse>,
}

impl From<winner::Model> for WinnerResponse {
    fn from(w: winner::Model) -> Self {
        Self {
            id: w.id,
            event_id: w.event_id,
            student_name: w.student_name,
            class_name: w.class_name,
            department: w.department,
            medal: w.medal,
            position: w.position,
            created_at: w.created_at.to_rfc3339(),
            event: None,
            fest: None,
        }
    }
}

impl From<WinnerWithEvent> for WinnerResponse {
    fn from(row: WinnerWithEvent) -> Self {
        let mut response = Self::from(row.winner);
        response.event = row.event.map(EventRefResponse::from);
        response.fest = row.fest.map(FestRefResponse::from);
        response
    }
}

/// Service for managing winners.
#[derive(Clone)]
pub struct WinnerService {
    winner_repo: WinnerRepository,
    event_repo: EventRepository,
    id_gen: IdGenerator,
}

impl WinnerService {
    /// Create a new winner service.
    #[must_use]
    pub const fn new(winner_repo: WinnerRepository, event_repo: EventRepository) -> Self {
        Self {
            winner_repo,
            event_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All winners with their event and fest.
    pub async fn list(&self) -> AppResult<Vec<WinnerResponse>> {
        let rows = self.winner_repo.find_all_with_event().await?;
        Ok(rows.into_iter().map(WinnerResponse::from).collect())
    }

    /// Winners of one event, by placing.
    pub async fn by_event(&self, event_id: &str) -> AppResult<Vec<WinnerResponse>> {
        let winners = self.winner_repo.find_by_event(event_id).await?;
        Ok(winners.into_iter().map(WinnerResponse::from).collect())
    }

    async fn require_event(&self, event_id: &str) -> AppResult<()> {
        if self.event_repo.find_by_id(event_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("Unknown event: {event_id}")));
        }
        Ok(())
    }

    /// Record a winner for an existing event.
    pub async fn create(&self, input: CreateWinnerInput) -> AppResult<WinnerResponse> {
        input.validate()?;
        self.require_event(&input.event_id).await?;

        let model = winner::ActiveModel {
            id: Set(self.id_gen.generate()),
            event_id: Set(input.event_id),
            student_name: Set(input.student_name),
            class_name: Set(input.class_name),
            department: Set(input.department),
            medal: Set(input.medal),
            position: Set(input.position),
            created_at: Set(Utc::now().into()),
        };

        let winner = self.winner_repo.create(model).await?;
        tracing::info!(
            winner_id = %winner.id,
            event_id = %winner.event_id,
            medal = winner.medal.as_str(),
            "Winner recorded"
        );
        Ok(winner.into())
    }

    /// Update a winner.
    pub async fn update(&self, id: &str, input: UpdateWinnerInput) -> AppResult<WinnerResponse> {
        input.validate()?;

        let winner = self.winner_repo.get_by_id(id).await?;
        if let Some(event_id) = input.event_id.as_deref().filter(|e| *e != winner.event_id) {
            self.require_event(event_id).await?;
        }

        let mut active: winner::ActiveModel = winner.into();
        if let Some(event_id) = input.event_id {
            active.event_id = Set(event_id);
        }
        if let Some(student_name) = input.student_name {
            active.student_name = Set(student_name);
        }
        if let Some(class_name) = input.class_name {
            active.class_name = Set(class_name);
        }
        if let Some(department) = input.department {
            active.department = Set(department);
        }
        if let Some(medal) = input.medal {
            active.medal = Set(medal);
        }
        if let Some(position) = input.position {
            active.position = Set(position);
        }

        let winner = self.winner_repo.update(active).await?;
        tracing::info!(winner_id = %winner.id, "Winner updated");
        Ok(winner.into())
    }

    /// Delete a winner.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.winner_repo.get_by_id(id).await?;
        self.winner_repo.delete(id).await?;
        tracing::info!(winner_id = %id, "Winner deleted");
        Ok(())
    }
}
