//! Winner repository.

use std::sync::Arc;

use council_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::event::{EventRef, fetch_event_map};
use super::fest::{FestRef, fetch_fest_map};
use crate::entities::{Winner, winner};

/// A winner with the event and fest it was awarded in.
///
/// Either reference is `None` when the related row is missing.
#[derive(Debug, Clone)]
pub struct WinnerWithEvent {
    pub winner: winner::Model,
    pub event: Option<EventRef>,
    pub fest: Option<FestRef>,
}

/// A `(grouping key, medal)` projection row.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct KeyedMedal {
    pub key: String,
    pub medal: winner::Medal,
}

/// Repository for winner operations.
#[derive(Clone)]
pub struct WinnerRepository {
    db: Arc<DatabaseConnection>,
}

impl WinnerRepository {
    /// Create a new winner repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a winner by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<winner::Model>> {
        Winner::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a winner by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<winner::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Winner: {id}")))
    }

    /// Winners of one event, by placing.
    pub async fn find_by_event(&self, event_id: &str) -> AppResult<Vec<winner::Model>> {
        Winner::find()
            .filter(winner::Column::EventId.eq(event_id))
            .order_by_asc(winner::Column::Position)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All winners with their event and fest, newest first.
    pub async fn find_all_with_event(&self) -> AppResult<Vec<WinnerWithEvent>> {
        let winners = Winner::find()
            .order_by_desc(winner::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut event_ids: Vec<String> = winners.iter().map(|w| w.event_id.clone()).collect();
        event_ids.sort();
        event_ids.dedup();
        let events = fetch_event_map(self.db.as_ref(), event_ids).await?;

        let mut fest_ids: Vec<String> = events.values().map(|e| e.fest_id.clone()).collect();
        fest_ids.sort();
        fest_ids.dedup();
        let fests = fetch_fest_map(self.db.as_ref(), fest_ids).await?;

        Ok(winners
            .into_iter()
            .map(|winner| {
                let event = events.get(&winner.event_id);
                let fest = event
                    .and_then(|e| fests.get(&e.fest_id))
                    .map(FestRef::from);
                WinnerWithEvent {
                    event: event.map(EventRef::from),
                    fest,
                    winner,
                }
            })
            .collect())
    }

    /// `(department, medal)` for every winner, ordered by department.
    pub async fn department_medals(&self) -> AppResult<Vec<KeyedMedal>> {
        Winner::find()
            .select_only()
            .column_as(winner::Column::Department, "key")
            .column(winner::Column::Medal)
            .order_by_asc(winner::Column::Department)
            .into_model::<KeyedMedal>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// `(class, medal)` for every winner, ordered by class.
    pub async fn class_medals(&self) -> AppResult<Vec<KeyedMedal>> {
        Winner::find()
            .select_only()
            .column_as(winner::Column::ClassName, "key")
            .column(winner::Column::Medal)
            .order_by_asc(winner::Column::ClassName)
            .into_model::<KeyedMedal>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all winners.
    pub async fn count(&self) -> AppResult<u64> {
        Winner::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new winner.
    pub async fn create(&self, model: winner::ActiveModel) -> AppResult<winner::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a winner.
    pub async fn update(&self, model: winner::ActiveModel) -> AppResult<winner::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a winner.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Winner::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{event, fest};
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::collections::BTreeMap;

    fn test_winner(id: &str, event_id: &str, medal: winner::Medal, position: i32) -> winner::Model {
        winner::Model {
            id: id.to_string(),
            event_id: event_id.to_string(),
            student_name: format!("Student {id}"),
            class_name: "SE-COMP".to_string(),
            department: "Computer".to_string(),
            medal,
            position,
            created_at: Utc::now().into(),
        }
    }

    fn test_event(id: &str, fest_id: &str) -> event::Model {
        event::Model {
            id: id.to_string(),
            fest_id: fest_id.to_string(),
            name: "Debate".to_string(),
            description: String::new(),
            event_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            venue: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_fest(id: &str) -> fest::Model {
        fest::Model {
            id: id.to_string(),
            name: "Aurora".to_string(),
            fest_type: fest::FestType::Cultural,
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            banner_url: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_event_returns_winners() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_winner("w1", "e1", winner::Medal::Gold, 1),
                    test_winner("w2", "e1", winner::Medal::Silver, 2),
                ]])
                .into_connection(),
        );

        let repo = WinnerRepository::new(db);
        let winners = repo.find_by_event("e1").await.unwrap();

        assert_eq!(winners.len(), 2);
        assert_eq!(winners[0].medal, winner::Medal::Gold);
    }

    #[tokio::test]
    async fn test_find_all_with_event_resolves_refs() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    test_winner("w1", "e1", winner::Medal::Gold, 1),
                    test_winner("w2", "orphan", winner::Medal::Bronze, 3),
                ]])
                .append_query_results([[test_event("e1", "f1")]])
                .append_query_results([[test_fest("f1")]])
                .into_connection(),
        );

        let repo = WinnerRepository::new(db);
        let rows = repo.find_all_with_event().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event.as_ref().unwrap().name, "Debate");
        assert_eq!(rows[0].fest.as_ref().unwrap().name, "Aurora");
        assert!(rows[1].event.is_none());
        assert!(rows[1].fest.is_none());
    }

    #[tokio::test]
    async fn test_department_medals_projection() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    maplit::btreemap! {
                        "key" => sea_orm::Value::from("Computer"),
                        "medal" => sea_orm::Value::from("gold"),
                    },
                    maplit::btreemap! {
                        "key" => sea_orm::Value::from("IT"),
                        "medal" => sea_orm::Value::from("bronze"),
                    },
                ]])
                .into_connection(),
        );

        let repo = WinnerRepository::new(db);
        let rows = repo.department_medals().await.unwrap();

        assert_eq!(
            rows,
            vec![
                KeyedMedal {
                    key: "Computer".to_string(),
                    medal: winner::Medal::Gold
                },
                KeyedMedal {
                    key: "IT".to_string(),
                    medal: winner::Medal::Bronze
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_medal_projections_are_ordered_by_key() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<BTreeMap<&str, sea_orm::Value>>::new()])
                .append_query_results([Vec::<BTreeMap<&str, sea_orm::Value>>::new()])
                .into_connection(),
        );
        let repo = WinnerRepository::new(db.clone());

        repo.department_medals().await.unwrap();
        repo.class_medals().await.unwrap();
        drop(repo);

        let Ok(conn) = Arc::try_unwrap(db) else {
            panic!("connection still shared");
        };
        let log = conn.into_transaction_log();
        assert_eq!(log.len(), 2);
        let departments = format!("{:?}", log[0]);
        let classes = format!("{:?}", log[1]);
        assert!(departments.contains("ORDER BY"));
        assert!(departments.contains("department"));
        assert!(classes.contains("ORDER BY"));
        assert!(classes.contains("class_name"));
    }
}
