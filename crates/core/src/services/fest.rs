//! Fest service.

use chrono::{NaiveDate, Utc};
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::fest::{self, FestType};
use council_db::repositories::{FestRef, FestRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl};

use super::event::EventResponse;

/// Input for creating a fest.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFestInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(rename = "type")]
    pub fest_type: FestType,
    #[validate(length(max = 5000))]
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(url)]
    pub banner_url: Option<String>,
}

/// Input for updating a fest. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFestInput {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub fest_type: Option<FestType>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub banner_url: Option<Option<String>>,
}

/// Fest as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FestResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub fest_type: FestType,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub banner_url: Option<String>,
    pub created_at: String,
}

impl From<fest::Model> for FestResponse {
    fn from(f: fest::Model) -> Self {
        Self {
            id: f.id,
            name: f.name,
            fest_type: f.fest_type,
            description: f.description,
            start_date: f.start_date,
            end_date: f.end_date,
            banner_url: f.banner_url,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Short fest reference nested in other responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FestRefResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub fest_type: FestType,
}

impl From<FestRef> for FestRefResponse {
    fn from(f: FestRef) -> Self {
        Self {
            id: f.id,
            name: f.name,
            fest_type: f.fest_type,
        }
    }
}

/// A fest with its events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FestDetailResponse {
    #[serde(flatten)]
    pub fest: FestResponse,
    pub events: Vec<EventResponse>,
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::Validation(
            "endDate must not be before startDate".to_string(),
        ));
    }
    Ok(())
}

/// Service for managing fests.
#[derive(Clone)]
pub struct FestService {
    fest_repo: FestRepository,
    id_gen: IdGenerator,
}

impl FestService {
    /// Create a new fest service.
    #[must_use]
    pub const fn new(fest_repo: FestRepository) -> Self {
        Self {
            fest_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List fests, newest start date first, optionally of one type.
    pub async fn list(&self, fest_type: Option<FestType>) -> AppResult<Vec<FestResponse>> {
        let fests = match fest_type {
            Some(t) => self.fest_repo.find_by_type(t).await?,
            None => self.fest_repo.find_all().await?,
        };
        Ok(fests.into_iter().map(FestResponse::from).collect())
    }

    /// List fests by name, for admin pickers.
    pub async fn list_by_name(&self) -> AppResult<Vec<FestResponse>> {
        let fests = self.fest_repo.find_all_by_name().await?;
        Ok(fests.into_iter().map(FestResponse::from).collect())
    }

    /// Fests starting today or later.
    pub async fn upcoming(&self, today: NaiveDate, limit: u64) -> AppResult<Vec<FestResponse>> {
        let fests = self.fest_repo.find_upcoming(today, limit).await?;
        Ok(fests.into_iter().map(FestResponse::from).collect())
    }

    /// A fest with its events.
    pub async fn detail(&self, id: &str) -> AppResult<FestDetailResponse> {
        let found = self
            .fest_repo
            .find_with_events(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Fest: {id}")))?;

        Ok(FestDetailResponse {
            fest: found.fest.into(),
            events: found.events.into_iter().map(EventResponse::from).collect(),
        })
    }

    /// Create a fest.
    pub async fn create(&self, input: CreateFestInput) -> AppResult<FestResponse> {
        input.validate()?;
        check_dates(input.start_date, input.end_date)?;

        let model = fest::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            fest_type: Set(input.fest_type),
            description: Set(input.description),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            banner_url: Set(input.banner_url),
            created_at: Set(Utc::now().into()),
        };

        let fest = self.fest_repo.create(model).await?;
        tracing::info!(fest_id = %fest.id, name = %fest.name, "Fest created");
        Ok(fest.into())
    }

    /// Update a fest.
    pub async fn update(&self, id: &str, input: UpdateFestInput) -> AppResult<FestResponse> {
        input.validate()?;
        if input
            .banner_url
            .as_ref()
            .and_then(Option::as_ref)
            .is_some_and(|url| !url.validate_url())
        {
            return Err(AppError::Validation("bannerUrl must be a URL".to_string()));
        }

        let fest = self.fest_repo.get_by_id(id).await?;
        check_dates(
            input.start_date.unwrap_or(fest.start_date),
            input.end_date.unwrap_or(fest.end_date),
        )?;

        let mut active: fest::ActiveModel = fest.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(fest_type) = input.fest_type {
            active.fest_type = Set(fest_type);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(start_date) = input.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = input.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(banner_url) = input.banner_url {
            active.banner_url = Set(banner_url);
        }

        let fest = self.fest_repo.update(active).await?;
        tracing::info!(fest_id = %fest.id, "Fest updated");
        Ok(fest.into())
    }

    /// Delete a fest. Its events and winners go with it.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.fest_repo.get_by_id(id).await?;
        self.fest_repo.delete(id).await?;
        tracing::info!(fest_id = %id, "Fest deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mock_fest(id: &str, name: &str) -> fest::Model {
        fest::Model {
            id: id.to_string(),
            name: name.to_string(),
            fest_type: FestType::Cultural,
            description: "Annual cultural fest".to_string(),
            start_date: date(2026, 2, 10),
            end_date: date(2026, 2, 12),
            banner_url: None,
            created_at: Utc::now().into(),
        }
    }

    fn input(start: NaiveDate, end: NaiveDate) -> CreateFestInput {
        CreateFestInput {
            name: "Spandan".to_string(),
            fest_type: FestType::Cultural,
            description: String::new(),
            start_date: start,
            end_date: end,
            banner_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_fest() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_fest("f1", "Spandan")]])
                .into_connection(),
        );
        let service = FestService::new(FestRepository::new(db));

        let fest = service
            .create(input(date(2026, 2, 10), date(2026, 2, 12)))
            .await
            .unwrap();

        assert_eq!(fest.id, "f1");
        assert_eq!(fest.name, "Spandan");
    }

    #[tokio::test]
    async fn test_create_rejects_end_before_start() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = FestService::new(FestRepository::new(db));

        let err = service
            .create(input(date(2026, 2, 12), date(2026, 2, 10)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_banner_url() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = FestService::new(FestRepository::new(db));

        let mut bad = input(date(2026, 2, 10), date(2026, 2, 12));
        bad.banner_url = Some("not a url".to_string());
        let err = service.create(bad).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_checks_merged_dates() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_fest("f1", "Spandan")]])
                .into_connection(),
        );
        let service = FestService::new(FestRepository::new(db));

        let err = service
            .update(
                "f1",
                UpdateFestInput {
                    end_date: Some(date(2026, 1, 1)),
                    ..UpdateFestInput::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_detail_missing_is_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<fest::Model>::new()])
                .into_connection(),
        );
        let service = FestService::new(FestRepository::new(db));

        let err = service.detail("nope").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_by_type() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_fest("f1", "Spandan"), mock_fest("f2", "Aurora")]])
                .into_connection(),
        );
        let service = FestService::new(FestRepository::new(db));

        let fests = service.list(Some(FestType::Cultural)).await.unwrap();

        assert_eq!(fests.len(), 2);
        assert_eq!(fests[1].name, "Aurora");
    }

    #[test]
    fn test_create_input_reads_type_field() {
        let input: CreateFestInput = serde_json::from_str(
            r#"{"name":"Techfiesta","type":"technical","startDate":"2026-03-01","endDate":"2026-03-02"}"#,
        )
        .unwrap();

        assert_eq!(input.fest_type, FestType::Technical);
        assert!(input.description.is_empty());
    }

    #[test]
    fn test_update_input_distinguishes_null_from_missing() {
        let clear: UpdateFestInput = serde_json::from_str(r#"{"bannerUrl":null}"#).unwrap();
        assert_eq!(clear.banner_url, Some(None));

        let keep: UpdateFestInput = serde_json::from_str(r#"{"name":"Aurora"}"#).unwrap();
        assert_eq!(keep.banner_url, None);
    }
}
