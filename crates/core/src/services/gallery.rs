//! Gallery service.

use chrono::Utc;
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::gallery_item;
use council_db::repositories::{
    EventRepository, FestRepository, GalleryItemWithRefs, GalleryRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl};

use super::event::EventRefResponse;
use super::fest::FestRefResponse;

/// Default number of items in the recent gallery strip.
pub const DEFAULT_RECENT_LIMIT: u64 = 12;

/// Input for adding a gallery item.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItemInput {
    pub fest_id: Option<String>,
    pub event_id: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: String,
}

/// Input for updating a gallery item.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryItemInput {
    #[serde(default, deserialize_with = "super::nullable")]
    pub fest_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub event_id: Option<Option<String>>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Gallery item as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItemResponse {
    pub id: String,
    pub fest_id: Option<String>,
    pub event_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fest: Option<FestRefResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRefResponse>,
}

impl From<gallery_item::Model> for GalleryItemResponse {
    fn from(g: gallery_item::Model) -> Self {
        Self {
            id: g.id,
            fest_id: g.fest_id,
            event_id: g.event_id,
            title: g.title,
            description: g.description,
            image_url: g.image_url,
            created_at: g.created_at.to_rfc3339(),
            fest: None,
            event: None,
        }
    }
}

impl From<GalleryItemWithRefs> for GalleryItemResponse {
    fn from(row: GalleryItemWithRefs) -> Self {
        let mut response = Self::from(row.item);
        response.fest = row.fest.map(FestRefResponse::from);
        response.event = row.event.map(EventRefResponse::from);
        response
    }
}

/// Service for the photo gallery.
#[derive(Clone)]
pub struct GalleryService {
    gallery_repo: GalleryRepository,
    fest_repo: FestRepository,
    event_repo: EventRepository,
    id_gen: IdGenerator,
}

impl GalleryService {
    /// Create a new gallery service.
    #[must_use]
    pub const fn new(
        gallery_repo: GalleryRepository,
        fest_repo: FestRepository,
        event_repo: EventRepository,
    ) -> Self {
        Self {
            gallery_repo,
            fest_repo,
            event_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// All items with their fest and event, newest first.
    pub async fn list(&self) -> AppResult<Vec<GalleryItemResponse>> {
        let rows = self.gallery_repo.find_all_with_refs().await?;
        Ok(rows.into_iter().map(GalleryItemResponse::from).collect())
    }

    /// Items of one fest.
    pub async fn by_fest(&self, fest_id: &str) -> AppResult<Vec<GalleryItemResponse>> {
        let items = self.gallery_repo.find_by_fest(fest_id).await?;
        Ok(items.into_iter().map(GalleryItemResponse::from).collect())
    }

    /// Items of one event.
    pub async fn by_event(&self, event_id: &str) -> AppResult<Vec<GalleryItemResponse>> {
        let items = self.gallery_repo.find_by_event(event_id).await?;
        Ok(items.into_iter().map(GalleryItemResponse::from).collect())
    }

    /// Most recent items.
    pub async fn recent(&self, limit: u64) -> AppResult<Vec<GalleryItemResponse>> {
        let items = self.gallery_repo.find_recent(limit).await?;
        Ok(items.into_iter().map(GalleryItemResponse::from).collect())
    }

    async fn check_refs(&self, fest_id: Option<&str>, event_id: Option<&str>) -> AppResult<()> {
        if let Some(fest_id) = fest_id {
            if self.fest_repo.find_by_id(fest_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Unknown fest: {fest_id}")));
            }
        }
        if let Some(event_id) = event_id {
            if self.event_repo.find_by_id(event_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Unknown event: {event_id}")));
            }
        }
        Ok(())
    }

    /// Add a gallery item.
    pub async fn create(&self, input: CreateGalleryItemInput) -> AppResult<GalleryItemResponse> {
        input.validate()?;
        self.check_refs(input.fest_id.as_deref(), input.event_id.as_deref())
            .await?;

        let model = gallery_item::ActiveModel {
            id: Set(self.id_gen.generate()),
            fest_id: Set(input.fest_id),
            event_id: Set(input.event_id),
            title: Set(input.title),
            description: Set(input.description),
            image_url: Set(input.image_url),
            created_at: Set(Utc::now().into()),
        };

        let item = self.gallery_repo.create(model).await?;
        tracing::info!(item_id = %item.id, "Gallery item added");
        Ok(item.into())
    }

    /// Update a gallery item.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateGalleryItemInput,
    ) -> AppResult<GalleryItemResponse> {
        input.validate()?;

        let item = self.gallery_repo.get_by_id(id).await?;
        self.check_refs(
            input.fest_id.as_ref().and_then(Option::as_deref),
            input.event_id.as_ref().and_then(Option::as_deref),
        )
        .await?;

        let mut active: gallery_item::ActiveModel = item.into();
        if let Some(fest_id) = input.fest_id {
            active.fest_id = Set(fest_id);
        }
        if let Some(event_id) = input.event_id {
            active.event_id = Set(event_id);
        }
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }

        let item = self.gallery_repo.update(active).await?;
        tracing::info!(item_id = %item.id, "Gallery item updated");
        Ok(item.into())
    }

    /// Remove a gallery item.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.gallery_repo.get_by_id(id).await?;
        self.gallery_repo.delete(id).await?;
        tracing::info!(item_id = %id, "Gallery item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_db::entities::fest;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn mock_item(id: &str) -> gallery_item::Model {
        gallery_item::Model {
            id: id.to_string(),
            fest_id: Some("f1".to_string()),
            event_id: None,
            title: "Opening night".to_string(),
            description: None,
            image_url: "https://cdn.example.edu/opening.jpg".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: DatabaseConnection) -> GalleryService {
        let db = Arc::new(db);
        GalleryService::new(
            GalleryRepository::new(db.clone()),
            FestRepository::new(db.clone()),
            EventRepository::new(db),
        )
    }

    fn input(image_url: &str, fest_id: Option<&str>) -> CreateGalleryItemInput {
        CreateGalleryItemInput {
            fest_id: fest_id.map(String::from),
            event_id: None,
            title: "Opening night".to_string(),
            description: None,
            image_url: image_url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_image_url_must_be_url() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = service(db)
            .create(input("opening.jpg", None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_fest_is_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<fest::Model>::new()])
            .into_connection();

        let err = service(db)
            .create(input("https://cdn.example.edu/a.jpg", Some("nope")))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_recent_items() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[mock_item("g2"), mock_item("g1")]])
            .into_connection();

        let items = service(db).recent(DEFAULT_RECENT_LIMIT).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "g2");
        assert_eq!(items[0].fest_id.as_deref(), Some("f1"));
    }
}
