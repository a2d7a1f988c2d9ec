//! Gallery repository.

use std::sync::Arc;

use council_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use super::event::{EventRef, fetch_event_map};
use super::fest::{FestRef, fetch_fest_map};
use crate::entities::{GalleryItem, gallery_item};

/// A gallery item with its fest and event references resolved.
#[derive(Debug, Clone)]
pub struct GalleryItemWithRefs {
    pub item: gallery_item::Model,
    pub fest: Option<FestRef>,
    pub event: Option<EventRef>,
}

/// Gallery repository for database operations.
#[derive(Clone)]
pub struct GalleryRepository {
    db: Arc<DatabaseConnection>,
}

impl GalleryRepository {
    /// Create a new gallery repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a gallery item by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<gallery_item::Model>> {
        GalleryItem::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a gallery item by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<gallery_item::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Gallery item: {id}")))
    }

    /// All items with fest and event references, newest first.
    pub async fn find_all_with_refs(&self) -> AppResult<Vec<GalleryItemWithRefs>> {
        let items = GalleryItem::find()
            .order_by_desc(gallery_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.attach_refs(items).await
    }

    /// Items linked to a fest, newest first.
    pub async fn find_by_fest(&self, fest_id: &str) -> AppResult<Vec<gallery_item::Model>> {
        GalleryItem::find()
            .filter(gallery_item::Column::FestId.eq(fest_id))
            .order_by_desc(gallery_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Items linked to an event, newest first.
    pub async fn find_by_event(&self, event_id: &str) -> AppResult<Vec<gallery_item::Model>> {
        GalleryItem::find()
            .filter(gallery_item::Column::EventId.eq(event_id))
            .order_by_desc(gallery_item::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The `limit` newest items.
    pub async fn find_recent(&self, limit: u64) -> AppResult<Vec<gallery_item::Model>> {
        GalleryItem::find()
            .order_by_desc(gallery_item::Column::CreatedAt)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all gallery items.
    pub async fn count(&self) -> AppResult<u64> {
        GalleryItem::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new gallery item.
    pub async fn create(&self, model: gallery_item::ActiveModel) -> AppResult<gallery_item::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a gallery item.
    pub async fn update(&self, model: gallery_item::ActiveModel) -> AppResult<gallery_item::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a gallery item.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        GalleryItem::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn attach_refs(
        &self,
        items: Vec<gallery_item::Model>,
    ) -> AppResult<Vec<GalleryItemWithRefs>> {
        let mut fest_ids: Vec<String> = items.iter().filter_map(|i| i.fest_id.clone()).collect();
        fest_ids.sort();
        fest_ids.dedup();

        let mut event_ids: Vec<String> = items.iter().filter_map(|i| i.event_id.clone()).collect();
        event_ids.sort();
        event_ids.dedup();

        let fests = fetch_fest_map(self.db.as_ref(), fest_ids).await?;
        let events = fetch_event_map(self.db.as_ref(), event_ids).await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let fest = item
                    .fest_id
                    .as_ref()
                    .and_then(|id| fests.get(id))
                    .map(FestRef::from);
                let event = item
                    .event_id
                    .as_ref()
                    .and_then(|id| events.get(id))
                    .map(EventRef::from);
                GalleryItemWithRefs { item, fest, event }
            })
            .collect())
    }
}
