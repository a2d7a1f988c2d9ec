//! Notice (draft) service.
//!
//! Drafts are only visible to admins until published. `published_at` is
//! stamped each time a draft moves into the published state and cleared when
//! it moves back.

use chrono::{DateTime, FixedOffset, Utc};
use council_common::{AppError, AppResult, IdGenerator};
use council_db::entities::draft::{self, DraftStatus};
use council_db::repositories::DraftRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl};

/// Author recorded on drafts created through the admin panel.
pub const ADMIN_AUTHOR: &str = "admin";

/// Default number of notices on the home page strip.
pub const DEFAULT_RECENT_LIMIT: u64 = 10;

/// Input for creating a draft.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoticeInput {
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1, max = 50000))]
    pub content: String,
    #[validate(url)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub status: Option<DraftStatus>,
}

/// Input for updating a draft.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoticeInput {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 50000))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub file_url: Option<Option<String>>,
    pub status: Option<DraftStatus>,
}

/// Optional publication window for the public notice list.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NoticeRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Notice as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub file_url: Option<String>,
    pub status: DraftStatus,
    pub published_at: Option<String>,
    pub created_by: String,
    pub created_at: String,
}

impl From<draft::Model> for NoticeResponse {
    fn from(d: draft::Model) -> Self {
        Self {
            id: d.id,
            title: d.title,
            content: d.content,
            file_url: d.file_url,
            status: d.status,
            published_at: d.published_at.map(|t| t.to_rfc3339()),
            created_by: d.created_by,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}

/// `published_at` after moving from `current` to `next`.
#[must_use]
pub fn published_at_after(
    current: DraftStatus,
    current_published_at: Option<DateTime<FixedOffset>>,
    next: DraftStatus,
    now: DateTime<Utc>,
) -> Option<DateTime<FixedOffset>> {
    match (current, next) {
        (DraftStatus::Draft, DraftStatus::Published) => Some(now.into()),
        (DraftStatus::Published, DraftStatus::Published) => current_published_at,
        (_, DraftStatus::Draft) => None,
    }
}

fn check_file_url(url: Option<&str>) -> AppResult<()> {
    if url.is_some_and(|u| !u.validate_url()) {
        return Err(AppError::Validation("fileUrl must be a URL".to_string()));
    }
    Ok(())
}

/// Service for notices.
#[derive(Clone)]
pub struct NoticeService {
    draft_repo: DraftRepository,
    id_gen: IdGenerator,
}

impl NoticeService {
    /// Create a new notice service.
    #[must_use]
    pub const fn new(draft_repo: DraftRepository) -> Self {
        Self {
            draft_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Published notices, newest first, optionally within a window.
    pub async fn list_published(&self, range: NoticeRange) -> AppResult<Vec<NoticeResponse>> {
        let drafts = match (range.start, range.end) {
            (None, None) => self.draft_repo.find_published().await?,
            (start, end) => {
                let start = start.unwrap_or_default();
                let end = end.unwrap_or_else(Utc::now);
                if end < start {
                    return Err(AppError::BadRequest("end is before start".to_string()));
                }
                self.draft_repo.find_published_between(start, end).await?
            }
        };
        Ok(drafts.into_iter().map(NoticeResponse::from).collect())
    }

    /// Most recently published notices.
    pub async fn recent(&self, limit: u64) -> AppResult<Vec<NoticeResponse>> {
        let drafts = self.draft_repo.find_recent_published(limit).await?;
        Ok(drafts.into_iter().map(NoticeResponse::from).collect())
    }

    /// A published notice. Unpublished drafts are reported as missing.
    pub async fn get_published(&self, id: &str) -> AppResult<NoticeResponse> {
        self.draft_repo
            .find_published_by_id(id)
            .await?
            .map(NoticeResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Notice: {id}")))
    }

    /// Every draft, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<NoticeResponse>> {
        let drafts = self.draft_repo.find_all().await?;
        Ok(drafts.into_iter().map(NoticeResponse::from).collect())
    }

    /// Any draft by ID.
    pub async fn get(&self, id: &str) -> AppResult<NoticeResponse> {
        Ok(self.draft_repo.get_by_id(id).await?.into())
    }

    /// Create a draft, published immediately if requested.
    pub async fn create(&self, input: CreateNoticeInput) -> AppResult<NoticeResponse> {
        input.validate()?;

        let now = Utc::now();
        let status = input.status.unwrap_or(DraftStatus::Draft);
        let model = draft::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            content: Set(input.content),
            file_url: Set(input.file_url),
            status: Set(status),
            published_at: Set(published_at_after(DraftStatus::Draft, None, status, now)),
            created_by: Set(ADMIN_AUTHOR.to_string()),
            created_at: Set(now.into()),
        };

        let draft = self.draft_repo.create(model).await?;
        tracing::info!(draft_id = %draft.id, status = ?draft.status, "Draft created");
        Ok(draft.into())
    }

    /// Update a draft.
    pub async fn update(&self, id: &str, input: UpdateNoticeInput) -> AppResult<NoticeResponse> {
        input.validate()?;
        check_file_url(input.file_url.as_ref().and_then(Option::as_deref))?;

        let draft = self.draft_repo.get_by_id(id).await?;
        let (current, current_published_at) = (draft.status, draft.published_at);

        let mut active: draft::ActiveModel = draft.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        if let Some(file_url) = input.file_url {
            active.file_url = Set(file_url);
        }
        if let Some(next) = input.status {
            active.status = Set(next);
            active.published_at = Set(published_at_after(
                current,
                current_published_at,
                next,
                Utc::now(),
            ));
        }

        let draft = self.draft_repo.update(active).await?;
        tracing::info!(draft_id = %draft.id, status = ?draft.status, "Draft updated");
        Ok(draft.into())
    }

    /// Publish a draft. Already published drafts are returned unchanged.
    pub async fn publish(&self, id: &str) -> AppResult<NoticeResponse> {
        let draft = self.draft_repo.get_by_id(id).await?;
        if draft.status == DraftStatus::Published {
            return Ok(draft.into());
        }

        let draft = self.draft_repo.publish(id, Utc::now()).await?;
        tracing::info!(draft_id = %draft.id, "Draft published");
        Ok(draft.into())
    }

    /// Delete a draft.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.draft_repo.get_by_id(id).await?;
        self.draft_repo.delete(id).await?;
        tracing::info!(draft_id = %id, "Draft deleted");
        Ok(())
    }
}
