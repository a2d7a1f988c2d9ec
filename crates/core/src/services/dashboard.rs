//! Site-wide counts, search and admin reports.

use council_common::AppResult;
use council_db::repositories::{
    DraftRepository, EventRepository, FestRepository, GalleryRepository, WinnerRepository,
};
use serde::Serialize;

use super::event::EventResponse;
use super::fest::FestResponse;
use super::notice::NoticeResponse;
use super::standings::{KeyedMedalCount, fold_medal_counts, top_performers};

/// Maximum hits returned per category by [`DashboardService::search`].
pub const SEARCH_LIMIT: u64 = 10;

/// Number of classes in the report's top performers list.
pub const TOP_PERFORMERS: usize = 5;

/// Row counts shown on the home page and admin dashboard.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_fests: u64,
    pub total_events: u64,
    pub total_winners: u64,
    pub total_photos: u64,
    pub published_notices: u64,
}

/// Search hits grouped by kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub fests: Vec<FestResponse>,
    pub events: Vec<EventResponse>,
    pub notices: Vec<NoticeResponse>,
}

/// Admin report: counts plus the class medal table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReport {
    pub stats: DashboardStats,
    /// Per-class medal counts, largest total first.
    pub medal_tally: Vec<KeyedMedalCount>,
    pub top_performers: Vec<KeyedMedalCount>,
}

/// Per-class counts sorted by total, ties in first-seen order.
#[must_use]
pub fn sort_by_total(mut counts: Vec<KeyedMedalCount>) -> Vec<KeyedMedalCount> {
    counts.sort_by(|a, b| b.medals.total.cmp(&a.medals.total));
    counts
}

/// Read-only aggregate views.
#[derive(Clone)]
pub struct DashboardService {
    fest_repo: FestRepository,
    event_repo: EventRepository,
    winner_repo: WinnerRepository,
    gallery_repo: GalleryRepository,
    draft_repo: DraftRepository,
}

impl DashboardService {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(
        fest_repo: FestRepository,
        event_repo: EventRepository,
        winner_repo: WinnerRepository,
        gallery_repo: GalleryRepository,
        draft_repo: DraftRepository,
    ) -> Self {
        Self {
            fest_repo,
            event_repo,
            winner_repo,
            gallery_repo,
            draft_repo,
        }
    }

    /// Row counts.
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        Ok(DashboardStats {
            total_fests: self.fest_repo.count().await?,
            total_events: self.event_repo.count().await?,
            total_winners: self.winner_repo.count().await?,
            total_photos: self.gallery_repo.count().await?,
            published_notices: self.draft_repo.count_published().await?,
        })
    }

    /// Case-insensitive search over fests, events and published notices.
    pub async fn search(&self, query: &str) -> AppResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults::default());
        }

        let fests = self.fest_repo.search(query, SEARCH_LIMIT).await?;
        let events = self.event_repo.search(query, SEARCH_LIMIT).await?;
        let notices = self.draft_repo.search(query, SEARCH_LIMIT).await?;

        Ok(SearchResults {
            fests: fests.into_iter().map(FestResponse::from).collect(),
            events: events.into_iter().map(EventResponse::from).collect(),
            notices: notices.into_iter().map(NoticeResponse::from).collect(),
        })
    }

    /// Counts and the class medal table.
    pub async fn report(&self) -> AppResult<AdminReport> {
        let stats = self.stats().await?;
        let rows = self.winner_repo.class_medals().await?;
        let medal_tally = sort_by_total(fold_medal_counts(&rows));
        let top = top_performers(&medal_tally, TOP_PERFORMERS);

        Ok(AdminReport {
            stats,
            medal_tally,
            top_performers: top,
        })
    }
}
