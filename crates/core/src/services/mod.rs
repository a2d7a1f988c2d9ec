//! Business logic services.

#![allow(missing_docs)]

pub mod admin_auth;
pub mod dashboard;
pub mod dispatch;
pub mod email;
pub mod event;
pub mod export;
pub mod fest;
pub mod gallery;
pub mod notice;
pub mod standings;
pub mod winner;

pub use admin_auth::{AdminAuthService, LoginInput, LoginResponse, SessionInfo, hash_password};
pub use dashboard::{AdminReport, DashboardService, DashboardStats, SearchResults};
pub use dispatch::{DispatchEmailInput, DispatchOutcome, DispatchService, EmailLogResponse};
pub use email::{
    EmailDeliveryResult, EmailService, EmailTransport, EmailTransportRef, OutgoingEmail,
};
pub use event::{
    CreateEventInput, EventDetailResponse, EventRefResponse, EventResponse, EventService,
    UpdateEventInput, WinnersByMedal,
};
pub use export::{ExportData, csv_filename, to_csv, to_printable_html};
pub use fest::{
    CreateFestInput, FestDetailResponse, FestRefResponse, FestResponse, FestService,
    UpdateFestInput,
};
pub use gallery::{
    CreateGalleryItemInput, GalleryItemResponse, GalleryService, UpdateGalleryItemInput,
};
pub use notice::{CreateNoticeInput, NoticeRange, NoticeResponse, NoticeService, UpdateNoticeInput};
pub use standings::{
    ClassTally, DepartmentTally, FestChartRow, FestWinners, KeyedMedalCount, MedalCount,
    MedalDistribution, Standings, StandingsQuery, StandingsService,
};
pub use winner::{CreateWinnerInput, UpdateWinnerInput, WinnerResponse, WinnerService};

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null` in update inputs.
///
/// Used with `#[serde(default)]`: absent stays `None`, `null` becomes
/// `Some(None)`.
pub(crate) fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_distinguishes_null_from_absent() {
        let absent: UpdateEventInput = serde_json::from_str("{}").unwrap();
        let cleared: UpdateEventInput = serde_json::from_str(r#"{"venue":null}"#).unwrap();
        let set: UpdateEventInput = serde_json::from_str(r#"{"venue":"Hall"}"#).unwrap();

        assert_eq!(absent.venue, None);
        assert_eq!(cleared.venue, Some(None));
        assert_eq!(set.venue, Some(Some("Hall".to_string())));
    }
}
