//! Data access layer.
//!
//! One repository per table. Joined listings return explicit DTOs whose
//! nested references are `Option`s, filled by batched `IN (...)` lookups.

mod admin_session;
mod draft;
mod email_log;
mod event;
mod fest;
mod gallery;
mod winner;

pub use admin_session::AdminSessionRepository;
pub use draft::DraftRepository;
pub use email_log::EmailLogRepository;
pub use event::{EventRef, EventRepository, EventWithFest};
pub use fest::{FestRef, FestRepository, FestWithEvents};
pub use gallery::{GalleryItemWithRefs, GalleryRepository};
pub use winner::{KeyedMedal, WinnerRepository, WinnerWithEvent};

use sea_orm::ColumnTrait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};

/// `LOWER(col) LIKE '%query%'` with LIKE wildcards in `query` escaped.
fn lower_like<C: ColumnTrait>(column: C, query: &str) -> SimpleExpr {
    let pattern = format!(
        "%{}%",
        query
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    );
    Expr::expr(Func::lower(Expr::col(column))).like(pattern)
}
