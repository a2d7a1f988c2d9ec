//! Draft (notice) entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Publication state of a draft.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Only visible to admins.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Listed on the public notices page.
    #[sea_orm(string_value = "published")]
    Published,
}

/// A notice that admins write and may publish.
///
/// `published_at` is set exactly when `status` is `Published`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drafts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Attached document URL (optional).
    #[sea_orm(nullable)]
    pub file_url: Option<String>,

    #[sea_orm(indexed)]
    pub status: DraftStatus,

    #[sea_orm(nullable)]
    pub published_at: Option<DateTimeWithTimeZone>,

    pub created_by: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::email_log::Entity")]
    EmailLogs,
}

impl Related<super::email_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
