//! Fest entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category of a fest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum FestType {
    #[sea_orm(string_value = "cultural")]
    Cultural,
    #[sea_orm(string_value = "technical")]
    Technical,
    #[sea_orm(string_value = "sports")]
    Sports,
}

impl FestType {
    /// The stored string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cultural => "cultural",
            Self::Technical => "technical",
            Self::Sports => "sports",
        }
    }
}

/// A multi-day festival hosting events.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_name = "type")]
    pub fest_type: FestType,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub start_date: Date,

    pub end_date: Date,

    /// Banner image URL (optional).
    #[sea_orm(nullable)]
    pub banner_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event::Entity")]
    Events,
    #[sea_orm(has_many = "super::gallery_item::Entity")]
    GalleryItems,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::gallery_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
