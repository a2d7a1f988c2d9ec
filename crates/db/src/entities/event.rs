//! Event entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single competition or activity within a fest.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning fest. Events are removed with their fest.
    #[sea_orm(indexed)]
    pub fest_id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub event_date: Date,

    #[sea_orm(nullable)]
    pub venue: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fest::Entity",
        from = "Column::FestId",
        to = "super::fest::Column::Id",
        on_delete = "Cascade"
    )]
    Fest,
    #[sea_orm(has_many = "super::winner::Entity")]
    Winners,
    #[sea_orm(has_many = "super::gallery_item::Entity")]
    GalleryItems,
}

impl Related<super::fest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fest.def()
    }
}

impl Related<super::winner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Winners.def()
    }
}

impl Related<super::gallery_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
