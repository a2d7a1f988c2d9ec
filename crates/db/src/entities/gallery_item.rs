//! Gallery item entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An uploaded photo, optionally linked to a fest and an event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallery")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(nullable, indexed)]
    pub fest_id: Option<String>,

    #[sea_orm(nullable, indexed)]
    pub event_id: Option<String>,

    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// URL of the already-uploaded image.
    pub image_url: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::fest::Entity",
        from = "Column::FestId",
        to = "super::fest::Column::Id",
        on_delete = "SetNull"
    )]
    Fest,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_delete = "SetNull"
    )]
    Event,
}

impl Related<super::fest::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Fest.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
