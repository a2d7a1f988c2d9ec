//! Email log entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of a dispatch attempt.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// One row per email dispatch attempt.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Draft whose content was sent, if any.
    #[sea_orm(nullable, indexed)]
    pub draft_id: Option<String>,

    pub subject: String,

    /// Recipient addresses (JSON array of strings).
    #[sea_orm(column_type = "JsonBinary")]
    pub recipients: Json,

    #[sea_orm(indexed)]
    pub sent_at: DateTimeWithTimeZone,

    pub status: EmailStatus,
}

impl Model {
    /// Recipient addresses as strings.
    #[must_use]
    pub fn recipient_list(&self) -> Vec<String> {
        serde_json::from_value(self.recipients.clone()).unwrap_or_default()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::draft::Entity",
        from = "Column::DraftId",
        to = "super::draft::Column::Id",
        on_delete = "SetNull"
    )]
    Draft,
}

impl Related<super::draft::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Draft.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
