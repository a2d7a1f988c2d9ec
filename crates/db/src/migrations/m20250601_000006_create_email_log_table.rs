//! Create email_logs table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(EmailLogs::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(EmailLogs::DraftId).string_len(32).null())
                    .col(ColumnDef::new(EmailLogs::Subject).string_len(512).not_null())
                    .col(ColumnDef::new(EmailLogs::Recipients).json_binary().not_null())
                    .col(
                        ColumnDef::new(EmailLogs::SentAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(EmailLogs::Status).string_len(16).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_email_logs_draft")
                            .from(EmailLogs::Table, EmailLogs::DraftId)
                            .to(Drafts::Table, Drafts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_email_logs_sent_at")
                    .table(EmailLogs::Table)
                    .col(EmailLogs::SentAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmailLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EmailLogs {
    Table,
    Id,
    DraftId,
    Subject,
    Recipients,
    SentAt,
    Status,
}

#[derive(Iden)]
enum Drafts {
    Table,
    Id,
}
