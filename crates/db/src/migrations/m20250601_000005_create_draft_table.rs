//! Create drafts table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drafts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Drafts::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Drafts::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Drafts::Content).text().not_null())
                    .col(ColumnDef::new(Drafts::FileUrl).string_len(1024))
                    .col(
                        ColumnDef::new(Drafts::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Drafts::PublishedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Drafts::CreatedBy).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Drafts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (status, published_at) for public notice listings
        manager
            .create_index(
                Index::create()
                    .name("idx_drafts_status_published_at")
                    .table(Drafts::Table)
                    .col(Drafts::Status)
                    .col(Drafts::PublishedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Drafts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Drafts {
    Table,
    Id,
    Title,
    Content,
    FileUrl,
    Status,
    PublishedAt,
    CreatedBy,
    CreatedAt,
}
