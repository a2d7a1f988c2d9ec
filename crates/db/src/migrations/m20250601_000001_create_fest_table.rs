//! Create fests table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Fests::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Fests::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Fests::Type).string_len(16).not_null())
                    .col(ColumnDef::new(Fests::Description).text().not_null())
                    .col(ColumnDef::new(Fests::StartDate).date().not_null())
                    .col(ColumnDef::new(Fests::EndDate).date().not_null())
                    .col(ColumnDef::new(Fests::BannerUrl).string_len(1024))
                    .col(
                        ColumnDef::new(Fests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: start_date (fest listings and upcoming)
        manager
            .create_index(
                Index::create()
                    .name("idx_fests_start_date")
                    .table(Fests::Table)
                    .col(Fests::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fests_type")
                    .table(Fests::Table)
                    .col(Fests::Type)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Fests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Fests {
    Table,
    Id,
    Name,
    Type,
    Description,
    StartDate,
    EndDate,
    BannerUrl,
    CreatedAt,
}
