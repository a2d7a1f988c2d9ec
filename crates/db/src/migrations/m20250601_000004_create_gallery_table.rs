//! Create gallery table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gallery::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Gallery::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Gallery::FestId).string_len(32).null())
                    .col(ColumnDef::new(Gallery::EventId).string_len(32).null())
                    .col(ColumnDef::new(Gallery::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Gallery::Description).text().null())
                    .col(ColumnDef::new(Gallery::ImageUrl).string_len(1024).not_null())
                    .col(
                        ColumnDef::new(Gallery::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_fest")
                            .from(Gallery::Table, Gallery::FestId)
                            .to(Fests::Table, Fests::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_event")
                            .from(Gallery::Table, Gallery::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_fest_id")
                    .table(Gallery::Table)
                    .col(Gallery::FestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_event_id")
                    .table(Gallery::Table)
                    .col(Gallery::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_created_at")
                    .table(Gallery::Table)
                    .col(Gallery::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gallery::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Gallery {
    Table,
    Id,
    FestId,
    EventId,
    Title,
    Description,
    ImageUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Fests {
    Table,
    Id,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}
