//! Create winners table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Winners::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Winners::EventId).string_len(32).not_null())
                    .col(ColumnDef::new(Winners::StudentName).string_len(256).not_null())
                    .col(ColumnDef::new(Winners::ClassName).string_len(64).not_null())
                    .col(ColumnDef::new(Winners::Department).string_len(128).not_null())
                    .col(ColumnDef::new(Winners::Medal).string_len(8).not_null())
                    .col(ColumnDef::new(Winners::Position).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_event")
                            .from(Winners::Table, Winners::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Medal values are constrained at the database level too.
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE winners ADD CONSTRAINT chk_winners_medal \
                 CHECK (medal IN ('gold', 'silver', 'bronze'))",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_winners_event_id")
                    .table(Winners::Table)
                    .col(Winners::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_winners_class_name")
                    .table(Winners::Table)
                    .col(Winners::ClassName)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_winners_department")
                    .table(Winners::Table)
                    .col(Winners::Department)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Winners::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Winners {
    Table,
    Id,
    EventId,
    StudentName,
    ClassName,
    Department,
    Medal,
    Position,
    CreatedAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
}
