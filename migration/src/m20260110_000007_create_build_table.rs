use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Build::Table)
                    .if_not_exists()
                    .col(pk_auto(Build::Id))
                    .col(string_uniq(Build::BuildId))
                    .col(timestamp_with_time_zone(Build::BuildDate))
                    .col(timestamp_with_time_zone(Build::CreatedAt))
                    .col(timestamp_with_time_zone(Build::UpdatedAt))
                    .col(string_null(Build::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Build::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum Build {
    Table,
    Id,
    BuildId,
    BuildDate,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}
