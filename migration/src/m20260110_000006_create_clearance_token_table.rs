use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClearanceToken::Table)
                    .if_not_exists()
                    .col(pk_auto(ClearanceToken::Id))
                    .col(string(ClearanceToken::FlightConfigurationId))
                    .col(timestamp_with_time_zone(ClearanceToken::CreatedAt))
                    .col(timestamp_with_time_zone(ClearanceToken::UpdatedAt))
                    .col(string_null(ClearanceToken::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClearanceToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum ClearanceToken {
    Table,
    Id,
    FlightConfigurationId,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}
