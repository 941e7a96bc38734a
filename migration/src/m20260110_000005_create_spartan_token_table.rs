use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SpartanToken::Table)
                    .if_not_exists()
                    .col(pk_auto(SpartanToken::Id))
                    .col(text(SpartanToken::Token))
                    .col(timestamp_with_time_zone(SpartanToken::ExpiresUtc))
                    .col(string(SpartanToken::TokenDuration))
                    .col(timestamp_with_time_zone(SpartanToken::CreatedAt))
                    .col(timestamp_with_time_zone(SpartanToken::UpdatedAt))
                    .col(string_null(SpartanToken::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SpartanToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum SpartanToken {
    Table,
    Id,
    Token,
    ExpiresUtc,
    TokenDuration,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}
