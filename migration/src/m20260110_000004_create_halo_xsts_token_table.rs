use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HaloXstsToken::Table)
                    .if_not_exists()
                    .col(pk_auto(HaloXstsToken::Id))
                    .col(text(HaloXstsToken::Token))
                    .col(string(HaloXstsToken::Uhs))
                    .col(timestamp_with_time_zone(HaloXstsToken::IssueInstant))
                    .col(timestamp_with_time_zone(HaloXstsToken::NotAfter))
                    .col(timestamp_with_time_zone(HaloXstsToken::CreatedAt))
                    .col(timestamp_with_time_zone(HaloXstsToken::UpdatedAt))
                    .col(string_null(HaloXstsToken::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HaloXstsToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum HaloXstsToken {
    Table,
    Id,
    Token,
    Uhs,
    IssueInstant,
    NotAfter,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}
