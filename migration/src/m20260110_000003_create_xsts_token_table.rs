use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(XstsToken::Table)
                    .if_not_exists()
                    .col(pk_auto(XstsToken::Id))
                    .col(text(XstsToken::Token))
                    .col(string(XstsToken::Uhs))
                    .col(timestamp_with_time_zone(XstsToken::IssueInstant))
                    .col(timestamp_with_time_zone(XstsToken::NotAfter))
                    .col(timestamp_with_time_zone(XstsToken::CreatedAt))
                    .col(timestamp_with_time_zone(XstsToken::UpdatedAt))
                    .col(string_null(XstsToken::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(XstsToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum XstsToken {
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
