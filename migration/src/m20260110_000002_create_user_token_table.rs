use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserToken::Table)
                    .if_not_exists()
                    .col(pk_auto(UserToken::Id))
                    .col(text(UserToken::Token))
                    .col(string(UserToken::Uhs))
                    .col(timestamp_with_time_zone(UserToken::IssueInstant))
                    .col(timestamp_with_time_zone(UserToken::NotAfter))
                    .col(timestamp_with_time_zone(UserToken::CreatedAt))
                    .col(timestamp_with_time_zone(UserToken::UpdatedAt))
                    .col(string_null(UserToken::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum UserToken {
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
