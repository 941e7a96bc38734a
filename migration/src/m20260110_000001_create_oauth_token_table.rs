use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]

pub struct Migration;

#[async_trait::async_trait]

impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OAuthToken::Table)
                    .if_not_exists()
                    .col(pk_auto(OAuthToken::Id))
                    .col(string(OAuthToken::TokenType))
                    .col(text(OAuthToken::AccessToken))
                    .col(text(OAuthToken::RefreshToken))
                    .col(big_integer(OAuthToken::ExpiresIn))
                    .col(string(OAuthToken::UserId))
                    .col(string(OAuthToken::Scope))
                    .col(timestamp_with_time_zone(OAuthToken::CreatedAt))
                    .col(timestamp_with_time_zone(OAuthToken::UpdatedAt))
                    .col(string_null(OAuthToken::CreatedBy))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OAuthToken::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]

pub enum OAuthToken {
    Table,
    Id,
    TokenType,
    AccessToken,
    RefreshToken,
    ExpiresIn,
    UserId,
    Scope,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}
