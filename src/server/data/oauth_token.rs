use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct OAuthTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Parameters for inserting a new OAuth token row.
pub struct CreateOAuthTokenParam {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user_id: String,
    pub scope: String,
    pub created_by: Option<String>,
}

impl<'a> OAuthTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the most recently created OAuth token row, expired rows included.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The newest row by `created_at`
    /// - `Ok(None)`: No OAuth token has been stored yet
    /// - `Err(DbErr)`: Database error
    pub async fn latest(&self) -> Result<Option<entity::oauth_token::Model>, DbErr> {
        entity::prelude::OAuthToken::find()
            .order_by_desc(entity::oauth_token::Column::CreatedAt)
            .one(self.db)
            .await
    }

    /// Inserts a new OAuth token row. Existing rows are never updated.
    ///
    /// # Returns
    /// - `Ok(Model)`: The created row
    /// - `Err(DbErr)`: Database error
    pub async fn create(
        &self,
        param: CreateOAuthTokenParam,
    ) -> Result<entity::oauth_token::Model, DbErr> {
        let now = Utc::now();
        entity::oauth_token::ActiveModel {
            token_type: ActiveValue::Set(param.token_type),
            access_token: ActiveValue::Set(param.access_token),
            refresh_token: ActiveValue::Set(param.refresh_token),
            expires_in: ActiveValue::Set(param.expires_in),
            user_id: ActiveValue::Set(param.user_id),
            scope: ActiveValue::Set(param.scope),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(param.created_by),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
