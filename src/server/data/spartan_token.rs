use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct SpartanTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SpartanTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the spartan token row with the latest expiry, expired rows
    /// included.
    pub async fn latest(&self) -> Result<Option<entity::spartan_token::Model>, DbErr> {
        entity::prelude::SpartanToken::find()
            .order_by_desc(entity::spartan_token::Column::ExpiresUtc)
            .one(self.db)
            .await
    }

    /// Inserts a new spartan token row.
    pub async fn create(
        &self,
        token: String,
        expires_utc: DateTime<Utc>,
        token_duration: String,
    ) -> Result<entity::spartan_token::Model, DbErr> {
        let now = Utc::now();
        entity::spartan_token::ActiveModel {
            token: ActiveValue::Set(token),
            expires_utc: ActiveValue::Set(expires_utc),
            token_duration: ActiveValue::Set(token_duration),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
