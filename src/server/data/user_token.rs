use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct UserTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the user token row with the latest expiry, expired rows included.
    pub async fn latest(&self) -> Result<Option<entity::user_token::Model>, DbErr> {
        entity::prelude::UserToken::find()
            .order_by_desc(entity::user_token::Column::NotAfter)
            .one(self.db)
            .await
    }

    /// Inserts a new user token row.
    pub async fn create(
        &self,
        token: String,
        uhs: String,
        issue_instant: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> Result<entity::user_token::Model, DbErr> {
        let now = Utc::now();
        entity::user_token::ActiveModel {
            token: ActiveValue::Set(token),
            uhs: ActiveValue::Set(uhs),
            issue_instant: ActiveValue::Set(issue_instant),
            not_after: ActiveValue::Set(not_after),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
