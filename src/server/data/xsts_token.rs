use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct XstsTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> XstsTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the generic XSTS token row with the latest expiry, expired rows
    /// included.
    pub async fn latest(&self) -> Result<Option<entity::xsts_token::Model>, DbErr> {
        entity::prelude::XstsToken::find()
            .order_by_desc(entity::xsts_token::Column::NotAfter)
            .one(self.db)
            .await
    }

    /// Inserts a new generic XSTS token row.
    pub async fn create(
        &self,
        token: String,
        uhs: String,
        issue_instant: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> Result<entity::xsts_token::Model, DbErr> {
        let now = Utc::now();
        entity::xsts_token::ActiveModel {
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
