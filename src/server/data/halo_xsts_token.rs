use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct HaloXstsTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> HaloXstsTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the Halo XSTS token row with the latest expiry, expired rows
    /// included.
    pub async fn latest(&self) -> Result<Option<entity::halo_xsts_token::Model>, DbErr> {
        entity::prelude::HaloXstsToken::find()
            .order_by_desc(entity::halo_xsts_token::Column::NotAfter)
            .one(self.db)
            .await
    }

    /// Inserts a new Halo XSTS token row.
    pub async fn create(
        &self,
        token: String,
        uhs: String,
        issue_instant: DateTime<Utc>,
        not_after: DateTime<Utc>,
    ) -> Result<entity::halo_xsts_token::Model, DbErr> {
        let now = Utc::now();
        entity::halo_xsts_token::ActiveModel {
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
