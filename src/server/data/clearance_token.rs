use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct ClearanceTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClearanceTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the most recently created clearance row.
    ///
    /// Clearance expiry is derived from `created_at`, so newest-by-creation
    /// is the freshness ordering for this table.
    pub async fn latest(&self) -> Result<Option<entity::clearance_token::Model>, DbErr> {
        entity::prelude::ClearanceToken::find()
            .order_by_desc(entity::clearance_token::Column::CreatedAt)
            .one(self.db)
            .await
    }

    /// Inserts a new clearance row stamped with the current time.
    pub async fn create(
        &self,
        flight_configuration_id: String,
    ) -> Result<entity::clearance_token::Model, DbErr> {
        let now = Utc::now();
        entity::clearance_token::ActiveModel {
            flight_configuration_id: ActiveValue::Set(flight_configuration_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
