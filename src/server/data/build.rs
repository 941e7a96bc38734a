use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};

pub struct BuildRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BuildRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the build with the highest `build_date`.
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The current build used for clearance issuance
    /// - `Ok(None)`: No build has been recorded yet
    /// - `Err(DbErr)`: Database error
    pub async fn newest(&self) -> Result<Option<entity::build::Model>, DbErr> {
        entity::prelude::Build::find()
            .order_by_desc(entity::build::Column::BuildDate)
            .one(self.db)
            .await
    }

    /// Gets all known builds, newest first.
    pub async fn get_all(&self) -> Result<Vec<entity::build::Model>, DbErr> {
        entity::prelude::Build::find()
            .order_by_desc(entity::build::Column::BuildDate)
            .all(self.db)
            .await
    }

    /// Inserts a new build row.
    pub async fn create(
        &self,
        build_id: String,
        build_date: DateTime<Utc>,
        created_by: Option<String>,
    ) -> Result<entity::build::Model, DbErr> {
        let now = Utc::now();
        entity::build::ActiveModel {
            build_id: ActiveValue::Set(build_id),
            build_date: ActiveValue::Set(build_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(created_by),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
