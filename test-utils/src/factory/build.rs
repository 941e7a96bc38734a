//! Client build id factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test client build rows.
pub struct BuildFactory<'a> {
    db: &'a DatabaseConnection,
    build_id: String,
    build_date: DateTime<Utc>,
}

impl<'a> BuildFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            build_id: format!("6.10021.{}.0", id),
            build_date: Utc::now(),
        }
    }

    /// Sets the build id string.
    pub fn build_id(mut self, build_id: impl Into<String>) -> Self {
        self.build_id = build_id.into();
        self
    }

    /// Sets the build date. The build with the highest date wins.
    pub fn build_date(mut self, build_date: DateTime<Utc>) -> Self {
        self.build_date = build_date;
        self
    }

    pub async fn build(self) -> Result<entity::build::Model, DbErr> {
        let now = Utc::now();
        entity::build::ActiveModel {
            build_id: ActiveValue::Set(self.build_id),
            build_date: ActiveValue::Set(self.build_date),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a build row with default values.
pub async fn create_build(db: &DatabaseConnection) -> Result<entity::build::Model, DbErr> {
    BuildFactory::new(db).build().await
}
