//! Clearance token factory.
//!
//! Clearance expiry is derived from `created_at`, so the factory exposes the
//! creation timestamp directly; backdate it past the clearance TTL to seed a
//! stale row.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test clearance token rows.
pub struct ClearanceTokenFactory<'a> {
    db: &'a DatabaseConnection,
    flight_configuration_id: String,
    created_at: DateTime<Utc>,
}

impl<'a> ClearanceTokenFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            flight_configuration_id: format!("flight-{}", id),
            created_at: Utc::now(),
        }
    }

    /// Sets the flight configuration id.
    pub fn flight_configuration_id(mut self, flight_configuration_id: impl Into<String>) -> Self {
        self.flight_configuration_id = flight_configuration_id.into();
        self
    }

    /// Sets the creation timestamp the derived expiry is computed from.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::clearance_token::Model, DbErr> {
        entity::clearance_token::ActiveModel {
            flight_configuration_id: ActiveValue::Set(self.flight_configuration_id),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a fresh clearance token with default values.
pub async fn create_clearance_token(
    db: &DatabaseConnection,
) -> Result<entity::clearance_token::Model, DbErr> {
    ClearanceTokenFactory::new(db).build().await
}
