//! Spartan (service bearer) token factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test spartan token rows.
///
/// Defaults to a token issued "now" that expires in 4 hours.
pub struct SpartanTokenFactory<'a> {
    db: &'a DatabaseConnection,
    token: String,
    expires_utc: DateTime<Utc>,
}

impl<'a> SpartanTokenFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            token: format!("spartan-token-{}", id),
            expires_utc: Utc::now() + Duration::hours(4),
        }
    }

    /// Sets the token string.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the expiry timestamp. Pass a past instant to seed a stale row.
    pub fn expires_utc(mut self, expires_utc: DateTime<Utc>) -> Self {
        self.expires_utc = expires_utc;
        self
    }

    pub async fn build(self) -> Result<entity::spartan_token::Model, DbErr> {
        let now = Utc::now();
        entity::spartan_token::ActiveModel {
            token: ActiveValue::Set(self.token),
            expires_utc: ActiveValue::Set(self.expires_utc),
            token_duration: ActiveValue::Set("PT4H".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a fresh spartan token with default values.
pub async fn create_spartan_token(
    db: &DatabaseConnection,
) -> Result<entity::spartan_token::Model, DbErr> {
    SpartanTokenFactory::new(db).build().await
}
