//! User identity token factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test user identity token rows.
///
/// Defaults to a token issued "now" that is valid for 8 hours.
pub struct UserTokenFactory<'a> {
    db: &'a DatabaseConnection,
    token: String,
    uhs: String,
    not_after: DateTime<Utc>,
}

impl<'a> UserTokenFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            token: format!("user-token-{}", id),
            uhs: format!("uhs-{}", id),
            not_after: Utc::now() + Duration::hours(8),
        }
    }

    /// Sets the token string.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the user hash.
    pub fn uhs(mut self, uhs: impl Into<String>) -> Self {
        self.uhs = uhs.into();
        self
    }

    /// Sets the expiry timestamp. Pass a past instant to seed a stale row.
    pub fn not_after(mut self, not_after: DateTime<Utc>) -> Self {
        self.not_after = not_after;
        self
    }

    pub async fn build(self) -> Result<entity::user_token::Model, DbErr> {
        let now = Utc::now();
        entity::user_token::ActiveModel {
            token: ActiveValue::Set(self.token),
            uhs: ActiveValue::Set(self.uhs),
            issue_instant: ActiveValue::Set(now),
            not_after: ActiveValue::Set(self.not_after),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a fresh user token with default values.
pub async fn create_user_token(
    db: &DatabaseConnection,
) -> Result<entity::user_token::Model, DbErr> {
    UserTokenFactory::new(db).build().await
}
