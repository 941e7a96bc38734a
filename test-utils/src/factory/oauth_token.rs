//! OAuth token factory for creating test OAuth token rows.
//!
//! This module provides factory methods for creating OAuth token rows with
//! sensible defaults, reducing boilerplate in tests. The factory supports
//! customization through a builder pattern.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test OAuth tokens with customizable fields.
///
/// Defaults to a token pair created "now" with a one hour access lifetime,
/// which the chain manager treats as fresh.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::oauth_token::OAuthTokenFactory;
///
/// let token = OAuthTokenFactory::new(&db)
///     .access_token("custom-access")
///     .created_at(Utc::now() - Duration::hours(2))
///     .build()
///     .await?;
/// ```
pub struct OAuthTokenFactory<'a> {
    db: &'a DatabaseConnection,
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    created_at: DateTime<Utc>,
}

impl<'a> OAuthTokenFactory<'a> {
    /// Creates a new OAuthTokenFactory with default values.
    ///
    /// Defaults:
    /// - access_token: `"access-{id}"` where id is auto-incremented
    /// - refresh_token: `"refresh-{id}"`
    /// - expires_in: 3600 seconds
    /// - created_at: now (the row is fresh)
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the row
    ///
    /// # Returns
    /// - `OAuthTokenFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            access_token: format!("access-{}", id),
            refresh_token: format!("refresh-{}", id),
            expires_in: 3600,
            created_at: Utc::now(),
        }
    }

    /// Sets the access token string.
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self
    }

    /// Sets the refresh token string.
    pub fn refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self
    }

    /// Sets the access token lifetime in seconds.
    pub fn expires_in(mut self, expires_in: i64) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Sets the creation timestamp. Access expiry is `created_at + expires_in`,
    /// so backdating this makes the row expired.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the OAuth token row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::oauth_token::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::oauth_token::Model, DbErr> {
        entity::oauth_token::ActiveModel {
            token_type: ActiveValue::Set("bearer".to_string()),
            access_token: ActiveValue::Set(self.access_token),
            refresh_token: ActiveValue::Set(self.refresh_token),
            expires_in: ActiveValue::Set(self.expires_in),
            user_id: ActiveValue::Set("test-live-user".to_string()),
            scope: ActiveValue::Set("Xboxlive.signin Xboxlive.offline_access".to_string()),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            created_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a fresh OAuth token with default values.
///
/// Shorthand for `OAuthTokenFactory::new(db).build().await`.
pub async fn create_oauth_token(
    db: &DatabaseConnection,
) -> Result<entity::oauth_token::Model, DbErr> {
    OAuthTokenFactory::new(db).build().await
}
