use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the HTTP client used for OAuth code exchange and upstream requests.
///
/// Redirects are disabled so upstream services cannot bounce a request
/// carrying credentials to an arbitrary host.
pub fn setup_reqwest_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_default()
}

/// Builds the OAuth2 client for the Microsoft Live authorization-code flow.
///
/// # Arguments
/// - `config` - Application configuration with Live client credentials and URLs
///
/// # Returns
/// - `Ok(OAuth2Client)` - Configured client with auth and token endpoints set
/// - `Err(AppError)` - A configured URL failed to parse
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let auth_url = AuthUrl::new(config.live_auth_url.clone())
        .map_err(|_| ConfigError::InvalidUrl(config.live_auth_url.clone()))?;
    let token_url = TokenUrl::new(config.live_token_url.clone())
        .map_err(|_| ConfigError::InvalidUrl(config.live_token_url.clone()))?;
    let redirect_url = RedirectUrl::new(config.live_redirect_url.clone())
        .map_err(|_| ConfigError::InvalidUrl(config.live_redirect_url.clone()))?;

    Ok(
        oauth2::Client::new(ClientId::new(config.live_client_id.clone()))
            .set_client_secret(ClientSecret::new(config.live_client_secret.clone()))
            .set_auth_uri(auth_url)
            .set_token_uri(token_url)
            .set_redirect_uri(redirect_url),
    )
}
