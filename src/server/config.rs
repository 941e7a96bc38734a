use crate::server::error::{config::ConfigError, AppError};

const LIVE_AUTH_URL: &str = "https://login.live.com/oauth20_authorize.srf";
const LIVE_TOKEN_URL: &str = "https://login.live.com/oauth20_token.srf";

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,

    pub live_client_id: String,
    pub live_client_secret: String,
    pub live_redirect_url: String,

    pub live_auth_url: String,
    pub live_token_url: String,

    /// Fixed service-account xuid used as the subject of clearance issuance.
    pub clearance_xuid: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            live_client_id: std::env::var("LIVE_CLIENT_ID")
                .map_err(|_| ConfigError::MissingEnvVar("LIVE_CLIENT_ID".to_string()))?,
            live_client_secret: std::env::var("LIVE_CLIENT_SECRET")
                .map_err(|_| ConfigError::MissingEnvVar("LIVE_CLIENT_SECRET".to_string()))?,
            live_redirect_url: std::env::var("LIVE_REDIRECT_URL")
                .map_err(|_| ConfigError::MissingEnvVar("LIVE_REDIRECT_URL".to_string()))?,
            live_auth_url: LIVE_AUTH_URL.to_string(),
            live_token_url: LIVE_TOKEN_URL.to_string(),
            clearance_xuid: std::env::var("CLEARANCE_XUID")
                .map_err(|_| ConfigError::MissingEnvVar("CLEARANCE_XUID".to_string()))?,
        })
    }
}
