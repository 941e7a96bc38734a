//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Database connection pool for data persistence
//! - HTTP client for external API requests
//! - OAuth2 client for Microsoft Live authentication
//! - Transport used by the token chain and Waypoint client
//! - Token chain settings derived from configuration

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::config::Config;
use super::service::halo::chain::ChainSettings;
use super::service::halo::transport::{ReqwestTransport, Transport};
use super::service::oauth::LiveTokenFields;

/// Type alias for the OAuth2 client configured for Microsoft Live authentication.
///
/// Live's token endpoint returns a `user_id` field alongside the standard
/// response, carried here via `LiveTokenFields`.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<LiveTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// This struct holds all the shared state that needs to be accessible across
/// request handlers. It is initialized once during server startup and then
/// cloned (cheaply, as it contains reference-counted or cloneable types) for
/// each incoming request via Axum's state extraction.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for making external API requests.
    ///
    /// Configured with security settings (no redirects) to prevent SSRF
    /// vulnerabilities. Used by the OAuth2 code exchange.
    pub http_client: reqwest::Client,

    /// OAuth2 client for the Microsoft Live authorization-code flow.
    ///
    /// Handles generating login URLs and exchanging authorization codes for
    /// access tokens. Refresh-grant requests go through `transport` instead so
    /// the token chain stays testable.
    pub oauth_client: OAuth2Client,

    /// Transport used for all upstream Xbox and Halo Waypoint requests.
    pub transport: Arc<dyn Transport>,

    /// Settings consumed by the token chain manager.
    pub chain_settings: ChainSettings,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// This constructor is called once during server startup after all
    /// dependencies have been initialized. The resulting state is then
    /// provided to the Axum router for use in request handlers.
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        oauth_client: OAuth2Client,
        config: &Config,
    ) -> Self {
        let transport = Arc::new(ReqwestTransport::new(http_client.clone()));
        let chain_settings = ChainSettings {
            live_client_id: config.live_client_id.clone(),
            live_client_secret: config.live_client_secret.clone(),
            live_token_url: config.live_token_url.clone(),
            clearance_xuid: config.clearance_xuid.clone(),
        };

        Self {
            db,
            http_client,
            oauth_client,
            transport,
            chain_settings,
        }
    }
}
