//! OAuth2 login with Microsoft Live.
//!
//! The authorization-code flow is the only interactive step in the whole token
//! chain: an operator signs in once, the resulting token pair is persisted,
//! and every later link is minted non-interactively from the stored refresh
//! token.

use oauth2::ExtraTokenFields;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::server::state::OAuth2Client;

pub mod callback;
pub mod login;

/// Extra fields Live returns alongside the standard OAuth2 token response.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct LiveTokenFields {
    /// Opaque Live account identifier, absent for some account types.
    pub user_id: Option<String>,
}

impl ExtraTokenFields for LiveTokenFields {}

pub struct LiveAuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub http_client: &'a reqwest::Client,
    pub oauth_client: &'a OAuth2Client,
}

impl<'a> LiveAuthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
    ) -> Self {
        Self {
            db,
            http_client,
            oauth_client,
        }
    }
}
