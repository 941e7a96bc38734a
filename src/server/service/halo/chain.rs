//! Five-stage token chain manager.
//!
//! Stored OAuth access tokens are turned, link by link, into the spartan
//! bearer and clearance credentials the data endpoints require:
//!
//! OAuth access -> user identity token -> XSTS token -> spartan bearer ->
//! clearance. Each accessor returns the newest non-expired stored row of its
//! kind, or recursively freshens the preceding link and performs one issuance
//! call. An expired row is treated exactly like an absent one. The chain is
//! all-or-nothing: a failed link persists nothing and surfaces as
//! `TokenError::Unavailable` naming the kind that failed.
//!
//! Token rows are insert-only. Concurrent callers may race to issue the same
//! kind; both rows land and the newest wins on the next read, so no locking
//! is held across issuance calls.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::server::{
    data::{
        build::BuildRepository,
        clearance_token::ClearanceTokenRepository,
        halo_xsts_token::HaloXstsTokenRepository,
        oauth_token::{CreateOAuthTokenParam, OAuthTokenRepository},
        spartan_token::SpartanTokenRepository,
        user_token::UserTokenRepository,
        xsts_token::XstsTokenRepository,
    },
    error::{
        token::{TokenError, TokenKind},
        AppError,
    },
    util::time::parse_upstream_timestamp,
};

use super::transport::{ApiRequest, Transport};
use super::HALO_WAYPOINT_USER_AGENT;

const USER_AUTHENTICATE_URL: &str = "https://user.auth.xboxlive.com/user/authenticate";
const XSTS_AUTHORIZE_URL: &str = "https://xsts.auth.xboxlive.com/xsts/authorize";
const SPARTAN_TOKEN_URL: &str = "https://settings.svc.halowaypoint.com/spartan-token";
const FLIGHT_CONFIGURATION_URL: &str =
    "https://settings.svc.halowaypoint.com/oban/flight-configurations/titles/hi/audiences/RETAIL/players";

const USER_AUTH_RELYING_PARTY: &str = "http://auth.xboxlive.com";
const XBOX_RELYING_PARTY: &str = "http://xboxlive.com";
const HALO_RELYING_PARTY: &str = "https://prod.xsts.halowaypoint.com/";

/// Clearance lifetime. The upstream response carries no TTL; 900 seconds
/// matches observed server behavior and is a tuning constant, not a
/// documented contract. The skew margin keeps us from presenting a clearance
/// that dies mid-request.
const CLEARANCE_TTL_SECONDS: i64 = 900;
const CLEARANCE_SKEW_SECONDS: i64 = 30;

/// Configuration the chain needs at issuance time.
#[derive(Clone)]
pub struct ChainSettings {
    pub live_client_id: String,
    pub live_client_secret: String,
    pub live_token_url: String,
    /// Fixed service-account xuid used as the subject of clearance issuance.
    pub clearance_xuid: String,
}

pub struct TokenChainService<'a> {
    db: &'a DatabaseConnection,
    transport: &'a dyn Transport,
    settings: &'a ChainSettings,
}

impl<'a> TokenChainService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        transport: &'a dyn Transport,
        settings: &'a ChainSettings,
    ) -> Self {
        Self {
            db,
            transport,
            settings,
        }
    }

    /// Gets a non-expired OAuth access token, refreshing via the stored
    /// refresh token when the access half has lapsed.
    ///
    /// OAuth sits outside the issuance recursion: the initial pair comes from
    /// a user-mediated authorization, so an empty table or a failed refresh
    /// cannot be repaired here. A human must re-complete the login flow.
    pub async fn get_oauth_token(&self) -> Result<entity::oauth_token::Model, AppError> {
        let repo = OAuthTokenRepository::new(self.db);

        let stored = repo
            .latest()
            .await?
            .ok_or(TokenError::Unavailable(TokenKind::OAuth))?;

        let expires_at = stored.created_at + Duration::seconds(stored.expires_in);
        if expires_at > Utc::now() {
            return Ok(stored);
        }

        self.refresh_oauth_token(&stored).await
    }

    async fn refresh_oauth_token(
        &self,
        stale: &entity::oauth_token::Model,
    ) -> Result<entity::oauth_token::Model, AppError> {
        let request = ApiRequest::post_form(
            &self.settings.live_token_url,
            vec![
                ("grant_type", "refresh_token".to_string()),
                ("refresh_token", stale.refresh_token.clone()),
                ("client_id", self.settings.live_client_id.clone()),
                ("client_secret", self.settings.live_client_secret.clone()),
            ],
        )
        .header("User-Agent", HALO_WAYPOINT_USER_AGENT)
        .header("Accept", "application/json");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|_| TokenError::Unavailable(TokenKind::OAuth))?;

        if response.status != 200 {
            return Err(TokenError::Unavailable(TokenKind::OAuth).into());
        }

        let access_token = require_str(&response.body, "access_token", TokenKind::OAuth)?;
        let refresh_token = require_str(&response.body, "refresh_token", TokenKind::OAuth)?;
        let expires_in = response.body["expires_in"]
            .as_i64()
            .ok_or(TokenError::Unavailable(TokenKind::OAuth))?;
        let token_type = response.body["token_type"]
            .as_str()
            .unwrap_or("bearer")
            .to_string();
        let scope = response.body["scope"].as_str().unwrap_or_default().to_string();
        let user_id = response.body["user_id"]
            .as_str()
            .unwrap_or(&stale.user_id)
            .to_string();

        let created = OAuthTokenRepository::new(self.db)
            .create(CreateOAuthTokenParam {
                token_type,
                access_token,
                refresh_token,
                expires_in,
                user_id,
                scope,
                created_by: None,
            })
            .await?;

        Ok(created)
    }

    /// Gets a non-expired user identity token, minting one from the OAuth
    /// access token when needed.
    pub async fn get_user_token(&self) -> Result<entity::user_token::Model, AppError> {
        let repo = UserTokenRepository::new(self.db);

        if let Some(stored) = repo.latest().await? {
            if stored.not_after > Utc::now() {
                return Ok(stored);
            }
        }

        let oauth = self.get_oauth_token().await?;

        let request = ApiRequest::post_json(
            USER_AUTHENTICATE_URL,
            json!({
                "Properties": {
                    "AuthMethod": "RPS",
                    "SiteName": "user.auth.xboxlive.com",
                    "RpsTicket": format!("d={}", oauth.access_token),
                },
                "RelyingParty": USER_AUTH_RELYING_PARTY,
                "TokenType": "JWT",
            }),
        )
        .header("x-xbl-contract-version", "1")
        .header("User-Agent", HALO_WAYPOINT_USER_AGENT)
        .header("Accept", "application/json");

        let issued = self
            .issue_identity_token(request, TokenKind::UserToken)
            .await?;

        let created = repo
            .create(issued.token, issued.uhs, issued.issue_instant, issued.not_after)
            .await?;

        Ok(created)
    }

    /// Gets a non-expired generic XSTS token for the Xbox Live relying party.
    pub async fn get_xsts_token(&self) -> Result<entity::xsts_token::Model, AppError> {
        let repo = XstsTokenRepository::new(self.db);

        if let Some(stored) = repo.latest().await? {
            if stored.not_after > Utc::now() {
                return Ok(stored);
            }
        }

        let user_token = self.get_user_token().await?;
        let request = xsts_authorize_request(&user_token.token, XBOX_RELYING_PARTY);
        let issued = self.issue_identity_token(request, TokenKind::Xsts).await?;

        let created = repo
            .create(issued.token, issued.uhs, issued.issue_instant, issued.not_after)
            .await?;

        Ok(created)
    }

    /// Gets a non-expired XSTS token for the Halo Waypoint relying party.
    pub async fn get_halo_xsts_token(&self) -> Result<entity::halo_xsts_token::Model, AppError> {
        let repo = HaloXstsTokenRepository::new(self.db);

        if let Some(stored) = repo.latest().await? {
            if stored.not_after > Utc::now() {
                return Ok(stored);
            }
        }

        let user_token = self.get_user_token().await?;
        let request = xsts_authorize_request(&user_token.token, HALO_RELYING_PARTY);
        let issued = self
            .issue_identity_token(request, TokenKind::HaloXsts)
            .await?;

        let created = repo
            .create(issued.token, issued.uhs, issued.issue_instant, issued.not_after)
            .await?;

        Ok(created)
    }

    /// Gets a non-expired spartan bearer token, minting one from the Halo
    /// XSTS token when needed. Issuance success is 201, unlike every other
    /// link.
    pub async fn get_spartan_token(&self) -> Result<entity::spartan_token::Model, AppError> {
        let repo = SpartanTokenRepository::new(self.db);

        if let Some(stored) = repo.latest().await? {
            if stored.expires_utc > Utc::now() {
                return Ok(stored);
            }
        }

        let halo_xsts = self.get_halo_xsts_token().await?;

        let request = ApiRequest::post_json(
            SPARTAN_TOKEN_URL,
            json!({
                "Audience": "urn:343:s3:services",
                "MinVersion": "4",
                "Proof": [{
                    "Token": halo_xsts.token,
                    "TokenType": "Xbox_XSTSv3",
                }],
            }),
        )
        .header("User-Agent", HALO_WAYPOINT_USER_AGENT)
        .header("Accept", "application/json");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|_| TokenError::Unavailable(TokenKind::Spartan))?;

        if response.status != 201 {
            return Err(TokenError::Unavailable(TokenKind::Spartan).into());
        }

        let token = require_str(&response.body, "SpartanToken", TokenKind::Spartan)?;
        let token_duration = require_str(&response.body, "TokenDuration", TokenKind::Spartan)?;
        let expires_raw = response.body["ExpiresUtc"]["ISO8601Date"]
            .as_str()
            .ok_or(TokenError::Unavailable(TokenKind::Spartan))?;
        let expires_utc = parse_token_timestamp(expires_raw, TokenKind::Spartan)?;

        let created = repo.create(token, expires_utc, token_duration).await?;

        Ok(created)
    }

    /// Gets a non-expired clearance token for the configured service account
    /// and the newest known build.
    ///
    /// Clearance expiry is derived locally from `created_at`; the server does
    /// not advertise one. A missing build row fails before any HTTP is
    /// attempted.
    pub async fn get_clearance(&self) -> Result<entity::clearance_token::Model, AppError> {
        let repo = ClearanceTokenRepository::new(self.db);

        if let Some(stored) = repo.latest().await? {
            let expires_at = stored.created_at
                + Duration::seconds(CLEARANCE_TTL_SECONDS - CLEARANCE_SKEW_SECONDS);
            if expires_at > Utc::now() {
                return Ok(stored);
            }
        }

        let build = BuildRepository::new(self.db)
            .newest()
            .await?
            .ok_or(TokenError::Unavailable(TokenKind::Clearance))?;

        let spartan = self.get_spartan_token().await?;

        let url = format!(
            "{}/xuid({})/active?sandbox=UNUSED&build={}",
            FLIGHT_CONFIGURATION_URL, self.settings.clearance_xuid, build.build_id
        );
        let request = ApiRequest::get(url)
            .header("x-343-authorization-spartan", spartan.token)
            .header("User-Agent", HALO_WAYPOINT_USER_AGENT)
            .header("Accept", "application/json");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|_| TokenError::Unavailable(TokenKind::Clearance))?;

        if response.status != 200 {
            return Err(TokenError::Unavailable(TokenKind::Clearance).into());
        }

        let flight_configuration_id =
            require_str(&response.body, "FlightConfigurationId", TokenKind::Clearance)?;

        let created = repo.create(flight_configuration_id).await?;

        Ok(created)
    }

    /// Sends an identity-provider request and parses the shared response
    /// shape of the user-authenticate and xsts-authorize endpoints.
    async fn issue_identity_token(
        &self,
        request: ApiRequest,
        kind: TokenKind,
    ) -> Result<IssuedIdentityToken, AppError> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|_| TokenError::Unavailable(kind))?;

        if response.status != 200 {
            return Err(TokenError::Unavailable(kind).into());
        }

        let token = require_str(&response.body, "Token", kind)?;
        let issue_instant_raw = require_str(&response.body, "IssueInstant", kind)?;
        let not_after_raw = require_str(&response.body, "NotAfter", kind)?;
        let uhs = response.body["DisplayClaims"]["xui"][0]["uhs"]
            .as_str()
            .ok_or(TokenError::Unavailable(kind))?
            .to_string();

        Ok(IssuedIdentityToken {
            token,
            uhs,
            issue_instant: parse_token_timestamp(&issue_instant_raw, kind)?,
            not_after: parse_token_timestamp(&not_after_raw, kind)?,
        })
    }
}

struct IssuedIdentityToken {
    token: String,
    uhs: String,
    issue_instant: DateTime<Utc>,
    not_after: DateTime<Utc>,
}

fn xsts_authorize_request(user_token: &str, relying_party: &str) -> ApiRequest {
    ApiRequest::post_json(
        XSTS_AUTHORIZE_URL,
        json!({
            "Properties": {
                "SandboxId": "RETAIL",
                "UserTokens": [user_token],
            },
            "RelyingParty": relying_party,
            "TokenType": "JWT",
        }),
    )
    .header("User-Agent", HALO_WAYPOINT_USER_AGENT)
    .header("Accept", "application/json")
}

fn require_str(body: &Value, field: &str, kind: TokenKind) -> Result<String, AppError> {
    body[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| TokenError::Unavailable(kind).into())
}

fn parse_token_timestamp(raw: &str, kind: TokenKind) -> Result<DateTime<Utc>, AppError> {
    parse_upstream_timestamp(raw).map_err(|_| TokenError::Unavailable(kind).into())
}
