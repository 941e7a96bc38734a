//! Shared fakes and canned upstream bodies for token chain and fan-out tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use crate::server::service::halo::chain::ChainSettings;
use crate::server::service::halo::transport::{
    ApiRequest, ApiResponse, Transport, TransportError,
};

/// Transport fake that records every request and replays queued responses in
/// order. Panics (failing the test) when a request arrives with nothing
/// queued, which catches unexpected extra HTTP calls.
pub struct FakeTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse { status, body });
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("request sent with no queued response");
        Ok(response)
    }
}

pub fn chain_settings() -> ChainSettings {
    ChainSettings {
        live_client_id: "test-client-id".to_string(),
        live_client_secret: "test-client-secret".to_string(),
        live_token_url: "https://login.live.com/oauth20_token.srf".to_string(),
        clearance_xuid: "2533274870001169".to_string(),
    }
}

/// Formats a timestamp the way the identity providers do: second precision
/// plus a 7-digit fractional part chrono cannot parse directly.
pub fn upstream_timestamp(at: DateTime<Utc>) -> String {
    format!("{}.2341211Z", at.format("%Y-%m-%dT%H:%M:%S"))
}

pub fn oauth_refresh_body() -> Value {
    json!({
        "token_type": "bearer",
        "access_token": "fresh-access",
        "refresh_token": "fresh-refresh",
        "expires_in": 3600,
        "scope": "Xboxlive.signin Xboxlive.offline_access",
        "user_id": "live-user",
    })
}

pub fn identity_body(token: &str) -> Value {
    json!({
        "Token": token,
        "IssueInstant": upstream_timestamp(Utc::now()),
        "NotAfter": upstream_timestamp(Utc::now() + Duration::hours(8)),
        "DisplayClaims": { "xui": [{ "uhs": "user-hash" }] },
    })
}

pub fn spartan_body() -> Value {
    json!({
        "SpartanToken": "spartan-token-value",
        "ExpiresUtc": { "ISO8601Date": upstream_timestamp(Utc::now() + Duration::hours(4)) },
        "TokenDuration": "04:00:00",
    })
}

pub fn clearance_body() -> Value {
    json!({ "FlightConfigurationId": "flight-xyz" })
}
