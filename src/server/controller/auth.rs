use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::server::{error::AppError, service::oauth::LiveAuthService, state::AppState};

/// Query parameters for the OAuth callback endpoint.
///
/// # Fields
/// - `state` - CSRF token echoed by the provider; logged for out-of-band verification
/// - `code` - Authorization code used to exchange for access tokens
#[derive(Deserialize)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

/// Starts the Live sign-in flow for the service account.
///
/// This is an operator-only flow run once to seed the OAuth token table; the
/// CSRF state is logged so the operator can verify it against the callback.
pub async fn login(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let auth_service = LiveAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    let (url, csrf_token) = auth_service.login_url();

    tracing::info!(state = %csrf_token.secret(), "issued Live sign-in URL");

    Ok(Redirect::temporary(url.as_ref()))
}

/// Completes the Live sign-in flow and stores the resulting token pair.
///
/// The token values are never echoed back; the chain manager picks the new
/// row up on its next read.
pub async fn callback(
    State(state): State<AppState>,
    params: Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = LiveAuthService::new(&state.db, &state.http_client, &state.oauth_client);

    tracing::info!(state = %params.state, "Live sign-in callback received");

    let stored = auth_service.callback(params.0.code).await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "status": "authorized", "token_id": stored.id })),
    ))
}
