use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Exchanging the OAuth authorization code for a token pair failed.
    ///
    /// The authorization code was rejected by the OAuth provider, either
    /// because it expired, was already used, or the client credentials are
    /// wrong. Results in a 400 Bad Request response.
    #[error("OAuth code exchange failed: {0}")]
    CodeExchangeFailed(String),
}

/// Converts authorization errors into HTTP responses.
///
/// The full error is logged for diagnostics while the client-facing message
/// stays generic to avoid leaking provider details.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::CodeExchangeFailed(msg) => {
                tracing::debug!("OAuth code exchange failed: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "There was an issue completing the sign-in, please try again."
                            .to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
