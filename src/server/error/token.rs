use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// The kinds of credential the token chain produces, in chain order.
///
/// Each kind is issued from a currently-valid token of the preceding kind;
/// the OAuth pair at the head of the chain is obtained out of band through
/// the user-mediated authorization flow and only refreshed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OAuth,
    UserToken,
    Xsts,
    HaloXsts,
    Spartan,
    Clearance,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::OAuth => "OAuth",
            Self::UserToken => "user",
            Self::Xsts => "XSTS",
            Self::HaloXsts => "Halo XSTS",
            Self::Spartan => "spartan",
            Self::Clearance => "clearance",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    /// The chain manager could not produce a valid token of the named kind.
    ///
    /// Raised when the issuance call for this kind (or any preceding link of
    /// the chain) does not succeed. Never retried internally; callers should
    /// abandon the upstream request. Results in a 502 Bad Gateway response
    /// with a generic message.
    #[error("could not obtain a valid {0} token")]
    Unavailable(TokenKind),
}

/// Converts token chain errors into HTTP responses.
///
/// The failed kind is logged server-side; the client only learns that the
/// upstream service is unavailable.
impl IntoResponse for TokenError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorDto {
                error: "Upstream service is unavailable".to_string(),
            }),
        )
            .into_response()
    }
}
