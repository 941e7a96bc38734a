use oauth2::{AuthorizationCode, TokenResponse};

use crate::server::{
    data::oauth_token::{CreateOAuthTokenParam, OAuthTokenRepository},
    error::{auth::AuthError, AppError},
    service::oauth::LiveAuthService,
};

impl<'a> LiveAuthService<'a> {
    /// Exchanges an authorization code for a token pair and persists it.
    ///
    /// # Returns
    /// - `Ok(Model)`: The stored OAuth token row
    /// - `Err(AppError)`: Code exchange failed or the row could not be stored
    pub async fn callback(
        &self,
        authorization_code: String,
    ) -> Result<entity::oauth_token::Model, AppError> {
        let repo = OAuthTokenRepository::new(self.db);

        let auth_code = AuthorizationCode::new(authorization_code);

        let token = self
            .oauth_client
            .exchange_code(auth_code)
            .request_async(self.http_client)
            .await
            .map_err(|err| AuthError::CodeExchangeFailed(err.to_string()))?;

        let refresh_token = token
            .refresh_token()
            .ok_or_else(|| {
                AuthError::CodeExchangeFailed("response carried no refresh token".to_string())
            })?
            .secret()
            .clone();

        let expires_in = token
            .expires_in()
            .map(|duration| duration.as_secs() as i64)
            .unwrap_or(3600);

        let scope = token
            .scopes()
            .map(|scopes| {
                scopes
                    .iter()
                    .map(|scope| scope.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        let user_id = token.extra_fields().user_id.clone().unwrap_or_default();

        let stored = repo
            .create(CreateOAuthTokenParam {
                token_type: "bearer".to_string(),
                access_token: token.access_token().secret().clone(),
                refresh_token,
                expires_in,
                user_id,
                scope,
                created_by: None,
            })
            .await?;

        Ok(stored)
    }
}
