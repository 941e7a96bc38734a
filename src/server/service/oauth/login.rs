use oauth2::{CsrfToken, Scope};
use url::Url;

use crate::server::service::oauth::LiveAuthService;

impl<'a> LiveAuthService<'a> {
    /// Builds the Live sign-in URL with the Xbox Live scopes.
    ///
    /// `Xboxlive.offline_access` is what yields a refresh token, which the
    /// chain manager depends on for non-interactive renewal.
    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("Xboxlive.signin".to_string()))
            .add_scope(Scope::new("Xboxlive.offline_access".to_string()))
            .url();

        (authorize_url, csrf_state)
    }
}
