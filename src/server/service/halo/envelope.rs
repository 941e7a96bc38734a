//! Authenticated request envelope for the Waypoint data endpoints.
//!
//! Auth failures are loud and data failures are quiet: the token chain raises
//! when a credential cannot be produced, but once the request is dispatched a
//! non-200 status (or a transport failure) collapses to an empty JSON object.
//! The consuming layers depend on that soft-fail; transient upstream outages
//! are common and are surfaced as empty domain results.

use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::server::error::AppError;

use super::chain::{ChainSettings, TokenChainService};
use super::transport::{ApiRequest, Transport};
use super::HALO_WAYPOINT_USER_AGENT;

pub struct ApiEnvelope<'a> {
    transport: &'a dyn Transport,
    chain: TokenChainService<'a>,
}

impl<'a> ApiEnvelope<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        transport: &'a dyn Transport,
        settings: &'a ChainSettings,
    ) -> Self {
        Self {
            transport,
            chain: TokenChainService::new(db, transport, settings),
        }
    }

    /// Dispatches an authenticated GET against a data endpoint.
    ///
    /// Attaches the spartan bearer to `x-343-authorization-spartan` and the
    /// clearance flight id to `343-clearance` as requested. No retries, no
    /// body interpretation.
    ///
    /// # Returns
    /// - `Ok(Value)`: The parsed 200 body, or `{}` on any non-200 status or
    ///   transport failure
    /// - `Err(AppError)`: A required token could not be produced
    pub async fn get(
        &self,
        url: &str,
        use_bearer: bool,
        use_clearance: bool,
    ) -> Result<Value, AppError> {
        let mut request = ApiRequest::get(url)
            .header("User-Agent", HALO_WAYPOINT_USER_AGENT)
            .header("Accept", "application/json");

        if use_bearer {
            let spartan = self.chain.get_spartan_token().await?;
            request = request.header("x-343-authorization-spartan", spartan.token);
        }

        if use_clearance {
            let clearance = self.chain.get_clearance().await?;
            request = request.header("343-clearance", clearance.flight_configuration_id);
        }

        match self.transport.send(request).await {
            Ok(response) if response.status == 200 => Ok(response.body),
            Ok(response) => {
                tracing::debug!(url, status = response.status, "upstream returned non-200");
                Ok(json!({}))
            }
            Err(err) => {
                tracing::debug!(url, error = %err, "upstream request failed");
                Ok(json!({}))
            }
        }
    }
}
