//! Partner resource client
//!
//! Partners are a small collection the upstream serves with no-store
//! semantics, so the list is fetched directly rather than through the TTL
//! cache. Registration is a mutation and clears the shared cache.

use tracing::info;

use super::{NewPartner, Partner};
use crate::proxy::{ProxyError, ProxyService, Upstream};

/// Fallback key for the partner list
pub const PARTNERS_CACHE_KEY: &str = "cache_partners";

/// Client for the partner endpoints of the upstream API
pub struct PartnerClient<'a, U> {
    proxy: &'a ProxyService<U>,
}

impl<'a, U: Upstream> PartnerClient<'a, U> {
    pub fn new(proxy: &'a ProxyService<U>) -> Self {
        Self { proxy }
    }

    /// Fetches the partner list
    pub async fn get_partners(&self) -> Result<Vec<Partner>, ProxyError> {
        let data = self
            .proxy
            .fetch_direct(PARTNERS_CACHE_KEY, "cache/partners")
            .await?;
        serde_json::from_value(data).map_err(|err| ProxyError::Malformed(err.to_string()))
    }

    /// Registers a new partner; the shared cache is cleared on success
    pub async fn register_partner(&self, payload: &NewPartner) -> Result<Partner, ProxyError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ProxyError::Malformed(err.to_string()))?;
        let data = self.proxy.post("partners", &body).await?;
        let partner: Partner =
            serde_json::from_value(data).map_err(|err| ProxyError::Malformed(err.to_string()))?;
        info!(partner_id = %partner.id, "registered partner");
        Ok(partner)
    }
}
