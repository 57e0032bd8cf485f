//! Player resource client
//!
//! Wraps the shared proxy with the player endpoints: the cached collection
//! list, single cached documents, live profile lookups, registration and
//! deletion.

use serde_json::Value;
use tracing::info;

use super::{apply_filters, transform_player, transform_players, NewPlayer, Player, PlayerFilters};
use crate::proxy::{ProxyError, ProxyService, Upstream};

/// Cache key for the full player collection
pub const PLAYERS_CACHE_KEY: &str = "cache_players";

/// Prefix for single-player cache keys
pub const PLAYER_KEY_PREFIX: &str = "cache_player_";

/// Cache key for a single player document
pub fn player_cache_key(id: &str) -> String {
    format!("{PLAYER_KEY_PREFIX}{id}")
}

/// Extracts a Transfermarkt player id from a profile URL
///
/// Handles the URL formats Transfermarkt uses:
/// `/name/profil/spieler/{id}`, `/player/{id}`, and a bare trailing
/// numeric id.
pub fn extract_player_id(url: &str) -> Option<String> {
    for marker in ["/spieler/", "/player/"] {
        if let Some(rest) = url.split(marker).nth(1) {
            let id: String = rest.chars().take_while(char::is_ascii_digit).collect();
            if !id.is_empty() {
                return Some(id);
            }
        }
    }

    // Fall back to a numeric id in the last path segment.
    let trimmed = url.split(['?', '#']).next().unwrap_or(url);
    let last = trimmed.trim_end_matches('/').rsplit('/').next()?;
    if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
        return Some(last.to_string());
    }
    None
}

/// Client for the player endpoints of the upstream API
pub struct PlayerClient<'a, U> {
    proxy: &'a ProxyService<U>,
}

impl<'a, U: Upstream> PlayerClient<'a, U> {
    pub fn new(proxy: &'a ProxyService<U>) -> Self {
        Self { proxy }
    }

    /// Fetches the player collection and applies `filters` locally
    ///
    /// The collection is served from the cache within the TTL window;
    /// filtering always runs client-side on the transformed players.
    pub async fn get_players(&self, filters: &PlayerFilters) -> Result<Vec<Player>, ProxyError> {
        let data = self
            .proxy
            .fetch_cached(PLAYERS_CACHE_KEY, "cache/players")
            .await?;
        let players = transform_players(&data);
        info!(count = players.len(), "transformed players from upstream response");
        Ok(apply_filters(&players, filters))
    }

    /// Fetches a single player document by Transfermarkt id
    ///
    /// Returns `Ok(None)` when the upstream reports the player missing.
    pub async fn get_player(&self, id: &str) -> Result<Option<Player>, ProxyError> {
        let path = format!("cache/player/{id}");
        match self.proxy.fetch_cached(&player_cache_key(id), &path).await {
            Ok(data) => match transform_player(&data) {
                Some(player) => Ok(Some(player)),
                None => Err(ProxyError::Malformed(format!(
                    "player document for id {id} has no usable identifier"
                ))),
            },
            Err(ProxyError::Http(404)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Fetches a live scraped profile, bypassing the cache
    ///
    /// The profile endpoint is served no-store by the upstream; the result
    /// feeds registration forms and must be current.
    pub async fn get_profile(&self, id: &str) -> Result<Player, ProxyError> {
        let path = format!("players/{id}/profile");
        let data = self.proxy.fetch_direct(&player_cache_key(id), &path).await?;
        transform_player(&data).ok_or_else(|| {
            ProxyError::Malformed(format!("profile for id {id} has no usable identifier"))
        })
    }

    /// Registers a new player; the cache is cleared on success
    pub async fn register_player(&self, payload: &NewPlayer) -> Result<Value, ProxyError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| ProxyError::Malformed(err.to_string()))?;
        self.proxy.post("players", &body).await
    }

    /// Deletes a player; the cache is cleared on success so the next list
    /// read re-populates
    pub async fn delete_player(&self, id: &str) -> Result<(), ProxyError> {
        let path = format!("players/{id}");
        self.proxy.delete(&path).await?;
        Ok(())
    }
}
