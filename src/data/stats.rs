//! Cache statistics client and upstream availability probe

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::StatsSnapshot;
use crate::proxy::{ProxyError, ProxyService, Upstream};

/// Cache key for the upstream stats document
pub const STATS_CACHE_KEY: &str = "cache_stats";

/// Client for the upstream's cache statistics endpoint
pub struct StatsClient<'a, U> {
    proxy: &'a ProxyService<U>,
}

impl<'a, U: Upstream> StatsClient<'a, U> {
    pub fn new(proxy: &'a ProxyService<U>) -> Self {
        Self { proxy }
    }

    /// Fetches the upstream's per-collection statistics
    pub async fn get_stats(&self) -> Result<StatsSnapshot, ProxyError> {
        let collections = self.proxy.fetch_cached(STATS_CACHE_KEY, "cache/stats").await?;
        Ok(StatsSnapshot {
            fetched_at: Utc::now(),
            collections,
        })
    }

    /// Whether the upstream looks reachable and populated
    ///
    /// The stats endpoint doubles as the availability probe: a non-empty
    /// stats array (or the legacy `{"status": "ok"}` shape) counts as
    /// available; any failure counts as unavailable.
    pub async fn check_availability(&self) -> bool {
        match self.get_stats().await {
            Ok(snapshot) => stats_look_available(&snapshot.collections),
            Err(err) => {
                debug!(error = %err, "availability check failed");
                false
            }
        }
    }
}

fn stats_look_available(stats: &Value) -> bool {
    if stats.as_array().is_some_and(|arr| !arr.is_empty()) {
        return true;
    }
    // Legacy shape from older upstream versions.
    stats.get("status").and_then(Value::as_str) == Some("ok")
}
