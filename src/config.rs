//! Configuration for the upstream proxy layer
//!
//! Centralizes the plain configuration values the proxy depends on: the
//! upstream base URL, request timeout, cache TTL, minimum inter-request
//! interval and the mock-fallback toggle.

use std::time::Duration;

/// Default upstream base URL (the local scraping/caching backend)
pub const DEFAULT_BASE_URL: &str = "http://localhost:7771/api";

/// Environment variable overriding the upstream base URL
pub const ENV_BASE_URL: &str = "LBPROXY_BASE_URL";

/// Environment variable disabling mock fallback when set to "false"
pub const ENV_USE_MOCK_FALLBACK: &str = "LBPROXY_USE_MOCK_FALLBACK";

/// Configuration values for the proxy layer
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the upstream data provider
    pub base_url: String,
    /// Bounded timeout for each upstream request
    pub request_timeout: Duration,
    /// Default time-to-live for cached responses
    pub cache_ttl: Duration,
    /// Minimum spacing between consecutive outbound requests
    pub min_request_interval: Duration,
    /// Whether upstream failures are substituted with the mock dataset
    pub use_mock_fallback: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(5),
            cache_ttl: crate::cache::DEFAULT_TTL,
            min_request_interval: crate::throttle::DEFAULT_MIN_INTERVAL,
            use_mock_fallback: true,
        }
    }
}

impl ProxyConfig {
    /// Creates a configuration from defaults plus environment overrides
    ///
    /// `LBPROXY_BASE_URL` replaces the upstream base URL;
    /// `LBPROXY_USE_MOCK_FALLBACK=false` disables mock substitution.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(flag) = std::env::var(ENV_USE_MOCK_FALLBACK) {
            config.use_mock_fallback = flag != "false";
        }
        config
    }

    /// Replaces the upstream base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replaces the default cache TTL
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Replaces the minimum inter-request interval
    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    /// Enables or disables mock-data substitution on upstream failure
    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.use_mock_fallback = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_values() {
        let config = ProxyConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.min_request_interval, Duration::from_secs(1));
        assert!(config.use_mock_fallback);
    }

    #[test]
    fn test_builder_setters() {
        let config = ProxyConfig::default()
            .with_base_url("http://backend:9000/api")
            .with_request_timeout(Duration::from_secs(10))
            .with_cache_ttl(Duration::from_secs(60))
            .with_min_request_interval(Duration::from_millis(250))
            .with_mock_fallback(false);

        assert_eq!(config.base_url, "http://backend:9000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.min_request_interval, Duration::from_millis(250));
        assert!(!config.use_mock_fallback);
    }
}
