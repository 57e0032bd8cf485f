//! Cached, rate-limited proxy to the upstream data provider
//!
//! Every logical resource fetch goes through the same orchestration: check
//! the in-memory cache, and on a miss wait out the rate limiter, call the
//! upstream HTTP API, store the response in the cache and return it. On any
//! upstream failure the error is classified, logged and either surfaced as a
//! typed [`ProxyError`] or substituted with the configured fallback dataset.
//! Failures are never retried automatically.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::ApiCache;
use crate::config::ProxyConfig;
use crate::data::mock::FallbackProvider;
use crate::throttle::RateLimiter;

/// Errors surfaced by the proxy boundary
///
/// All upstream failures are classified into one of these variants before
/// they reach a caller; nothing from the HTTP layer propagates unclassified.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream request exceeded the bounded timeout
    #[error("upstream request timed out")]
    Timeout,

    /// The upstream answered with a non-2xx status
    #[error("upstream returned HTTP {0}")]
    Http(u16),

    /// The upstream could not be reached at all
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    /// The upstream response body could not be parsed or transformed
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl ProxyError {
    /// HTTP status a server embedding this proxy would mirror to its own
    /// clients for this failure
    pub fn status(&self) -> u16 {
        match self {
            ProxyError::Timeout => 504,
            ProxyError::Http(status) => *status,
            ProxyError::Unreachable(_) => 502,
            ProxyError::Malformed(_) => 502,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else if let Some(status) = err.status() {
            ProxyError::Http(status.as_u16())
        } else if err.is_decode() {
            ProxyError::Malformed(err.to_string())
        } else {
            ProxyError::Unreachable(err.to_string())
        }
    }
}

/// The upstream HTTP collaborator the proxy calls on a cache miss
///
/// Injected so tests can count calls and stage failures without a network.
#[allow(async_fn_in_trait)]
pub trait Upstream {
    /// Issues a GET for `path` (relative to the upstream base URL) and
    /// returns the parsed JSON body
    async fn get(&self, path: &str) -> Result<Value, ProxyError>;

    /// Issues a POST with a JSON `body` and returns the parsed JSON response
    async fn post(&self, path: &str, body: &Value) -> Result<Value, ProxyError>;

    /// Issues a DELETE and returns the parsed JSON response
    async fn delete(&self, path: &str) -> Result<Value, ProxyError>;
}

/// Production [`Upstream`] over a `reqwest` client with a bounded timeout
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: String,
}

impl HttpUpstream {
    /// Creates an upstream client for the configured base URL and timeout
    pub fn new(config: &ProxyConfig) -> Result<Self, ProxyError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(ProxyError::from)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Maps a response to JSON, classifying non-2xx statuses as failures
    async fn into_json(response: reqwest::Response) -> Result<Value, ProxyError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::Http(status.as_u16()));
        }
        response
            .json::<Value>()
            .await
            .map_err(|err| ProxyError::Malformed(err.to_string()))
    }
}

impl Upstream for HttpUpstream {
    async fn get(&self, path: &str) -> Result<Value, ProxyError> {
        let url = self.url(path);
        debug!(%url, "GET upstream");
        let response = self.client.get(&url).send().await.map_err(ProxyError::from)?;
        Self::into_json(response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ProxyError> {
        let url = self.url(path);
        debug!(%url, "POST upstream");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ProxyError::from)?;
        Self::into_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ProxyError> {
        let url = self.url(path);
        debug!(%url, "DELETE upstream");
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ProxyError::from)?;
        Self::into_json(response).await
    }
}

/// Orchestrates cache, rate limiter and upstream for every resource fetch
///
/// Constructed once at startup and shared by reference with every resource
/// client. The cache and limiter are plain shared state; concurrent misses
/// on the same key may both reach upstream, which is duplicate work but not
/// corruption since cache writes are last-write-wins.
pub struct ProxyService<U> {
    upstream: U,
    cache: Arc<ApiCache>,
    limiter: Arc<RateLimiter>,
    fallback: Arc<dyn FallbackProvider>,
    use_fallback: bool,
}

impl<U: Upstream> ProxyService<U> {
    /// Creates a service with a fresh cache and limiter from `config`
    pub fn new(config: &ProxyConfig, upstream: U, fallback: Arc<dyn FallbackProvider>) -> Self {
        Self {
            upstream,
            cache: Arc::new(ApiCache::with_default_ttl(config.cache_ttl)),
            limiter: Arc::new(RateLimiter::new(config.min_request_interval)),
            fallback,
            use_fallback: config.use_mock_fallback,
        }
    }

    /// Creates a service around externally owned cache and limiter handles
    ///
    /// Lets several services share one limiter per upstream endpoint
    /// category, and lets tests hold their own handle on the cache.
    pub fn with_components(
        upstream: U,
        cache: Arc<ApiCache>,
        limiter: Arc<RateLimiter>,
        fallback: Arc<dyn FallbackProvider>,
        use_fallback: bool,
    ) -> Self {
        Self {
            upstream,
            cache,
            limiter,
            fallback,
            use_fallback,
        }
    }

    /// The shared response cache
    pub fn cache(&self) -> &Arc<ApiCache> {
        &self.cache
    }

    /// Fetches `path` through the cache and rate limiter
    ///
    /// A cache hit returns immediately without touching the limiter or the
    /// upstream. On a miss the limiter is waited out, the upstream is called
    /// once, and a successful response is cached under `cache_key` before
    /// being returned. A failure is logged and resolved via
    /// [`Self::resolve_failure`].
    pub async fn fetch_cached(&self, cache_key: &str, path: &str) -> Result<Value, ProxyError> {
        if let Some(cached) = self.cache.get(cache_key) {
            debug!(cache_key, "returning cached response");
            return Ok(cached);
        }

        self.limiter.throttle().await;

        match self.upstream.get(path).await {
            Ok(data) => {
                self.cache.set(cache_key, data.clone());
                Ok(data)
            }
            Err(err) => self.resolve_failure(cache_key, err),
        }
    }

    /// Fetches `path` directly, bypassing cache and rate limiter
    ///
    /// Used for resources the upstream serves with no-store semantics.
    /// Failures still go through the fallback policy under `fallback_key`.
    pub async fn fetch_direct(&self, fallback_key: &str, path: &str) -> Result<Value, ProxyError> {
        match self.upstream.get(path).await {
            Ok(data) => Ok(data),
            Err(err) => self.resolve_failure(fallback_key, err),
        }
    }

    /// POSTs `body` to `path` and clears the cache on success
    ///
    /// Mutations never substitute mock data; failures surface typed.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ProxyError> {
        let data = self.upstream.post(path, body).await?;
        self.cache.clear();
        info!(path, "upstream mutation succeeded, cache cleared");
        Ok(data)
    }

    /// DELETEs `path` and clears the cache on success
    pub async fn delete(&self, path: &str) -> Result<Value, ProxyError> {
        let data = self.upstream.delete(path).await?;
        self.cache.clear();
        info!(path, "upstream delete succeeded, cache cleared");
        Ok(data)
    }

    /// Resolves an upstream failure into either the fallback dataset for
    /// `key` or the typed error
    fn resolve_failure(&self, key: &str, err: ProxyError) -> Result<Value, ProxyError> {
        warn!(key, error = %err, "upstream request failed");
        if self.use_fallback {
            if let Some(mock) = self.fallback.fallback(key) {
                warn!(key, "substituting mock dataset for failed upstream request");
                return Ok(mock);
            }
        }
        Err(err)
    }
}
