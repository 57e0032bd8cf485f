//! In-memory TTL cache for upstream API responses
//!
//! Provides an `ApiCache` that stores JSON responses with per-entry expiry
//! timestamps. Expired entries are removed lazily when they are next read.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::DEFAULT_TTL;

/// A single cached response with its expiry timestamp
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached response body
    data: Value,
    /// When the entry stops being served
    expires_at: Instant,
}

/// Process-wide in-memory cache keyed by resource name
///
/// One instance is constructed at startup and shared by reference across all
/// request paths; interior mutability makes `get`/`set` callable through a
/// shared handle. Size is unbounded and there is no eviction beyond TTL
/// expiry on access, which matches the small, fixed key space (one key per
/// upstream resource) this cache serves.
///
/// Uses `tokio::time::Instant` so expiry can be exercised under a paused
/// test clock.
#[derive(Debug)]
pub struct ApiCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

impl Default for ApiCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiCache {
    /// Creates an empty cache with the default 5-minute TTL
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    /// Creates an empty cache with a custom default TTL
    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Returns the cached value for `key` if present and unexpired
    ///
    /// An expired entry is removed and `None` is returned. A plain miss has
    /// no side effects.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if Instant::now() > entry.expires_at => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.data.clone()),
            None => None,
        }
    }

    /// Stores `data` under `key` with the default TTL, overwriting any
    /// existing entry
    pub fn set(&self, key: &str, data: Value) {
        self.set_with_ttl(key, data, self.default_ttl);
    }

    /// Stores `data` under `key` with an explicit TTL, overwriting any
    /// existing entry
    pub fn set_with_ttl(&self, key: &str, data: Value, ttl: Duration) {
        let entry = CacheEntry {
            data,
            expires_at: Instant::now() + ttl,
        };
        self.lock().insert(key.to_string(), entry);
    }

    /// Empties the entire cache
    ///
    /// Called after an upstream mutation (e.g. a delete or a registration)
    /// so the next read re-populates from the backend.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries currently stored, including any not yet evicted
    /// expired entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Locks the entry map, recovering from a poisoned lock
    ///
    /// Entries are plain data, so a panic in another thread cannot leave the
    /// map in a half-written state worth rejecting.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
