//! In-memory cache for API responses
//!
//! This module provides a process-wide TTL cache for upstream API responses.
//! Entries expire after a configurable time-to-live and are evicted lazily
//! on access. The cache is a single-process optimization, not a distributed
//! cache: it lives exactly as long as the process does.

mod memory;

pub use memory::ApiCache;

/// Default time-to-live for cache entries (5 minutes)
pub const DEFAULT_TTL: std::time::Duration = std::time::Duration::from_secs(5 * 60);
