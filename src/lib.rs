//! LB Sports proxy library
//!
//! A cached, rate-limited client layer over the LB Sports data backend:
//! an in-memory TTL cache, a minimum-interval rate limiter, and per-resource
//! clients (players, partners, cache stats) sharing one proxy orchestration.
//! When the backend is unreachable, fetches can fall back to a fixed mock
//! dataset so the dashboard keeps rendering.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod proxy;
pub mod throttle;
