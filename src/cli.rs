//! Command-line interface parsing for the LB Sports proxy
//!
//! This module handles parsing of CLI arguments using clap: one subcommand
//! per upstream resource, plus global flags that override the proxy
//! configuration.

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::ProxyConfig;
use crate::data::PlayerFilters;

/// Query the LB Sports data backend with response caching and throttling
#[derive(Parser, Debug)]
#[command(name = "lbproxy")]
#[command(about = "LB Sports player/partner data with caching and request throttling")]
#[command(version)]
pub struct Cli {
    /// Upstream base URL (overrides LBPROXY_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Fail on upstream errors instead of substituting mock data
    #[arg(long, global = true)]
    pub no_fallback: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List players, optionally filtered
    Players {
        /// Partial name match (case-insensitive)
        #[arg(long)]
        name: Option<String>,
        /// Exact main position, e.g. "Right Winger"
        #[arg(long)]
        position: Option<String>,
        /// Partial nationality match
        #[arg(long)]
        nationality: Option<String>,
        /// Partial club name match
        #[arg(long)]
        club: Option<String>,
        /// Minimum age
        #[arg(long)]
        min_age: Option<u8>,
        /// Maximum age
        #[arg(long)]
        max_age: Option<u8>,
        /// Minimum market value in euros
        #[arg(long)]
        min_value: Option<f64>,
        /// Maximum market value in euros
        #[arg(long)]
        max_value: Option<f64>,
        /// Only LB-managed players
        #[arg(long)]
        lb_only: bool,
    },
    /// Show a single player by Transfermarkt id
    Player { id: String },
    /// Fetch a live scraped profile by Transfermarkt id or profile URL
    Profile {
        #[arg(value_name = "ID_OR_URL")]
        target: String,
    },
    /// List registered partners
    Partners,
    /// Register a new partner
    RegisterPartner {
        #[arg(long)]
        name: String,
        #[arg(long)]
        transfermarkt_url: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show upstream cache statistics
    Stats,
}

impl Cli {
    /// Builds the proxy configuration from environment defaults plus the
    /// global CLI overrides
    pub fn to_config(&self) -> ProxyConfig {
        let mut config = ProxyConfig::from_env();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_request_timeout(Duration::from_secs(timeout));
        }
        if self.no_fallback {
            config = config.with_mock_fallback(false);
        }
        config
    }
}

impl Command {
    /// Player filters carried by the `players` subcommand, if this is one
    pub fn player_filters(&self) -> Option<PlayerFilters> {
        match self {
            Command::Players {
                name,
                position,
                nationality,
                club,
                min_age,
                max_age,
                min_value,
                max_value,
                lb_only,
            } => Some(PlayerFilters {
                name: name.clone(),
                position: position.clone(),
                nationality: nationality.clone(),
                club: club.clone(),
                min_age: *min_age,
                max_age: *max_age,
                min_value: *min_value,
                max_value: *max_value,
                lb_only: *lb_only,
            }),
            _ => None,
        }
    }
}
