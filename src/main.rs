//! LB Sports proxy CLI - query player and partner data
//!
//! A command-line front end over the proxy library: fetches players,
//! partners and cache statistics from the LB Sports backend with response
//! caching, request throttling and optional mock fallback, and prints the
//! results as JSON.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lbproxy::cli::{Cli, Command};
use lbproxy::data::mock::StaticMockData;
use lbproxy::data::players::extract_player_id;
use lbproxy::data::{NewPartner, PartnerClient, PlayerClient, StatsClient};
use lbproxy::proxy::{HttpUpstream, ProxyService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.to_config();
    let upstream = HttpUpstream::new(&config)?;
    let proxy = ProxyService::new(&config, upstream, Arc::new(StaticMockData::new()));

    match &cli.command {
        Command::Players { .. } => {
            let filters = cli
                .command
                .player_filters()
                .unwrap_or_default();
            let players = PlayerClient::new(&proxy).get_players(&filters).await?;
            println!("{}", serde_json::to_string_pretty(&players)?);
        }
        Command::Player { id } => match PlayerClient::new(&proxy).get_player(id).await? {
            Some(player) => println!("{}", serde_json::to_string_pretty(&player)?),
            None => return Err(format!("player {id} not found").into()),
        },
        Command::Profile { target } => {
            let id = if target.chars().all(|c| c.is_ascii_digit()) {
                target.clone()
            } else {
                extract_player_id(target)
                    .ok_or_else(|| format!("no player id found in '{target}'"))?
            };
            let profile = PlayerClient::new(&proxy).get_profile(&id).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Partners => {
            let partners = PartnerClient::new(&proxy).get_partners().await?;
            println!("{}", serde_json::to_string_pretty(&partners)?);
        }
        Command::RegisterPartner {
            name,
            transfermarkt_url,
            notes,
        } => {
            let payload = NewPartner {
                name: name.clone(),
                transfermarkt_url: transfermarkt_url.clone(),
                notes: notes.clone(),
            };
            let partner = PartnerClient::new(&proxy).register_partner(&payload).await?;
            println!("{}", serde_json::to_string_pretty(&partner)?);
        }
        Command::Stats => {
            let snapshot = StatsClient::new(&proxy).get_stats().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
