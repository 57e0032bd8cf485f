//! Core data models for the LB Sports proxy
//!
//! This module contains the domain types shared across the proxy layer:
//! players and partners as the dashboard consumes them, the filter set
//! applied to player lists, and the stats snapshot used for availability
//! checks.

pub mod filters;
pub mod mock;
pub mod partners;
pub mod players;
pub mod stats;
pub mod transform;

pub use filters::apply_filters;
pub use partners::PartnerClient;
pub use players::PlayerClient;
pub use stats::StatsClient;
pub use transform::{parse_market_value, transform_player, transform_players};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A player as consumed by the dashboard
///
/// Flattened from the upstream document shape (nested `position.main`,
/// string-or-object `club`, `citizenship` arrays) by
/// [`transform::transform_player`]. Serialized in camelCase so the JSON
/// matches what the upstream and the dashboard already exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Player {
    /// Transfermarkt identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Full legal name, when the upstream provides one
    pub full_name: Option<String>,
    /// Age in years
    pub age: Option<u8>,
    /// Main position (e.g. "Right Winger")
    pub position: String,
    /// Secondary positions
    pub other_positions: Vec<String>,
    /// Citizenships in upstream order
    pub citizenship: Vec<String>,
    /// Primary nationality, used for sorting and filtering
    pub nationality: String,
    /// Current club name
    pub club: Option<String>,
    /// Market value as formatted by the upstream (e.g. "€2.00m")
    pub market_value: Option<String>,
    /// Market value parsed to euros, for sorting and range filters
    pub market_value_number: Option<f64>,
    /// Portrait image URL
    pub image_url: Option<String>,
    /// Whether the player is managed by LB
    pub is_lb_player: bool,
    /// Contract expiry date as reported by the upstream
    pub contract_expires: Option<String>,
    /// Date of birth as reported by the upstream
    pub date_of_birth: Option<String>,
    /// Preferred foot
    pub foot: Option<String>,
    /// Height as formatted by the upstream (e.g. "1,84m")
    pub height: Option<String>,
    /// Shirt number
    pub shirt_number: Option<String>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: "Unknown".to_string(),
            full_name: None,
            age: None,
            position: "Unknown".to_string(),
            other_positions: Vec::new(),
            citizenship: Vec::new(),
            nationality: "Unknown".to_string(),
            club: None,
            market_value: None,
            market_value_number: None,
            image_url: None,
            is_lb_player: false,
            contract_expires: None,
            date_of_birth: None,
            foot: None,
            height: None,
            shirt_number: None,
        }
    }
}

/// A registered partner (agent or agency)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// Backend identifier
    pub id: String,
    /// Partner name
    pub name: String,
    /// Transfermarkt agency URL, if any
    #[serde(default)]
    pub transfermarkt_url: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for registering a new partner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPartner {
    pub name: String,
    pub transfermarkt_url: Option<String>,
    pub notes: Option<String>,
}

/// Payload for registering a new player
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    /// Transfermarkt identifier extracted from the profile URL
    pub transfermarkt_id: String,
    pub youtube_url: Option<String>,
    pub notes: Option<String>,
    pub partner_id: Option<String>,
}

/// Filters applied to a player list
///
/// String filters are case-insensitive substring matches except `position`,
/// which is an exact match; range filters exclude players lacking the
/// filtered attribute.
#[derive(Debug, Clone, Default)]
pub struct PlayerFilters {
    pub name: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub club: Option<String>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    /// Minimum market value in euros
    pub min_value: Option<f64>,
    /// Maximum market value in euros
    pub max_value: Option<f64>,
    /// Restrict to LB-managed players
    pub lb_only: bool,
}

/// Cache statistics as reported by the upstream, with the fetch timestamp
///
/// The upstream schema (an array of per-collection stats) is accepted as
/// given and carried through untyped.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
    /// Raw per-collection statistics from the upstream
    pub collections: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_player_serializes_camel_case() {
        let player = Player {
            id: "193925".to_string(),
            name: "Romarinho".to_string(),
            is_lb_player: true,
            market_value: Some("€2.00m".to_string()),
            market_value_number: Some(2_000_000.0),
            ..Player::default()
        };

        let value = serde_json::to_value(&player).expect("serialize");
        assert_eq!(value["id"], "193925");
        assert_eq!(value["isLbPlayer"], true);
        assert_eq!(value["marketValue"], "€2.00m");
        assert_eq!(value["marketValueNumber"], 2_000_000.0);
    }

    #[test]
    fn test_player_roundtrip() {
        let player = Player {
            id: "42".to_string(),
            name: "Farley Rosa".to_string(),
            age: Some(31),
            position: "Left Winger".to_string(),
            citizenship: vec!["Brazil".to_string(), "Portugal".to_string()],
            nationality: "Brazil".to_string(),
            club: Some("FC Porto".to_string()),
            ..Player::default()
        };

        let json = serde_json::to_string(&player).expect("serialize");
        let back: Player = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, player);
    }

    #[test]
    fn test_partner_deserializes_without_optional_fields() {
        let partner: Partner =
            serde_json::from_value(json!({"id": "p1", "name": "Acme Sports"})).expect("deserialize");
        assert_eq!(partner.id, "p1");
        assert_eq!(partner.name, "Acme Sports");
        assert!(partner.transfermarkt_url.is_none());
        assert!(partner.notes.is_none());
    }

    #[test]
    fn test_new_player_serializes_explicit_nulls() {
        let payload = NewPlayer {
            transfermarkt_id: "323704".to_string(),
            youtube_url: None,
            notes: None,
            partner_id: Some("p1".to_string()),
        };

        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["transfermarktId"], "323704");
        assert!(value["youtubeUrl"].is_null());
        assert_eq!(value["partnerId"], "p1");
    }
}
