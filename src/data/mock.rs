//! Static fallback datasets for when the upstream is unreachable
//!
//! The proxy core does not embed sample records; it depends on a
//! [`FallbackProvider`] capability and this module supplies the default
//! implementation carrying the fixed demo roster, partner list and stats.

use serde_json::{json, Value};

use super::partners::PARTNERS_CACHE_KEY;
use super::players::{PLAYERS_CACHE_KEY, PLAYER_KEY_PREFIX};
use super::stats::STATS_CACHE_KEY;

/// Supplies a substitute dataset for a failed upstream fetch
///
/// Keyed by the same cache key the proxy would have populated, so the
/// substituted data flows through the exact transform path real responses
/// take. Returning `None` means no substitute exists and the typed error
/// surfaces instead.
pub trait FallbackProvider: Send + Sync {
    fn fallback(&self, cache_key: &str) -> Option<Value>;
}

/// The built-in fixed datasets, in the upstream document shape
#[derive(Debug, Default)]
pub struct StaticMockData;

impl StaticMockData {
    pub fn new() -> Self {
        Self
    }
}

impl FallbackProvider for StaticMockData {
    fn fallback(&self, cache_key: &str) -> Option<Value> {
        if cache_key == PLAYERS_CACHE_KEY {
            return Some(mock_players());
        }
        if let Some(id) = cache_key.strip_prefix(PLAYER_KEY_PREFIX) {
            return mock_players()
                .as_array()?
                .iter()
                .find(|player| player["id"] == id)
                .cloned();
        }
        if cache_key == PARTNERS_CACHE_KEY {
            return Some(mock_partners());
        }
        if cache_key == STATS_CACHE_KEY {
            return Some(mock_stats());
        }
        None
    }
}

/// The demo roster, in the shape the upstream cache endpoint serves
pub fn mock_players() -> Value {
    json!([
        {
            "id": "1",
            "name": "Romarinho",
            "age": 34,
            "position": { "main": "Right Winger", "other": [] },
            "citizenship": ["Brazil"],
            "club": "Fenerbahçe",
            "marketValue": "€12.50m",
            "isLbPlayer": true
        },
        {
            "id": "2",
            "name": "Uilton",
            "age": 32,
            "position": { "main": "Right Winger", "other": [] },
            "citizenship": ["Brazil"],
            "club": "FC Porto",
            "marketValue": "€8.20m",
            "isLbPlayer": false
        },
        {
            "id": "3",
            "name": "Tiago Orobó",
            "age": 31,
            "position": { "main": "Center-Forward", "other": [] },
            "citizenship": ["Brazil"],
            "club": "Barcelona",
            "marketValue": "€15.70m",
            "isLbPlayer": true
        },
        {
            "id": "4",
            "name": "Buller",
            "age": 30,
            "position": { "main": "Left Winger", "other": [] },
            "citizenship": ["Brazil"],
            "club": "Manchester United",
            "marketValue": "€7.30m",
            "isLbPlayer": false
        },
        {
            "id": "5",
            "name": "Farley Rosa",
            "age": 31,
            "position": { "main": "Left Winger", "other": [] },
            "citizenship": ["Brazil", "Portugal"],
            "club": "FC Porto",
            "marketValue": "€9.10m",
            "isLbPlayer": true
        },
        {
            "id": "6",
            "name": "Lucas Rocha",
            "age": 29,
            "position": { "main": "Center-Back", "other": [] },
            "citizenship": ["Brazil"],
            "club": "AC Milan",
            "marketValue": "€11.80m",
            "isLbPlayer": false
        },
        {
            "id": "7",
            "name": "Paulo Henrique",
            "age": 26,
            "position": { "main": "Defensive Midfielder", "other": [] },
            "citizenship": ["Brazil"],
            "club": "Juventus",
            "marketValue": "€14.20m",
            "isLbPlayer": true
        }
    ])
}

/// A fixed partner list for offline demos
pub fn mock_partners() -> Value {
    json!([
        {
            "id": "p1",
            "name": "Atlântico Sports Management",
            "transfermarktUrl": "https://www.transfermarkt.com/atlantico/beraterfirma/berater/101",
            "notes": "Primary partner for Brazilian transfers"
        },
        {
            "id": "p2",
            "name": "Iberia Talent Group",
            "transfermarktUrl": null,
            "notes": null
        }
    ])
}

/// Collection stats matching the upstream's cache/stats shape
pub fn mock_stats() -> Value {
    json!([
        { "collection": "players", "documentCount": 7 },
        { "collection": "partners", "documentCount": 2 }
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transform::transform_players;

    #[test]
    fn test_players_key_returns_full_roster() {
        let provider = StaticMockData::new();
        let data = provider.fallback(PLAYERS_CACHE_KEY).expect("roster exists");
        assert_eq!(data.as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn test_player_key_finds_single_player() {
        let provider = StaticMockData::new();
        let data = provider.fallback("cache_player_3").expect("player 3 exists");
        assert_eq!(data["name"], "Tiago Orobó");
    }

    #[test]
    fn test_player_key_misses_unknown_id() {
        let provider = StaticMockData::new();
        assert!(provider.fallback("cache_player_999").is_none());
    }

    #[test]
    fn test_unknown_key_has_no_fallback() {
        let provider = StaticMockData::new();
        assert!(provider.fallback("cache_competitions").is_none());
    }

    #[test]
    fn test_roster_survives_the_transform_path() {
        // The mock data must flow through the same transform as real
        // responses without losing records.
        let players = transform_players(&mock_players());
        assert_eq!(players.len(), 7);
        assert!(players.iter().all(|p| p.market_value_number.is_some()));
        assert_eq!(players.iter().filter(|p| p.is_lb_player).count(), 4);
    }

    #[test]
    fn test_stats_shape_looks_available() {
        let stats = mock_stats();
        assert!(stats.as_array().is_some_and(|arr| !arr.is_empty()));
    }
}
