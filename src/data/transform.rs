//! Transforms upstream player documents into the dashboard shape
//!
//! The upstream stores player documents in the shape its scraper produces:
//! `position` as a string or a `{ main, other }` object, `club` as a string
//! or a `{ name, contractExpires }` object, `citizenship` as an array, and
//! market values as formatted currency strings like "€450k" or "€2.00m".
//! This module flattens those into [`Player`] and parses the currency
//! strings into numbers for sorting and range filters.

use serde_json::Value;
use tracing::warn;

use super::Player;

/// Parses an upstream market value string into euros
///
/// Accepts the compact forms the upstream emits: "€450k" becomes 450000,
/// "€2.00m" becomes 2000000, "€850" becomes 850. The currency symbol is
/// optional; suffixes are case-insensitive. Returns `None` for anything
/// that is not a plain positive decimal with an optional k/m suffix.
pub fn parse_market_value(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_start_matches('€').trim();
    if cleaned.is_empty() {
        return None;
    }

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('k') | Some('K') => (&cleaned[..cleaned.len() - 1], 1_000.0),
        Some('m') | Some('M') => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned, 1.0),
    };

    let digits = digits.trim();
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1;
    if !well_formed {
        return None;
    }

    digits.parse::<f64>().ok().map(|n| n * multiplier)
}

/// Formats a euro amount in the compact form the dashboard displays
///
/// Mirrors the upstream convention: millions with one decimal ("€12.5M"),
/// thousands rounded ("€450K"), small amounts verbatim.
pub fn format_market_value(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("€{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("€{:.0}K", value / 1_000.0)
    } else {
        format!("€{}", value)
    }
}

/// Flattens one upstream player document into a [`Player`]
///
/// Returns `None` when the document is not an object or carries no usable
/// identifier; every other missing field degrades to a default, matching
/// how tolerant the dashboard has to be of the scraper's output.
pub fn transform_player(data: &Value) -> Option<Player> {
    let obj = data.as_object()?;

    let id = obj
        .get("id")
        .or_else(|| obj.get("transfermarktId"))
        .and_then(value_to_string)?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();

    let age = match obj.get("age") {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse::<u8>().ok(),
        _ => None,
    };

    let (position, other_positions) = match obj.get("position") {
        Some(Value::String(s)) => (s.clone(), Vec::new()),
        Some(Value::Object(pos)) => {
            let main = pos
                .get("main")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string();
            let other = pos
                .get("other")
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            (main, other)
        }
        _ => ("Unknown".to_string(), Vec::new()),
    };

    let citizenship: Vec<String> = obj
        .get("citizenship")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let nationality = citizenship
        .first()
        .cloned()
        .or_else(|| match obj.get("nationality") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Array(arr)) => arr.first().and_then(Value::as_str).map(str::to_string),
            Some(Value::Object(nat)) => nat.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let (club, club_contract) = match obj.get("club") {
        Some(Value::String(s)) => (Some(s.clone()), None),
        Some(Value::Object(club)) => (
            club.get("name").and_then(Value::as_str).map(str::to_string),
            club.get("contractExpires")
                .and_then(Value::as_str)
                .map(str::to_string),
        ),
        _ => (None, None),
    };

    let market_value = obj
        .get("marketValue")
        .and_then(Value::as_str)
        .map(str::to_string);
    let market_value_number = market_value.as_deref().and_then(parse_market_value);

    let is_lb_player = obj
        .get("isLbPlayer")
        .or_else(|| obj.get("lbPlayer"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(Player {
        id,
        name,
        full_name: string_field(obj, "fullName"),
        age,
        position,
        other_positions,
        citizenship,
        nationality,
        club,
        market_value,
        market_value_number,
        image_url: string_field(obj, "imageUrl"),
        is_lb_player,
        contract_expires: club_contract.or_else(|| string_field(obj, "contractExpires")),
        date_of_birth: string_field(obj, "dateOfBirth"),
        foot: string_field(obj, "foot"),
        height: string_field(obj, "height"),
        shirt_number: obj.get("shirtNumber").and_then(value_to_string),
    })
}

/// Flattens an upstream list response into players, skipping malformed
/// records individually rather than failing the whole batch
///
/// Accepts a bare array, an object with a `players` array, or a single
/// document.
pub fn transform_players(data: &Value) -> Vec<Player> {
    let single = std::slice::from_ref(data);
    let items: &[Value] = if let Some(arr) = data.as_array() {
        arr
    } else if let Some(arr) = data.get("players").and_then(Value::as_array) {
        arr
    } else {
        single
    };

    items
        .iter()
        .filter_map(|item| {
            let player = transform_player(item);
            if player.is_none() {
                warn!("skipping malformed player record in upstream response");
            }
            player
        })
        .collect()
}

/// Reads a JSON string or number as an owned string
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_market_value_thousands() {
        assert_eq!(parse_market_value("€450k"), Some(450_000.0));
        assert_eq!(parse_market_value("€25K"), Some(25_000.0));
    }

    #[test]
    fn test_parse_market_value_millions() {
        assert_eq!(parse_market_value("€2.00m"), Some(2_000_000.0));
        assert_eq!(parse_market_value("€12.5M"), Some(12_500_000.0));
    }

    #[test]
    fn test_parse_market_value_plain_and_unprefixed() {
        assert_eq!(parse_market_value("€850"), Some(850.0));
        assert_eq!(parse_market_value("500k"), Some(500_000.0));
    }

    #[test]
    fn test_parse_market_value_rejects_garbage() {
        assert_eq!(parse_market_value("Unknown"), None);
        assert_eq!(parse_market_value(""), None);
        assert_eq!(parse_market_value("€"), None);
        assert_eq!(parse_market_value("€-5m"), None);
        assert_eq!(parse_market_value("€1.2.3m"), None);
    }

    #[test]
    fn test_format_market_value() {
        assert_eq!(format_market_value(12_500_000.0), "€12.5M");
        assert_eq!(format_market_value(450_000.0), "€450K");
        assert_eq!(format_market_value(850.0), "€850");
    }

    /// A player document in the shape the upstream cache endpoint serves
    const CACHE_DOCUMENT: &str = r#"{
        "id": 193925,
        "name": "Romarinho",
        "fullName": "Romarinho de Souza",
        "age": 34,
        "position": { "main": "Right Winger", "other": ["Left Winger"] },
        "citizenship": ["Brazil"],
        "club": { "name": "Fenerbahçe", "contractExpires": "2026-06-30" },
        "marketValue": "€2.00m",
        "imageUrl": "https://img.example/193925.jpg",
        "isLbPlayer": true,
        "dateOfBirth": "1990-12-12",
        "foot": "right",
        "height": "1,79m",
        "shirtNumber": 11
    }"#;

    #[test]
    fn test_transform_cache_document() {
        let data: Value = serde_json::from_str(CACHE_DOCUMENT).expect("valid json");
        let player = transform_player(&data).expect("transformable document");

        assert_eq!(player.id, "193925");
        assert_eq!(player.name, "Romarinho");
        assert_eq!(player.age, Some(34));
        assert_eq!(player.position, "Right Winger");
        assert_eq!(player.other_positions, vec!["Left Winger".to_string()]);
        assert_eq!(player.nationality, "Brazil");
        assert_eq!(player.club.as_deref(), Some("Fenerbahçe"));
        assert_eq!(player.contract_expires.as_deref(), Some("2026-06-30"));
        assert_eq!(player.market_value.as_deref(), Some("€2.00m"));
        assert_eq!(player.market_value_number, Some(2_000_000.0));
        assert!(player.is_lb_player);
        assert_eq!(player.shirt_number.as_deref(), Some("11"));
    }

    #[test]
    fn test_transform_tolerates_string_club_and_position() {
        let data = json!({
            "id": "7",
            "name": "Paulo Henrique",
            "position": "Defensive Midfielder",
            "club": "Juventus",
            "age": "26"
        });

        let player = transform_player(&data).expect("transformable document");
        assert_eq!(player.position, "Defensive Midfielder");
        assert_eq!(player.club.as_deref(), Some("Juventus"));
        assert_eq!(player.age, Some(26));
        assert_eq!(player.nationality, "Unknown");
    }

    #[test]
    fn test_transform_rejects_document_without_id() {
        assert!(transform_player(&json!({"name": "ghost"})).is_none());
        assert!(transform_player(&json!("not an object")).is_none());
    }

    #[test]
    fn test_transform_players_skips_malformed_records() {
        let data = json!([
            {"id": "1", "name": "Romarinho"},
            {"name": "no id"},
            "not an object",
            {"id": "2", "name": "Uilton"}
        ]);

        let players = transform_players(&data);
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Romarinho");
        assert_eq!(players[1].name, "Uilton");
    }

    #[test]
    fn test_transform_players_accepts_wrapped_and_single_shapes() {
        let wrapped = json!({"players": [{"id": "1", "name": "A"}]});
        assert_eq!(transform_players(&wrapped).len(), 1);

        let single = json!({"id": "1", "name": "A"});
        assert_eq!(transform_players(&single).len(), 1);
    }

    #[test]
    fn test_transform_legacy_nationality_object() {
        let data = json!({
            "id": "9",
            "name": "Malcom",
            "nationality": {"name": "Brazil"}
        });
        let player = transform_player(&data).expect("transformable document");
        assert_eq!(player.nationality, "Brazil");
    }
}
