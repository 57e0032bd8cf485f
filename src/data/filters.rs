//! Client-side filtering of player lists
//!
//! The upstream list endpoint returns the full collection; the dashboard
//! narrows it down locally. Filters combine with AND semantics.

use super::{Player, PlayerFilters};

/// Applies `filters` to a player list, returning the matching players
///
/// Name, nationality and club are case-insensitive substring matches;
/// position is an exact match. Players missing an attribute a range filter
/// targets (age or market value) are excluded by that filter.
pub fn apply_filters(players: &[Player], filters: &PlayerFilters) -> Vec<Player> {
    players
        .iter()
        .filter(|player| matches(player, filters))
        .cloned()
        .collect()
}

fn matches(player: &Player, filters: &PlayerFilters) -> bool {
    if let Some(name) = &filters.name {
        if !contains_ignore_case(&player.name, name) {
            return false;
        }
    }

    if let Some(position) = &filters.position {
        if &player.position != position {
            return false;
        }
    }

    if let Some(nationality) = &filters.nationality {
        if !contains_ignore_case(&player.nationality, nationality) {
            return false;
        }
    }

    if let Some(club) = &filters.club {
        match &player.club {
            Some(player_club) if contains_ignore_case(player_club, club) => {}
            _ => return false,
        }
    }

    if filters.min_age.is_some() || filters.max_age.is_some() {
        let Some(age) = player.age else { return false };
        if filters.min_age.is_some_and(|min| age < min) {
            return false;
        }
        if filters.max_age.is_some_and(|max| age > max) {
            return false;
        }
    }

    if filters.min_value.is_some() || filters.max_value.is_some() {
        let Some(value) = player.market_value_number else {
            return false;
        };
        if filters.min_value.is_some_and(|min| value < min) {
            return false;
        }
        if filters.max_value.is_some_and(|max| value > max) {
            return false;
        }
    }

    if filters.lb_only && !player.is_lb_player {
        return false;
    }

    true
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
