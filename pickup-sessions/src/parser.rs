use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::balance::{Player, SKILL_MAX, SKILL_MIN};
use crate::error::Result;

/// Parses a skill rating, clamping into 1-4; anything unreadable counts as 1
fn parse_skill(value: &str) -> u8 {
    value
        .trim()
        .parse::<i64>()
        .map(|v| v.clamp(SKILL_MIN as i64, SKILL_MAX as i64) as u8)
        .unwrap_or(SKILL_MIN)
}

/// Parses a boolean value from various string representations
fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "yes" || lower == "true" || lower == "1" || lower == "y"
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Column positions in a roster CSV, found by header name with positional fallback
struct RosterColumns {
    id: usize,
    name: usize,
    skill: usize,
    waitlist: usize,
    signup: usize,
    created: usize,
}

impl RosterColumns {
    fn from_headers(headers: &StringRecord) -> Self {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        // Whole header names win; otherwise a separate word of the header ("player id")
        let find = |names: &[&str], words: &[&str], fallback: usize| {
            normalized
                .iter()
                .position(|h| names.contains(&h.as_str()))
                .or_else(|| {
                    normalized.iter().position(|h| {
                        h.split(|c: char| !c.is_alphanumeric())
                            .any(|word| words.contains(&word))
                    })
                })
                .unwrap_or(fallback)
        };
        Self {
            id: find(&["id", "player id", "player_id", "playerid"], &["id"], 0),
            name: find(&["name", "player name", "full name"], &["name"], 1),
            skill: find(&["skill", "skill level", "skill_level", "level"], &["skill", "level"], 2),
            waitlist: find(&["waitlist", "waitlisted", "is_waitlisted"], &["waitlist", "waitlisted"], 3),
            signup: find(&["signup order", "signup_order", "signup", "order"], &["signup", "order"], 4),
            created: find(&["created", "created_at", "created at", "timestamp"], &["created", "timestamp"], 5),
        }
    }
}

/// Reads players from any CSV source
///
/// Rows without an id or name are skipped. A repeated id replaces the earlier
/// row but keeps its place in the signup order. Output is sorted by signup order.
pub fn read_players<R: Read>(source: R) -> Result<Vec<Player>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
    let columns = RosterColumns::from_headers(reader.headers()?);
    let loaded_at = Utc::now();

    let mut players_by_id: HashMap<String, Player> = HashMap::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = |index: usize| record.get(index).unwrap_or("").trim();

        let id = field(columns.id).to_string();
        let name = field(columns.name).to_string();
        if id.is_empty() || name.is_empty() {
            debug!(row, "skipping roster row without id or name");
            continue;
        }

        let signup_order = field(columns.signup).parse().unwrap_or(row as u32 + 1);
        let player = Player {
            id: id.clone(),
            name,
            skill_level: parse_skill(field(columns.skill)),
            is_waitlisted: parse_bool(field(columns.waitlist)),
            signup_order,
            created_at: parse_timestamp(field(columns.created)).unwrap_or(loaded_at),
        };

        match players_by_id.get_mut(&id) {
            // Re-submission: take the new details, keep the original spot in line
            Some(existing) => {
                let original_order = existing.signup_order;
                *existing = player;
                existing.signup_order = original_order;
            }
            None => {
                players_by_id.insert(id, player);
            }
        }
    }

    let mut players: Vec<Player> = players_by_id.into_values().collect();
    players.sort_by(|a, b| a.signup_order.cmp(&b.signup_order).then_with(|| a.id.cmp(&b.id)));
    Ok(players)
}

/// Loads players from a roster CSV file
pub fn load_players<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Player>> {
    let file = std::fs::File::open(csv_path.as_ref())?;
    let players = read_players(file)?;
    info!(path = %csv_path.as_ref().display(), players = players.len(), "roster loaded");
    Ok(players)
}

/// Players eligible for team balancing (waitlisted players left out)
pub fn active_players(players: &[Player]) -> Vec<Player> {
    players.iter().filter(|p| !p.is_waitlisted).cloned().collect()
}
