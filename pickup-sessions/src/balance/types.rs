use std::collections::BTreeSet;
use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

pub const SKILL_MIN: u8 = 1;
pub const SKILL_MAX: u8 = 4;

/// A signed-up player with a skill rating (1-4)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub skill_level: u8,
    pub is_waitlisted: bool,
    pub signup_order: u32,
    pub created_at: DateTime<Utc>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, skill_level: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skill_level: skill_level.clamp(SKILL_MIN, SKILL_MAX),
            is_waitlisted: false,
            signup_order: 0,
            created_at: Utc::now(),
        }
    }
}

/// A team owning an ordered roster of players
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub color: String,
    pub players: Vec<Player>,
    pub captain_ids: BTreeSet<String>, // always a subset of `players`
    pub average_skill: f64,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            players: Vec::new(),
            captain_ids: BTreeSet::new(),
            average_skill: 0.0,
        }
    }

    /// Recomputes `average_skill` from the current roster
    pub fn recalculate_average(&mut self) {
        self.average_skill = average_skill(&self.players);
    }

    /// Removes a player from the roster (and the captain set) by id
    pub fn take_player(&mut self, player_id: &str) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == player_id)?;
        self.captain_ids.remove(player_id);
        Some(self.players.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Mean skill of a roster rounded to one decimal, 0 for an empty roster
pub fn average_skill(players: &[Player]) -> f64 {
    if players.is_empty() {
        return 0.0;
    }
    let total: u32 = players.iter().map(|p| p.skill_level as u32).sum();
    let mean = total as f64 / players.len() as f64;
    (mean * 10.0).round() / 10.0
}
