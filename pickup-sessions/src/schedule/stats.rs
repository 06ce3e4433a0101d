use std::collections::{BTreeMap, HashSet};
use serde::{Serialize, Deserialize};
use crate::balance::Team;
use super::types::Match;
use super::validate::games_by_team;

/// Changeover time assumed between consecutive games
pub const INTER_MATCH_BUFFER_MINUTES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_games: usize,
    pub games_per_team: BTreeMap<String, usize>, // team id -> games
    pub average_games_per_team: f64,
    pub back_to_back_count: usize,
    pub unique_pairings: usize,
    pub estimated_duration_minutes: u64,
}

/// Summarizes a schedule for reporting
pub fn schedule_stats(matches: &[Match], teams: &[Team]) -> ScheduleStats {
    let per_team = games_by_team(matches, teams);

    let games_per_team: BTreeMap<String, usize> = per_team
        .iter()
        .map(|(team, games)| (team.id.clone(), games.len()))
        .collect();

    let average_games_per_team = if teams.is_empty() {
        0.0
    } else {
        games_per_team.values().sum::<usize>() as f64 / teams.len() as f64
    };

    let back_to_back_count = per_team
        .iter()
        .map(|(_, games)| games.windows(2).filter(|pair| pair[1] - pair[0] == 1).count())
        .sum();

    let unique_pairings = matches
        .iter()
        .map(|m| m.pairing_key())
        .collect::<HashSet<_>>()
        .len();

    let playing_time: u64 = matches.iter().map(|m| u64::from(m.duration_minutes)).sum();
    let buffers = (matches.len() as u64).saturating_sub(1) * u64::from(INTER_MATCH_BUFFER_MINUTES);

    ScheduleStats {
        total_games: matches.len(),
        games_per_team,
        average_games_per_team,
        back_to_back_count,
        unique_pairings,
        estimated_duration_minutes: playing_time + buffers,
    }
}
