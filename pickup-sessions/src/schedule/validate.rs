use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::balance::Team;
use super::types::{GameSettings, Match};

/// Issues make a schedule invalid; warnings only lower its quality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// Game numbers each team plays in, ascending
pub(crate) fn games_by_team<'a>(matches: &[Match], teams: &'a [Team]) -> Vec<(&'a Team, Vec<u32>)> {
    teams
        .iter()
        .map(|team| {
            let mut games: Vec<u32> = matches
                .iter()
                .filter(|m| m.involves(&team.id))
                .map(|m| m.game_number)
                .collect();
            games.sort_unstable();
            (team, games)
        })
        .collect()
}

/// Checks schedule integrity (issues) and quality (warnings)
pub fn validate_schedule(matches: &[Match], teams: &[Team], settings: &GameSettings) -> ScheduleReport {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    if matches.is_empty() {
        issues.push("No matches scheduled".to_string());
    }

    let names: HashMap<&str, &str> = teams.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect();
    for game in matches {
        for team_id in [&game.team_a_id, &game.team_b_id] {
            if !names.contains_key(team_id.as_str()) {
                issues.push(format!("Game {} references unknown team {}", game.game_number, team_id));
            }
        }
        if game.team_a_id == game.team_b_id {
            let name = names.get(game.team_a_id.as_str()).copied().unwrap_or(game.team_a_id.as_str());
            issues.push(format!("Game {}: {} is scheduled against itself", game.game_number, name));
        }
    }

    let mut numbers: Vec<u32> = matches.iter().map(|m| m.game_number).collect();
    numbers.sort_unstable();
    let contiguous = numbers.iter().enumerate().all(|(i, n)| *n == i as u32 + 1);
    if !contiguous {
        warnings.push("Game numbers are not a contiguous sequence starting at 1".to_string());
    }

    let per_team = games_by_team(matches, teams);
    for (team, games) in &per_team {
        for pair in games.windows(2) {
            if pair[1] - pair[0] == 1 {
                warnings.push(format!(
                    "{} has back-to-back games ({} and {})",
                    team.name, pair[0], pair[1]
                ));
            }
        }
    }

    let counts: Vec<usize> = per_team.iter().map(|(_, games)| games.len()).collect();
    if let (Some(&most), Some(&fewest)) = (counts.iter().max(), counts.iter().min()) {
        if most - fewest > 1 {
            warnings.push(format!(
                "Uneven game distribution: teams play between {} and {} games",
                fewest, most
            ));
        }
    }

    for (team, games) in &per_team {
        if games.len() > settings.games_per_team {
            warnings.push(format!(
                "{} plays {} games, more than the {} per team allowed",
                team.name,
                games.len(),
                settings.games_per_team
            ));
        }
    }

    ScheduleReport {
        is_valid: issues.is_empty(),
        issues,
        warnings,
    }
}
