use serde::{Serialize, Deserialize};
use super::types::Team;

pub const DEFAULT_MAX_SKILL_DIFFERENCE: f64 = 1.0;

/// Result of checking a team split; issues and suggestions are paired by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBalanceReport {
    pub is_balanced: bool,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Reports uneven rosters, wide skill spread and empty teams
pub fn validate_team_balance(teams: &[Team], max_skill_difference: f64) -> TeamBalanceReport {
    let mut issues = Vec::new();
    let mut suggestions = Vec::new();

    let sizes: Vec<usize> = teams.iter().map(|t| t.players.len()).collect();
    if let (Some(&largest), Some(&smallest)) = (sizes.iter().max(), sizes.iter().min()) {
        if largest - smallest > 1 {
            issues.push(format!(
                "Uneven team sizes: largest team has {} players, smallest has {}",
                largest, smallest
            ));
            suggestions.push("Move players from the largest team to the smallest team".to_string());
        }
    }

    // Empty teams are reported on their own, not as part of the spread
    let averages: Vec<f64> = teams
        .iter()
        .filter(|t| !t.is_empty())
        .map(|t| t.average_skill)
        .collect();
    let highest = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest = averages.iter().copied().fold(f64::INFINITY, f64::min);
    if averages.len() > 1 && highest - lowest > max_skill_difference {
        issues.push(format!(
            "Skill averages differ by {:.1} (highest {:.1}, lowest {:.1})",
            highest - lowest,
            highest,
            lowest
        ));
        suggestions.push(
            "Rebalance the strongest and weakest teams or apply a suggested player move".to_string(),
        );
    }

    for team in teams.iter().filter(|t| t.is_empty()) {
        issues.push(format!("{} has no players", team.name));
        suggestions.push(format!("Assign players to {} or reduce the number of teams", team.name));
    }

    TeamBalanceReport {
        is_balanced: issues.is_empty(),
        issues,
        suggestions,
    }
}
