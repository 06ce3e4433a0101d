use serde::{Serialize, Deserialize};
use tracing::debug;
use super::score::{BalanceScorer, SkillSpread};
use super::types::Team;

/// Improvements at or below this are treated as noise and not suggested
pub const SUGGESTION_THRESHOLD: f64 = 0.1;
pub const MAX_SUGGESTIONS: usize = 5;

/// A single-player move that would lower the imbalance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSuggestion {
    pub from_team_id: String,
    pub to_team_id: String,
    pub player_id: String,
    pub improvement_score: f64,
}

/// Copies `teams` and moves one player from `from_index` to `to_index`
fn simulate_move(teams: &[Team], from_index: usize, to_index: usize, player_id: &str) -> Vec<Team> {
    let mut simulated = teams.to_vec();
    if let Some(player) = simulated[from_index].take_player(player_id) {
        simulated[to_index].players.push(player);
    }
    simulated[from_index].recalculate_average();
    simulated[to_index].recalculate_average();
    simulated
}

/// Moves the one player from `from_index` to `to_index` that best evens out the teams
pub fn rebalance_team(teams: &[Team], from_index: usize, to_index: usize) -> Vec<Team> {
    rebalance_team_with_scorer(teams, from_index, to_index, &SkillSpread)
}

/// Same as `rebalance_team`, ranking candidate moves with a custom scorer
pub fn rebalance_team_with_scorer<S>(
    teams: &[Team],
    from_index: usize,
    to_index: usize,
    scorer: &S,
) -> Vec<Team>
where
    S: BalanceScorer + ?Sized,
{
    if from_index == to_index
        || from_index >= teams.len()
        || to_index >= teams.len()
        || teams[from_index].is_empty()
    {
        return teams.to_vec();
    }

    let mut best: Option<(f64, Vec<Team>)> = None;
    for player in &teams[from_index].players {
        let candidate = simulate_move(teams, from_index, to_index, &player.id);
        let score = scorer.score(&candidate);
        match &best {
            Some((best_score, _)) if *best_score <= score => {}
            _ => best = Some((score, candidate)),
        }
    }

    match best {
        Some((score, mut moved)) => {
            debug!(
                from = %teams[from_index].id,
                to = %teams[to_index].id,
                score,
                "rebalanced teams"
            );
            for team in moved.iter_mut() {
                team.recalculate_average();
            }
            moved
        }
        None => teams.to_vec(),
    }
}

/// Ranks single-player moves that would improve balance (best first, at most 5)
///
/// Despite the name these are one-directional moves, not two-way trades.
pub fn suggest_player_swaps(teams: &[Team]) -> Vec<SwapSuggestion> {
    suggest_player_swaps_with_scorer(teams, &SkillSpread)
}

/// Same as `suggest_player_swaps`, measuring improvement with a custom scorer
pub fn suggest_player_swaps_with_scorer<S>(teams: &[Team], scorer: &S) -> Vec<SwapSuggestion>
where
    S: BalanceScorer + ?Sized,
{
    let current_score = scorer.score(teams);
    let mut suggestions = Vec::new();

    for (from_index, from_team) in teams.iter().enumerate() {
        for player in &from_team.players {
            for (to_index, to_team) in teams.iter().enumerate() {
                if to_index == from_index {
                    continue;
                }

                let simulated = simulate_move(teams, from_index, to_index, &player.id);
                let improvement = current_score - scorer.score(&simulated);
                if improvement > SUGGESTION_THRESHOLD {
                    suggestions.push(SwapSuggestion {
                        from_team_id: from_team.id.clone(),
                        to_team_id: to_team.id.clone(),
                        player_id: player.id.clone(),
                        improvement_score: improvement,
                    });
                }
            }
        }
    }

    // Sort by improvement descending (largest gain first)
    suggestions.sort_by(|a, b| b.improvement_score.total_cmp(&a.improvement_score));
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
