use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};
use super::draft::balance_teams;
use super::score::{BalanceScorer, SkillSpread};
use super::types::{Player, Team};

pub const DEFAULT_BALANCE_ATTEMPTS: usize = 100;

/// Snake draft baseline improved by reshuffling tie order `max_attempts` times
pub fn optimize_team_balance<R: Rng + ?Sized>(
    players: &[Player],
    team_count: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<Team> {
    optimize_team_balance_with_scorer(players, team_count, max_attempts, rng, &SkillSpread)
}

/// Same as `optimize_team_balance`, ranking candidates with a custom scorer
pub fn optimize_team_balance_with_scorer<R, S>(
    players: &[Player],
    team_count: usize,
    max_attempts: usize,
    rng: &mut R,
    scorer: &S,
) -> Vec<Team>
where
    R: Rng + ?Sized,
    S: BalanceScorer + ?Sized,
{
    let mut best_teams = balance_teams(players, team_count);
    let mut best_score = scorer.score(&best_teams);
    let baseline_score = best_score;

    // Shuffle a copy; the caller's list stays in its original order
    let mut shuffled: Vec<Player> = players.to_vec();
    for attempt in 0..max_attempts {
        shuffled.shuffle(rng);
        let candidate = balance_teams(&shuffled, team_count);
        let score = scorer.score(&candidate);

        if score < best_score {
            debug!(attempt, score, previous = best_score, "found better team split");
            best_score = score;
            best_teams = candidate;
        }
    }

    info!(
        players = players.len(),
        team_count,
        max_attempts,
        baseline_score,
        best_score,
        "team balance optimized"
    );
    best_teams
}
