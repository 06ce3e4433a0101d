use std::collections::{HashMap, HashSet};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};
use crate::balance::Team;
use super::types::{GameSettings, Match, ScheduleConstraints};

/// Running per-team counters while a schedule is being built
#[derive(Debug, Default)]
struct TeamProgress {
    games_played: usize,
    last_game: Option<u32>,
    opponents: HashSet<String>,
}

impl TeamProgress {
    fn rested(&self, game_number: u32, minimum_rest_games: u32) -> bool {
        match self.last_game {
            // Games strictly between the last one and this one
            Some(last) => game_number - last - 1 >= minimum_rest_games,
            None => true,
        }
    }
}

/// All unordered pairings of team ids, (i, j) with i < j
pub fn unique_pairings(teams: &[Team]) -> Vec<(String, String)> {
    let mut pairings = Vec::new();
    for (i, a) in teams.iter().enumerate() {
        for b in &teams[i + 1..] {
            pairings.push((a.id.clone(), b.id.clone()));
        }
    }
    pairings
}

/// Builds a round-robin schedule honoring pairing uniqueness, per-team caps and rest
///
/// Pairings are shuffled once, then each game takes the first unused pairing
/// whose teams are under the cap and rested. If nobody is rested the round is
/// retried ignoring rest only; if that also fails the schedule stops short.
pub fn generate_round_robin<R: Rng + ?Sized>(
    teams: &[Team],
    settings: &GameSettings,
    constraints: &ScheduleConstraints,
    rng: &mut R,
) -> Vec<Match> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut pairings = unique_pairings(teams);
    pairings.shuffle(rng);

    let cap_total = constraints.max_games_per_team * teams.len() / 2;
    let target_games = pairings.len().min(cap_total);

    let mut progress: HashMap<&str, TeamProgress> = teams
        .iter()
        .map(|t| (t.id.as_str(), TeamProgress::default()))
        .collect();
    let mut matches = Vec::with_capacity(target_games);
    let mut game_number: u32 = 1;

    while matches.len() < target_games {
        let pick = |respect_rest: bool| {
            pairings.iter().position(|(a, b)| {
                let (Some(team_a), Some(team_b)) = (progress.get(a.as_str()), progress.get(b.as_str())) else {
                    return false;
                };
                // A pairing is used once the teams have faced each other
                if team_a.opponents.contains(b) {
                    return false;
                }
                if team_a.games_played >= constraints.max_games_per_team
                    || team_b.games_played >= constraints.max_games_per_team
                {
                    return false;
                }
                !respect_rest
                    || (team_a.rested(game_number, constraints.minimum_rest_games)
                        && team_b.rested(game_number, constraints.minimum_rest_games))
            })
        };

        let chosen = match pick(true) {
            Some(index) => index,
            None => match pick(false) {
                Some(index) => {
                    debug!(game_number, "no rested pairing, relaxing rest constraint");
                    index
                }
                None => {
                    warn!(
                        game_number,
                        scheduled = matches.len(),
                        target_games,
                        "no schedulable pairing left, stopping early"
                    );
                    break;
                }
            },
        };

        let (team_a_id, team_b_id) = &pairings[chosen];
        for (team_id, opponent_id) in [(team_a_id, team_b_id), (team_b_id, team_a_id)] {
            if let Some(team) = progress.get_mut(team_id.as_str()) {
                team.games_played += 1;
                team.last_game = Some(game_number);
                team.opponents.insert(opponent_id.clone());
            }
        }
        matches.push(Match::scheduled(game_number, team_a_id, team_b_id, settings.match_duration));
        game_number += 1;
    }

    info!(teams = teams.len(), games = matches.len(), target_games, "round robin generated");
    matches
}
