use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

/// Lifecycle of a single game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

/// Represents one scheduled game between two teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub game_number: u32,
    pub team_a_id: String,
    pub team_b_id: String,
    pub score_a: u32,
    pub score_b: u32,
    pub status: MatchStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: u32,
}

impl Match {
    /// A fresh, unplayed game
    pub fn scheduled(game_number: u32, team_a_id: &str, team_b_id: &str, duration_minutes: u32) -> Self {
        Self {
            id: format!("game-{}", game_number),
            game_number,
            team_a_id: team_a_id.to_string(),
            team_b_id: team_b_id.to_string(),
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Scheduled,
            started_at: None,
            ended_at: None,
            duration_minutes,
        }
    }

    pub fn involves(&self, team_id: &str) -> bool {
        self.team_a_id == team_id || self.team_b_id == team_id
    }

    /// Order-independent key for the pairing of the two teams
    pub fn pairing_key(&self) -> (String, String) {
        if self.team_a_id <= self.team_b_id {
            (self.team_a_id.clone(), self.team_b_id.clone())
        } else {
            (self.team_b_id.clone(), self.team_a_id.clone())
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.status == MatchStatus::Scheduled {
            self.status = MatchStatus::InProgress;
            self.started_at = Some(now);
        }
    }

    /// Records the final score; a game that never started is started and ended at `now`
    pub fn complete(&mut self, score_a: u32, score_b: u32, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.score_a = score_a;
        self.score_b = score_b;
        self.status = MatchStatus::Completed;
        self.ended_at = Some(now);
    }
}

/// Session-wide game settings supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub teams_count: usize,
    pub players_per_team: usize,
    pub match_duration: u32, // minutes
    pub games_per_team: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            teams_count: 2,
            players_per_team: 5,
            match_duration: 10,
            games_per_team: 3,
        }
    }
}

impl GameSettings {
    /// Number of players that fit on the teams before the waitlist starts
    pub fn capacity(&self) -> usize {
        self.teams_count * self.players_per_team
    }
}

/// Per-run scheduling constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConstraints {
    pub minimum_rest_games: u32,
    pub max_games_per_team: usize,
    pub preferred_game_spacing: u32, // informational only
}

impl ScheduleConstraints {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            minimum_rest_games: 1,
            max_games_per_team: settings.games_per_team,
            preferred_game_spacing: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&MatchStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn pairing_key_ignores_side() {
        let a = Match::scheduled(1, "team-2", "team-1", 10);
        let b = Match::scheduled(2, "team-1", "team-2", 10);
        assert_eq!(a.pairing_key(), b.pairing_key());
    }

    #[test]
    fn lifecycle_moves_forward() {
        let now = Utc::now();
        let mut game = Match::scheduled(1, "team-1", "team-2", 12);
        game.start(now);
        assert_eq!(game.status, MatchStatus::InProgress);
        assert_eq!(game.started_at, Some(now));

        game.complete(3, 1, now);
        assert_eq!(game.status, MatchStatus::Completed);
        assert_eq!((game.score_a, game.score_b), (3, 1));

        // Starting a finished game does nothing
        game.start(now);
        assert_eq!(game.status, MatchStatus::Completed);
    }

    #[test]
    fn constraints_follow_settings() {
        let settings = GameSettings { games_per_team: 4, ..GameSettings::default() };
        let constraints = ScheduleConstraints::from_settings(&settings);
        assert_eq!(constraints.max_games_per_team, 4);
        assert_eq!(constraints.minimum_rest_games, 1);
    }
}
