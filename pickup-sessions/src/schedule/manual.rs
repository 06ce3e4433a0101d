use super::types::{GameSettings, Match};

/// Creates a manually added game numbered after the current last game
///
/// Manual games skip uniqueness and cap checks; only self-play is refused.
pub fn add_individual_game(
    matches: &[Match],
    team_a_id: &str,
    team_b_id: &str,
    settings: &GameSettings,
) -> Option<Match> {
    if team_a_id == team_b_id {
        return None;
    }
    let next_number = matches.iter().map(|m| m.game_number).max().unwrap_or(0) + 1;
    Some(Match::scheduled(next_number, team_a_id, team_b_id, settings.match_duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_after_the_last_game() {
        let settings = GameSettings::default();
        let existing = vec![
            Match::scheduled(1, "team-1", "team-2", 10),
            Match::scheduled(2, "team-2", "team-3", 10),
        ];
        let added = add_individual_game(&existing, "team-1", "team-2", &settings);
        assert_eq!(added.map(|m| m.game_number), Some(3));

        let first = add_individual_game(&[], "team-1", "team-2", &settings);
        assert_eq!(first.map(|m| m.id), Some("game-1".to_string()));
    }

    #[test]
    fn refuses_self_play() {
        assert!(add_individual_game(&[], "team-1", "team-1", &GameSettings::default()).is_none());
    }
}
