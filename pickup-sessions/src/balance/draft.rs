use super::types::{Player, Team};

/// Fixed team palette of (name, color); cycles when more teams are needed
pub const TEAM_PALETTE: [(&str, &str); 8] = [
    ("Red", "#e53935"),
    ("Blue", "#1e88e5"),
    ("Green", "#43a047"),
    ("Yellow", "#fdd835"),
    ("Orange", "#fb8c00"),
    ("Purple", "#8e24aa"),
    ("Pink", "#d81b60"),
    ("Teal", "#00897b"),
];

/// Creates `team_count` empty teams named and colored from the palette
pub fn empty_teams(team_count: usize) -> Vec<Team> {
    (0..team_count)
        .map(|i| {
            let (name, color) = TEAM_PALETTE[i % TEAM_PALETTE.len()];
            let lap = i / TEAM_PALETTE.len();
            // Second time round the palette gets "Red 2", "Blue 2", ...
            let name = if lap == 0 {
                name.to_string()
            } else {
                format!("{} {}", name, lap + 1)
            };
            Team::new(format!("team-{}", i + 1), name, color)
        })
        .collect()
}

/// Index of the team that receives the `pick`-th player in a snake draft
fn snake_slot(pick: usize, team_count: usize) -> usize {
    let round = pick / team_count;
    let position = pick % team_count;
    if round % 2 == 0 {
        position
    } else {
        team_count - 1 - position
    }
}

/// Splits players into `team_count` teams with a snake draft on skill
///
/// Players are sorted by skill (highest first, ties keep their input order)
/// and dealt 0..N-1, then N-1..0, and so on. Each non-empty team gets its
/// average computed and its strongest player as captain.
pub fn balance_teams(players: &[Player], team_count: usize) -> Vec<Team> {
    if team_count == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<&Player> = players.iter().collect();
    // sort_by is stable, so equal skills keep input order
    sorted.sort_by(|a, b| b.skill_level.cmp(&a.skill_level));

    let mut teams = empty_teams(team_count);
    for (pick, player) in sorted.into_iter().enumerate() {
        teams[snake_slot(pick, team_count)].players.push(player.clone());
    }

    for team in teams.iter_mut().filter(|t| !t.is_empty()) {
        team.recalculate_average();
        assign_captain(team);
    }

    teams
}

/// Makes the highest-skill player (first in roster order on ties) captain
fn assign_captain(team: &mut Team) {
    let mut best: Option<&Player> = None;
    for player in &team.players {
        match best {
            Some(current) if current.skill_level >= player.skill_level => {}
            _ => best = Some(player),
        }
    }
    team.captain_ids.clear();
    if let Some(captain) = best {
        team.captain_ids.insert(captain.id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::score::balance_score;
    use std::collections::HashSet;

    fn players_with_skills(skills: &[u8]) -> Vec<Player> {
        skills
            .iter()
            .enumerate()
            .map(|(i, s)| Player::new(format!("p{}", i), format!("Player {}", i), *s))
            .collect()
    }

    fn skills(team: &Team) -> Vec<u8> {
        team.players.iter().map(|p| p.skill_level).collect()
    }

    #[test]
    fn snake_draft_evens_out_paired_skills() {
        let players = players_with_skills(&[4, 4, 3, 3, 2, 2, 1, 1]);
        let teams = balance_teams(&players, 2);

        assert_eq!(teams.len(), 2);
        assert_eq!(skills(&teams[0]), vec![4, 3, 2, 1]);
        assert_eq!(skills(&teams[1]), vec![4, 3, 2, 1]);
        assert_eq!(teams[0].average_skill, 2.5);
        assert_eq!(teams[1].average_skill, 2.5);
        assert_eq!(balance_score(&teams), 0.0);
    }

    #[test]
    fn snake_reverses_direction_each_round() {
        assert_eq!(
            (0..9).map(|p| snake_slot(p, 3)).collect::<Vec<_>>(),
            vec![0, 1, 2, 2, 1, 0, 0, 1, 2]
        );
    }

    #[test]
    fn no_players_gives_empty_teams() {
        let teams = balance_teams(&[], 3);
        assert_eq!(teams.len(), 3);
        assert!(teams.iter().all(|t| t.is_empty() && t.average_skill == 0.0));
        assert!(teams.iter().all(|t| t.captain_ids.is_empty()));
    }

    #[test]
    fn zero_team_count_gives_no_teams() {
        let players = players_with_skills(&[1, 2, 3]);
        assert!(balance_teams(&players, 0).is_empty());
    }

    #[test]
    fn captain_is_first_strongest_player() {
        let players = players_with_skills(&[3, 3, 2, 2]);
        let teams = balance_teams(&players, 1);
        let captains: Vec<&String> = teams[0].captain_ids.iter().collect();
        assert_eq!(captains, vec!["p0"]);
    }

    #[test]
    fn palette_cycles_with_distinct_names() {
        let teams = empty_teams(TEAM_PALETTE.len() + 2);
        let names: HashSet<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), teams.len());
        assert_eq!(teams[8].name, "Red 2");
        assert_eq!(teams[8].color, teams[0].color);
        assert_eq!(teams[9].id, "team-10");
    }

    #[test]
    fn every_player_lands_on_exactly_one_team() {
        let players = players_with_skills(&[1, 4, 2, 2, 3, 1, 4]);
        let teams = balance_teams(&players, 3);

        let mut ids: Vec<String> = teams
            .iter()
            .flat_map(|t| t.players.iter().map(|p| p.id.clone()))
            .collect();
        ids.sort();
        let mut expected: Vec<String> = players.iter().map(|p| p.id.clone()).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }
}
