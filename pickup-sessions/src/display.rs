use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use crate::balance::{Player, SwapSuggestion, Team, TeamBalanceReport};
use crate::error::Result;
use crate::schedule::{kickoff_times, Match, ScheduleReport, ScheduleStats};

/// Formats a player with their skill and a captain marker, e.g. "Alice (4) [C]"
pub fn format_player_name(player: &Player, team: &Team) -> String {
    if team.captain_ids.contains(&player.id) {
        format!("{} ({}) [C]", player.name, player.skill_level)
    } else {
        format!("{} ({})", player.name, player.skill_level)
    }
}

fn team_names(teams: &[Team]) -> HashMap<&str, &str> {
    teams.iter().map(|t| (t.id.as_str(), t.name.as_str())).collect()
}

/// Formats one game line: "Game 3: Red vs Blue (10 min)"
pub fn format_match(game: &Match, teams: &[Team]) -> String {
    let names = team_names(teams);
    let name = |id: &str| names.get(id).copied().unwrap_or("[unknown]").to_string();
    format!(
        "Game {}: {} vs {} ({} min)",
        game.game_number,
        name(&game.team_a_id),
        name(&game.team_b_id),
        game.duration_minutes
    )
}

/// Writes the team rosters to a file, one team block per team
pub fn write_teams_to_file(teams: &[Team], filename: &str) -> Result<()> {
    let mut file = File::create(filename)?;

    for team in teams {
        writeln!(file, "** {} (avg {:.1}) **", team.name, team.average_skill)?;
        if team.players.is_empty() {
            writeln!(file, "[EMPTY]")?;
        }
        for player in &team.players {
            writeln!(file, "{}", format_player_name(player, team))?;
        }
        writeln!(file)?;
    }

    Ok(())
}

/// Writes the schedule to a file in the format: HH:MM Game N: A vs B (M min)
pub fn write_schedule_to_file(matches: &[Match], teams: &[Team], start_time: &str, filename: &str) -> Result<()> {
    let mut file = File::create(filename)?;
    let kickoffs: HashMap<u32, String> = kickoff_times(matches, start_time).into_iter().collect();

    writeln!(file, "** Schedule ({} games) **", matches.len())?;
    for game in matches {
        let time = kickoffs.get(&game.game_number).map(String::as_str).unwrap_or("--:--");
        writeln!(file, "{} {}", time, format_match(game, teams))?;
    }

    Ok(())
}

/// Prints teams with their balance report and suggested moves
pub fn print_teams(teams: &[Team], score: f64, report: &TeamBalanceReport, suggestions: &[SwapSuggestion]) {
    println!("\n=== Teams (balance score {:.3}) ===", score);
    for team in teams {
        println!("\n{} [{}] - {} players, avg skill {:.1}", team.name, team.color, team.players.len(), team.average_skill);
        for player in &team.players {
            println!("  - {}", format_player_name(player, team));
        }
    }

    if !report.is_balanced {
        println!("\n⚠️  Balance issues ({}):", report.issues.len());
        for (issue, suggestion) in report.issues.iter().zip(&report.suggestions) {
            println!("  - {} -> {}", issue, suggestion);
        }
    }

    if !suggestions.is_empty() {
        let names = team_names(teams);
        println!("\nSuggested moves:");
        for suggestion in suggestions {
            let player_name = teams
                .iter()
                .flat_map(|t| &t.players)
                .find(|p| p.id == suggestion.player_id)
                .map(|p| p.name.as_str())
                .unwrap_or(suggestion.player_id.as_str());
            println!(
                "  - Move {} from {} to {} (improves by {:.2})",
                player_name,
                names.get(suggestion.from_team_id.as_str()).copied().unwrap_or("?"),
                names.get(suggestion.to_team_id.as_str()).copied().unwrap_or("?"),
                suggestion.improvement_score
            );
        }
    }
}

/// Prints the schedule with its validation report and statistics
pub fn print_schedule(
    matches: &[Match],
    teams: &[Team],
    start_time: &str,
    report: &ScheduleReport,
    stats: &ScheduleStats,
) {
    println!("\n=== Schedule ===");
    println!("Total games scheduled: {}", stats.total_games);

    let kickoffs: HashMap<u32, String> = kickoff_times(matches, start_time).into_iter().collect();
    for game in matches {
        let time = kickoffs.get(&game.game_number).map(String::as_str).unwrap_or("--:--");
        println!("  {} {}", time, format_match(game, teams));
    }

    if !report.issues.is_empty() {
        println!("\n❌ Issues ({}):", report.issues.len());
        for issue in &report.issues {
            println!("  - {}", issue);
        }
    }
    if !report.warnings.is_empty() {
        println!("\n⚠️  Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }

    let names = team_names(teams);
    println!("\nGames per team (avg {:.1}):", stats.average_games_per_team);
    for (team_id, games) in &stats.games_per_team {
        println!("  {}: {}", names.get(team_id.as_str()).copied().unwrap_or(team_id.as_str()), games);
    }
    println!("Back-to-back games: {}", stats.back_to_back_count);
    println!("Distinct pairings: {}", stats.unique_pairings);
    println!("Estimated duration: {} min", stats.estimated_duration_minutes);
}
