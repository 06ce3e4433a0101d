use pickup_sessions::balance::{
    balance_score, optimize_team_balance, suggest_player_swaps, validate_team_balance,
    DEFAULT_MAX_SKILL_DIFFERENCE,
};
use pickup_sessions::config::SessionConfig;
use pickup_sessions::form::export_roster_to_csv;
use pickup_sessions::display::{print_schedule, print_teams, write_schedule_to_file, write_teams_to_file};
use pickup_sessions::parser::{active_players, load_players};
use pickup_sessions::schedule::{optimize_schedule, schedule_stats, validate_schedule};
use pickup_sessions::web;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = SessionConfig::from_env();

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        println!("Starting web server on port {}...", port);
        println!("Access the API at http://localhost:{}/api/teams", port);

        web::start_server(port, config).await?;
        return Ok(());
    }

    // CLI mode
    let csv_path = args.get(1).map(String::as_str).unwrap_or("data/roster.csv");

    println!("Loading roster from {}...", csv_path);
    let players = load_players(csv_path)?;
    let active = active_players(&players);
    println!(
        "Loaded {} players ({} active, {} waitlisted)",
        players.len(),
        active.len(),
        players.len() - active.len()
    );

    let mut rng = config.rng();
    let settings = &config.settings;

    println!("\n\n=== Balancing Teams ===");
    let teams = optimize_team_balance(&active, settings.teams_count, config.balance_attempts, &mut rng);
    let team_report = validate_team_balance(&teams, DEFAULT_MAX_SKILL_DIFFERENCE);
    let suggestions = suggest_player_swaps(&teams);
    print_teams(&teams, balance_score(&teams), &team_report, &suggestions);

    println!("\n\n=== Scheduling Games ===");
    let matches = optimize_schedule(&teams, settings, config.schedule_attempts, &mut rng);
    let schedule_report = validate_schedule(&matches, &teams, settings);
    let stats = schedule_stats(&matches, &teams);
    print_schedule(&matches, &teams, &config.start_time, &schedule_report, &stats);

    // Write teams and schedule to files
    println!("\n=== Writing Results to Files ===");
    write_teams_to_file(&teams, "teams.txt")?;
    write_schedule_to_file(&matches, &teams, &config.start_time, "schedule.txt")?;
    // Merged roster: re-submissions folded in, sorted by signup order
    export_roster_to_csv(&players, Path::new("roster_clean.csv"))?;
    info!(teams = teams.len(), games = matches.len(), "session written");
    println!("Results saved to:");
    println!("  - teams.txt");
    println!("  - schedule.txt");
    println!("  - roster_clean.csv");

    Ok(())
}
