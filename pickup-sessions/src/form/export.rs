use std::io::Write;
use std::path::Path;
use csv::Writer;
use crate::balance::Player;
use crate::error::Result;

const ROSTER_HEADERS: [&str; 6] = ["player id", "name", "skill", "waitlist", "signup order", "created"];

/// Writes players as a roster CSV that `parser::read_players` reads back
pub fn write_roster<W: Write>(players: &[Player], destination: W) -> Result<()> {
    let mut wtr = Writer::from_writer(destination);
    wtr.write_record(ROSTER_HEADERS)?;

    for player in players {
        let waitlist = if player.is_waitlisted { "yes" } else { "no" };
        wtr.write_record([
            player.id.clone(),
            player.name.clone(),
            player.skill_level.to_string(),
            waitlist.to_string(),
            player.signup_order.to_string(),
            player.created_at.to_rfc3339(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the roster to a CSV file, replacing any existing file
pub fn export_roster_to_csv(players: &[Player], csv_path: &Path) -> Result<()> {
    let file = std::fs::File::create(csv_path)?;
    write_roster(players, file)
}
