use super::stats::INTER_MATCH_BUFFER_MINUTES;
use super::types::Match;

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Parses a time string (HH:MM) to minutes since midnight
pub fn parse_time_to_minutes(time_str: &str) -> Option<u32> {
    let (hours, minutes) = time_str.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight to time string (HH:MM), wrapping past midnight
pub fn minutes_to_time_string(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours % 24, mins)
}

/// Kickoff time of every game, played back to back in game-number order
///
/// Each game starts when the previous one ends plus the changeover buffer.
/// Returns (game number, "HH:MM") pairs; an unreadable start time counts as 00:00.
pub fn kickoff_times(matches: &[Match], start_time: &str) -> Vec<(u32, String)> {
    let mut ordered: Vec<&Match> = matches.iter().collect();
    ordered.sort_by_key(|m| m.game_number);

    // Time of day only; the clock wraps at midnight
    let mut current = parse_time_to_minutes(start_time).unwrap_or(0);
    let mut kickoffs = Vec::with_capacity(ordered.len());
    for game in ordered {
        kickoffs.push((game.game_number, minutes_to_time_string(current)));
        let elapsed = u64::from(current) + u64::from(game.duration_minutes) + u64::from(INTER_MATCH_BUFFER_MINUTES);
        current = (elapsed % MINUTES_PER_DAY) as u32;
    }
    kickoffs
}
