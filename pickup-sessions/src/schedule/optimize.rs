use rand::Rng;
use tracing::{debug, info, warn};
use crate::balance::Team;
use super::round_robin::generate_round_robin;
use super::types::{GameSettings, Match, ScheduleConstraints};
use super::validate::validate_schedule;

pub const DEFAULT_SCHEDULE_ATTEMPTS: usize = 50;

/// Samples the round-robin generator and keeps the valid schedule with the fewest warnings
pub fn optimize_schedule<R: Rng + ?Sized>(
    teams: &[Team],
    settings: &GameSettings,
    max_attempts: usize,
    rng: &mut R,
) -> Vec<Match> {
    let constraints = ScheduleConstraints::from_settings(settings);
    let mut best: Option<(usize, Vec<Match>)> = None;

    for attempt in 0..max_attempts {
        let candidate = generate_round_robin(teams, settings, &constraints, rng);
        let report = validate_schedule(&candidate, teams, settings);
        if !report.is_valid {
            debug!(attempt, issues = report.issues.len(), "discarding invalid schedule");
            continue;
        }

        let warnings = report.warnings.len();
        let improved = best.as_ref().map_or(true, |(fewest, _)| warnings < *fewest);
        if improved {
            debug!(attempt, warnings, "new best schedule");
            best = Some((warnings, candidate));
        }
        if warnings == 0 {
            break;
        }
    }

    match best {
        Some((warnings, matches)) => {
            info!(games = matches.len(), warnings, "schedule optimized");
            matches
        }
        None => {
            warn!(max_attempts, "no valid schedule found, using a single unchecked run");
            generate_round_robin(teams, settings, &constraints, rng)
        }
    }
}
