pub mod types;
pub mod round_robin;
pub mod optimize;
pub mod validate;
pub mod stats;
pub mod manual;
pub mod timing;

pub use types::{GameSettings, Match, MatchStatus, ScheduleConstraints};
pub use round_robin::{generate_round_robin, unique_pairings};
pub use optimize::{optimize_schedule, DEFAULT_SCHEDULE_ATTEMPTS};
pub use validate::{validate_schedule, ScheduleReport};
pub use stats::{schedule_stats, ScheduleStats, INTER_MATCH_BUFFER_MINUTES};
pub use manual::add_individual_game;
pub use timing::{kickoff_times, minutes_to_time_string, parse_time_to_minutes};
