//! Team balancing and match scheduling for pickup sports sessions.
//!
//! Players are split into skill-balanced teams with a snake draft (optionally
//! improved by reshuffling ties), then a round-robin schedule is built that
//! respects pairing uniqueness, per-team game caps and rest between games.
//! All engine operations are pure; randomness comes from a caller-supplied RNG.

pub mod balance;
pub mod schedule;
pub mod parser;
pub mod form;
pub mod display;
pub mod config;
pub mod error;
pub mod web;

pub use balance::{
    balance_score, balance_teams, optimize_team_balance, rebalance_team, suggest_player_swaps,
    validate_team_balance, BalanceScorer, Player, SwapSuggestion, Team, TeamBalanceReport,
};
pub use schedule::{
    add_individual_game, generate_round_robin, optimize_schedule, schedule_stats, validate_schedule,
    GameSettings, Match, MatchStatus, ScheduleConstraints, ScheduleReport, ScheduleStats,
};
pub use error::{Result, SessionError};
