use std::str::FromStr;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;
use crate::balance::DEFAULT_BALANCE_ATTEMPTS;
use crate::schedule::{parse_time_to_minutes, GameSettings, DEFAULT_SCHEDULE_ATTEMPTS};

/// Everything a session run needs, read from `PICKUP_*` environment variables
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub settings: GameSettings,
    pub balance_attempts: usize,
    pub schedule_attempts: usize,
    pub seed: Option<u64>,
    pub start_time: String, // HH:MM kickoff of the first game
    pub admin_password: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settings: GameSettings::default(),
            balance_attempts: DEFAULT_BALANCE_ATTEMPTS,
            schedule_attempts: DEFAULT_SCHEDULE_ATTEMPTS,
            seed: None,
            start_time: "18:00".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

/// Parses `value`, falling back to `default` (with a warning) when it is malformed
fn parse_or<T: FromStr + Copy + std::fmt::Debug>(name: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, ?default, "invalid value, using default");
            default
        }),
        None => default,
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str, default: usize| parse_or(name, lookup(name), default);

        let settings = GameSettings {
            teams_count: get("PICKUP_TEAMS", defaults.settings.teams_count),
            players_per_team: get("PICKUP_PLAYERS_PER_TEAM", defaults.settings.players_per_team),
            match_duration: parse_or(
                "PICKUP_MATCH_DURATION",
                lookup("PICKUP_MATCH_DURATION"),
                defaults.settings.match_duration,
            ),
            games_per_team: get("PICKUP_GAMES_PER_TEAM", defaults.settings.games_per_team),
        };

        Self {
            settings,
            balance_attempts: get("PICKUP_BALANCE_ATTEMPTS", defaults.balance_attempts),
            schedule_attempts: get("PICKUP_SCHEDULE_ATTEMPTS", defaults.schedule_attempts),
            seed: lookup("PICKUP_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(_) => {
                    warn!(variable = "PICKUP_SEED", value = %raw, "invalid seed, using entropy");
                    None
                }
            }),
            start_time: match lookup("PICKUP_START_TIME") {
                Some(raw) if parse_time_to_minutes(&raw).is_some() => raw.trim().to_string(),
                Some(raw) => {
                    warn!(variable = "PICKUP_START_TIME", value = %raw, "invalid time, using default");
                    defaults.start_time
                }
                None => defaults.start_time,
            },
            admin_password: lookup("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        }
    }

    /// Seeded generator when `PICKUP_SEED` is set, otherwise seeded from entropy
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
