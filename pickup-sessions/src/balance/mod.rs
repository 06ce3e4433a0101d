pub mod types;
pub mod score;
pub mod draft;
pub mod optimize;
pub mod refine;
pub mod validate;

pub use types::{Player, Team, SKILL_MIN, SKILL_MAX};
pub use score::{balance_score, BalanceScorer, RosterWeightedSpread, SkillSpread};
pub use draft::{balance_teams, TEAM_PALETTE};
pub use optimize::{optimize_team_balance, optimize_team_balance_with_scorer, DEFAULT_BALANCE_ATTEMPTS};
pub use refine::{
    rebalance_team, rebalance_team_with_scorer, suggest_player_swaps, suggest_player_swaps_with_scorer,
    SwapSuggestion,
};
pub use validate::{validate_team_balance, TeamBalanceReport, DEFAULT_MAX_SKILL_DIFFERENCE};
