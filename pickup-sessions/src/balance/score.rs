use super::types::Team;

/// Scores how unevenly matched a set of teams is (lower is better)
pub trait BalanceScorer {
    fn score(&self, teams: &[Team]) -> f64;
}

/// Population standard deviation of each team's average skill
#[derive(Debug, Clone, Copy, Default)]
pub struct SkillSpread;

impl BalanceScorer for SkillSpread {
    fn score(&self, teams: &[Team]) -> f64 {
        let averages: Vec<f64> = teams.iter().map(|t| t.average_skill).collect();
        population_std_dev(&averages, None)
    }
}

/// Standard deviation of team averages, weighted by roster size
///
/// Large rosters pull the mean towards themselves, so a small team that is
/// far off the mean counts for less than a full team would.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterWeightedSpread;

impl BalanceScorer for RosterWeightedSpread {
    fn score(&self, teams: &[Team]) -> f64 {
        let averages: Vec<f64> = teams.iter().map(|t| t.average_skill).collect();
        let weights: Vec<f64> = teams.iter().map(|t| t.players.len() as f64).collect();
        population_std_dev(&averages, Some(&weights))
    }
}

/// Imbalance score using the default `SkillSpread` scorer
pub fn balance_score(teams: &[Team]) -> f64 {
    SkillSpread.score(teams)
}

fn population_std_dev(values: &[f64], weights: Option<&[f64]>) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let weight_at = |i: usize| weights.map(|w| w[i]).unwrap_or(1.0);
    let total_weight: f64 = (0..values.len()).map(weight_at).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let mean = values
        .iter()
        .enumerate()
        .map(|(i, v)| v * weight_at(i))
        .sum::<f64>()
        / total_weight;
    let variance = values
        .iter()
        .enumerate()
        .map(|(i, v)| weight_at(i) * (v - mean).powi(2))
        .sum::<f64>()
        / total_weight;

    variance.sqrt()
}
