use rand_distr::Normal;
use tracing::{debug, warn};

use crate::constants::{MIN_STD_DEV, STD_DEV_MULTIPLIER};
use crate::error::{Result, SimError};
use crate::team::TeamRecord;

/// Normal distribution of a team's score in a single week.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreDistribution {
    pub mean: f64,
    pub std_dev: f64,
}

impl ScoreDistribution {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        ScoreDistribution { mean, std_dev }
    }

    /// Sampler for this distribution.
    pub fn sampler(&self) -> Result<Normal<f64>> {
        Normal::new(self.mean, self.std_dev)
            .map_err(|e| SimError::invalid("scoreStdDev", e.to_string()))
    }
}

/// Per-team score distributions plus the league-average bye opponent.
///
/// Distributions are indexed in the same order as the team list they were built from.
#[derive(Clone, Debug)]
pub struct ScoreModel {
    pub teams: Vec<ScoreDistribution>,
    pub bye: ScoreDistribution,
    pub std_dev: f64,
}

impl ScoreModel {
    /// Build the model. `std_dev` overrides the league estimate for every team.
    pub fn new(teams: &[TeamRecord], std_dev: Option<f64>) -> Self {
        for team in teams {
            if team.played() == 0 && team.avg_points != 0.0 {
                warn!("team {:?} has no games played; ignoring avgPoints {}", team.id, team.avg_points);
            }
        }

        let averages: Vec<f64> = teams.iter().map(TeamRecord::effective_avg_points).collect();
        let std_dev = match std_dev {
            Some(sd) => sd,
            None => estimate_league_std_dev(&averages),
        };

        ScoreModel {
            teams: averages
                .iter()
                .map(|&mean| ScoreDistribution::new(mean, std_dev))
                .collect(),
            bye: ScoreDistribution::new(league_mean(&averages), std_dev),
            std_dev,
        }
    }
}

/// Mean of the team averages, 0 for an empty slice.
pub fn league_mean(averages: &[f64]) -> f64 {
    if averages.is_empty() {
        return 0.0;
    }
    averages.iter().sum::<f64>() / averages.len() as f64
}

/// Estimate the weekly score deviation from the spread of team averages.
///
/// Sample deviation (n - 1 denominator) scaled by [`STD_DEV_MULTIPLIER`] and
/// floored at [`MIN_STD_DEV`]. Fewer than two teams gives the floor.
pub fn estimate_league_std_dev(averages: &[f64]) -> f64 {
    let raw = if averages.len() < 2 {
        0.0
    } else {
        let mean = league_mean(averages);
        let sum_sq: f64 = averages.iter().map(|a| (a - mean).powi(2)).sum();
        (sum_sq / (averages.len() - 1) as f64).sqrt()
    };

    let scaled = raw * STD_DEV_MULTIPLIER;
    if scaled < MIN_STD_DEV {
        debug!(raw, scaled, floor = MIN_STD_DEV, "league std dev below floor");
        MIN_STD_DEV
    } else {
        debug!(raw, scaled, "estimated league std dev");
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Record;

    fn team(id: &str, avg: f64) -> TeamRecord {
        TeamRecord::new(id, Record { wins: 3, losses: 3, ties: 0 }, avg, avg * 6.0)
    }

    #[test]
    fn test_estimate_spread_league() {
        // Sample sd of [80, 100, 120] is 20
        let sd = estimate_league_std_dev(&[80.0, 100.0, 120.0]);
        assert!((sd - 30.0).abs() < 1e-10);
    }

    #[test]
    fn test_estimate_floor_for_identical_averages() {
        assert_eq!(estimate_league_std_dev(&[100.0, 100.0, 100.0]), MIN_STD_DEV);
    }

    #[test]
    fn test_estimate_floor_for_single_team() {
        assert_eq!(estimate_league_std_dev(&[123.0]), MIN_STD_DEV);
        assert_eq!(estimate_league_std_dev(&[]), MIN_STD_DEV);
    }

    #[test]
    fn test_estimate_floor_for_tight_league() {
        // Sample sd of [100, 102] is sqrt(2), scaled ~2.12, floored
        assert_eq!(estimate_league_std_dev(&[100.0, 102.0]), MIN_STD_DEV);
    }

    #[test]
    fn test_model_uses_explicit_std_dev() {
        let teams = vec![team("A", 80.0), team("B", 120.0)];
        let model = ScoreModel::new(&teams, Some(15.0));
        assert_eq!(model.std_dev, 15.0);
        assert!(model.teams.iter().all(|d| d.std_dev == 15.0));
        assert_eq!(model.teams[0].mean, 80.0);
        assert_eq!(model.teams[1].mean, 120.0);
    }

    #[test]
    fn test_bye_opponent_is_league_mean() {
        let teams = vec![team("A", 90.0), team("B", 100.0), team("C", 110.0)];
        let model = ScoreModel::new(&teams, None);
        assert!((model.bye.mean - 100.0).abs() < 1e-10);
        assert_eq!(model.bye.std_dev, model.std_dev);
    }

    #[test]
    fn test_unplayed_team_mean_is_zero() {
        let unplayed = TeamRecord::new("Z", Record::default(), 95.0, 0.0);
        let model = ScoreModel::new(&[unplayed], None);
        assert_eq!(model.teams[0].mean, 0.0);
        assert_eq!(model.std_dev, MIN_STD_DEV);
    }

    #[test]
    fn test_sampler_rejects_negative_std_dev() {
        assert!(ScoreDistribution::new(100.0, -1.0).sampler().is_err());
        assert!(ScoreDistribution::new(100.0, 10.0).sampler().is_ok());
    }
}
