use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::constants::STD_DEV_EPSILON;
use crate::schedule::{Matchup, Schedule};
use crate::score_model::{ScoreDistribution, ScoreModel};
use crate::team::TeamRecord;

/// Probability that a score drawn from `a` beats one drawn from `b`.
///
/// The difference of two independent normals is normal with mean
/// `a.mean - b.mean` and variance `a.std_dev² + b.std_dev²`; the result is the
/// standard normal CDF at the standardized mean.
///
/// Descriptive only. The season simulator samples scores instead.
pub fn win_probability(a: &ScoreDistribution, b: &ScoreDistribution) -> f64 {
    let mean = a.mean - b.mean;
    let mut std_dev = (a.std_dev.powi(2) + b.std_dev.powi(2)).sqrt();
    if std_dev == 0.0 {
        std_dev = STD_DEV_EPSILON;
    }

    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(mean / std_dev)
}

/// Analytic odds for one scheduled game.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupOdds {
    /// 1-based week of the remaining schedule
    pub week: usize,
    pub home: String,
    /// `None` for a bye against the league-average opponent
    pub away: Option<String>,
    pub home_win_probability: f64,
}

/// Analytic win probability for every game in `schedule`.
pub fn matchup_odds(teams: &[TeamRecord], model: &ScoreModel, schedule: &Schedule) -> Vec<MatchupOdds> {
    schedule
        .weeks()
        .iter()
        .enumerate()
        .flat_map(|(week, games)| {
            games.iter().map(move |matchup| {
                let (home, away) = matchup.teams();
                let opponent = match matchup {
                    Matchup::Game(_, b) => &model.teams[*b],
                    Matchup::Bye(_) => &model.bye,
                };
                MatchupOdds {
                    week: week + 1,
                    home: teams[home].id.clone(),
                    away: away.map(|b| teams[b].id.clone()),
                    home_win_probability: win_probability(&model.teams[home], opponent),
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Record;

    #[test]
    fn test_equal_teams_50_50() {
        let a = ScoreDistribution::new(100.0, 15.0);
        let b = ScoreDistribution::new(100.0, 15.0);
        let prob = win_probability(&a, &b);
        assert!((prob - 0.5).abs() < 1e-9, "Equal teams should have 50% win probability");
    }

    #[test]
    fn test_better_team_favored() {
        let strong = ScoreDistribution::new(120.0, 15.0);
        let weak = ScoreDistribution::new(90.0, 15.0);
        let prob = win_probability(&strong, &weak);
        assert!(prob > 0.9, "Strong team should be heavily favored");
        assert!(prob < 1.0, "Probability should be less than 1");
    }

    #[test]
    fn test_known_value() {
        // Difference ~ N(10, 10² + 0) → z = 1
        let a = ScoreDistribution::new(110.0, 10.0);
        let b = ScoreDistribution::new(100.0, 0.0);
        assert!((win_probability(&a, &b) - 0.841_344_746).abs() < 1e-6);
    }

    #[test]
    fn test_symmetric() {
        let a = ScoreDistribution::new(104.3, 12.0);
        let b = ScoreDistribution::new(97.1, 18.0);
        let p1 = win_probability(&a, &b);
        let p2 = win_probability(&b, &a);
        assert!((p1 + p2 - 1.0).abs() < 1e-10, "P(A beats B) + P(B beats A) should equal 1");
    }

    #[test]
    fn test_zero_variance_does_not_divide_by_zero() {
        let a = ScoreDistribution::new(101.0, 0.0);
        let b = ScoreDistribution::new(100.0, 0.0);
        assert!((win_probability(&a, &b) - 1.0).abs() < 1e-12);
        assert!(win_probability(&b, &a).abs() < 1e-12);

        let same = win_probability(&a, &a);
        assert!((same - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_matchup_odds() {
        let record = Record { wins: 2, losses: 2, ties: 0 };
        let teams = vec![
            TeamRecord::new("A", record, 110.0, 440.0),
            TeamRecord::new("B", record, 100.0, 400.0),
            TeamRecord::new("C", record, 90.0, 360.0),
        ];
        let model = ScoreModel::new(&teams, Some(10.0));
        let schedule = Schedule::new(vec![vec![Matchup::Game(0, 1), Matchup::Bye(2)]]);

        let odds = matchup_odds(&teams, &model, &schedule);
        assert_eq!(odds.len(), 2);

        assert_eq!(odds[0].week, 1);
        assert_eq!(odds[0].home, "A");
        assert_eq!(odds[0].away.as_deref(), Some("B"));
        assert!(odds[0].home_win_probability > 0.5);

        // C (90) against the league mean (100)
        assert_eq!(odds[1].home, "C");
        assert_eq!(odds[1].away, None);
        assert!(odds[1].home_win_probability < 0.5);
    }
}
