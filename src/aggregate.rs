use serde::{Deserialize, Serialize};

use crate::team::TeamRecord;

/// Playoff odds for one team.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    pub id: String,

    /// Fraction of trials finishing inside the playoff places
    pub playoff_probability: f64,

    /// Mean finishing place, 1 = best
    pub expected_place: f64,

    /// Most frequent finishing place; the best place wins ties
    pub most_likely_place: usize,

    /// Entry `p` is the fraction of trials finishing in place `p + 1`
    pub place_distribution: Vec<f64>,
}

/// Count of trials ending in each place, per team.
///
/// Stored as a flat `team_count × team_count` matrix, row per team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceTally {
    team_count: usize,
    counts: Vec<u64>,
    trials: u64,
}

impl PlaceTally {
    pub fn new(team_count: usize) -> Self {
        PlaceTally {
            team_count,
            counts: vec![0; team_count * team_count],
            trials: 0,
        }
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Record one trial. `places[team]` is that team's 1-based place.
    pub fn record(&mut self, places: &[usize]) {
        self.record_n(places, 1);
    }

    /// Record `times` identical trials.
    pub fn record_n(&mut self, places: &[usize], times: u64) {
        debug_assert_eq!(places.len(), self.team_count);
        for (team, &place) in places.iter().enumerate() {
            self.counts[team * self.team_count + place - 1] += times;
        }
        self.trials += times;
    }

    /// Add another tally's counts into this one.
    pub fn merge(&mut self, other: &PlaceTally) {
        debug_assert_eq!(self.team_count, other.team_count);
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.trials += other.trials;
    }

    pub fn counts_for(&self, team: usize) -> &[u64] {
        let start = team * self.team_count;
        &self.counts[start..start + self.team_count]
    }

    /// Turn the counts into one report per team, in team order.
    pub fn to_reports(&self, teams: &[TeamRecord], playoff_spots: usize) -> Vec<TeamReport> {
        let trials = self.trials.max(1) as f64;

        teams
            .iter()
            .enumerate()
            .map(|(team, record)| {
                let counts = self.counts_for(team);
                let place_distribution: Vec<f64> = counts.iter().map(|&c| c as f64 / trials).collect();

                let playoff_probability: f64 = place_distribution[..playoff_spots].iter().sum();
                let expected_place: f64 = place_distribution
                    .iter()
                    .enumerate()
                    .map(|(p, share)| share * (p + 1) as f64)
                    .sum();

                TeamReport {
                    id: record.id.clone(),
                    playoff_probability,
                    expected_place,
                    most_likely_place: most_likely_place(counts),
                    place_distribution,
                }
            })
            .collect()
    }
}

/// 1-based index of the largest count, lowest index on ties.
fn most_likely_place(counts: &[u64]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Record;

    fn make_teams(n: usize) -> Vec<TeamRecord> {
        (0..n)
            .map(|i| TeamRecord::new(format!("T{}", i), Record::default(), 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_reports_from_counts() {
        let teams = make_teams(3);
        let mut tally = PlaceTally::new(3);
        tally.record(&[1, 2, 3]);
        tally.record(&[1, 3, 2]);
        tally.record(&[2, 1, 3]);
        tally.record(&[1, 2, 3]);

        let reports = tally.to_reports(&teams, 2);
        assert_eq!(tally.trials(), 4);

        let t0 = &reports[0];
        assert_eq!(t0.id, "T0");
        assert_eq!(t0.place_distribution, vec![0.75, 0.25, 0.0]);
        assert!((t0.playoff_probability - 1.0).abs() < 1e-12);
        assert!((t0.expected_place - 1.25).abs() < 1e-12);
        assert_eq!(t0.most_likely_place, 1);

        let t2 = &reports[2];
        assert_eq!(t2.place_distribution, vec![0.0, 0.25, 0.75]);
        assert!((t2.playoff_probability - 0.25).abs() < 1e-12);
        assert!((t2.expected_place - 2.75).abs() < 1e-12);
        assert_eq!(t2.most_likely_place, 3);
    }

    #[test]
    fn test_most_likely_place_prefers_best_on_tie() {
        assert_eq!(most_likely_place(&[0, 5, 5, 1]), 2);
        assert_eq!(most_likely_place(&[3, 3, 3]), 1);
        assert_eq!(most_likely_place(&[0, 0, 7]), 3);
    }

    #[test]
    fn test_record_n_matches_repeated_record() {
        let mut once = PlaceTally::new(2);
        for _ in 0..5 {
            once.record(&[2, 1]);
        }
        let mut bulk = PlaceTally::new(2);
        bulk.record_n(&[2, 1], 5);
        assert_eq!(once, bulk);
    }

    #[test]
    fn test_merge() {
        let mut a = PlaceTally::new(2);
        a.record(&[1, 2]);
        let mut b = PlaceTally::new(2);
        b.record(&[2, 1]);
        b.record(&[2, 1]);

        a.merge(&b);
        assert_eq!(a.trials(), 3);
        assert_eq!(a.counts_for(0), &[1, 2]);
        assert_eq!(a.counts_for(1), &[2, 1]);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let teams = make_teams(4);
        let mut tally = PlaceTally::new(4);
        tally.record(&[1, 2, 3, 4]);
        tally.record(&[4, 3, 2, 1]);
        tally.record(&[2, 1, 4, 3]);

        for report in tally.to_reports(&teams, 3) {
            let sum: f64 = report.place_distribution.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            let head: f64 = report.place_distribution[..3].iter().sum();
            assert_eq!(report.playoff_probability, head);
        }
    }
}
