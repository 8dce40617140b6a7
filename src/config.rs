use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{DEFAULT_PLAYOFF_SPOTS, DEFAULT_REMAINING_WEEKS, DEFAULT_TRIALS};
use crate::error::{Result, SimError};
use crate::team::TeamRecord;

fn default_remaining_weeks() -> i64 {
    DEFAULT_REMAINING_WEEKS
}

fn default_playoff_spots() -> i64 {
    DEFAULT_PLAYOFF_SPOTS
}

fn default_trials() -> i64 {
    DEFAULT_TRIALS
}

/// A playoff-odds request as received from a caller.
///
/// Counts are signed so that negative values reach [`SimulateInput::validate`]
/// and are rejected there instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateInput {
    pub teams: Vec<TeamRecord>,

    #[serde(default = "default_remaining_weeks")]
    pub remaining_weeks: i64,

    #[serde(default = "default_playoff_spots")]
    pub playoff_spots: i64,

    #[serde(default = "default_trials")]
    pub trials: i64,

    /// Fixed weekly score deviation for every team; estimated from the league when absent
    #[serde(default)]
    pub score_std_dev: Option<f64>,

    /// Seed for reproducible runs; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Real remaining schedule: one entry per week, each game a pair of ids
    /// (a single id is a bye). Replaces the synthetic schedule when present.
    #[serde(default)]
    pub schedule: Option<Vec<Vec<Vec<String>>>>,
}

impl SimulateInput {
    pub fn new(teams: Vec<TeamRecord>) -> Self {
        SimulateInput {
            teams,
            remaining_weeks: DEFAULT_REMAINING_WEEKS,
            playoff_spots: DEFAULT_PLAYOFF_SPOTS,
            trials: DEFAULT_TRIALS,
            score_std_dev: None,
            seed: None,
            schedule: None,
        }
    }

    pub fn with_remaining_weeks(mut self, weeks: i64) -> Self {
        self.remaining_weeks = weeks;
        self
    }

    pub fn with_playoff_spots(mut self, spots: i64) -> Self {
        self.playoff_spots = spots;
        self
    }

    pub fn with_trials(mut self, trials: i64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_score_std_dev(mut self, std_dev: f64) -> Self {
        self.score_std_dev = Some(std_dev);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_schedule(mut self, schedule: Vec<Vec<Vec<String>>>) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Parse a request from JSON. Malformed JSON is reported as invalid input.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SimError::invalid("request", e.to_string()))
    }

    /// Check the request and produce the configuration the simulator runs with.
    pub fn validate(&self) -> Result<SimulationConfig> {
        if self.teams.is_empty() {
            return Err(SimError::invalid("teams", "at least one team is required"));
        }

        let mut seen = HashSet::new();
        for team in &self.teams {
            if !seen.insert(team.id.as_str()) {
                return Err(SimError::invalid("teams", format!("duplicate team id {:?}", team.id)));
            }
            if !team.avg_points.is_finite() || !team.points_for.is_finite() {
                return Err(SimError::invalid(
                    "teams",
                    format!("team {:?} has non-finite scoring totals", team.id),
                ));
            }
            if team.avg_points < 0.0 || team.points_for < 0.0 {
                return Err(SimError::invalid(
                    "teams",
                    format!("team {:?} has negative scoring totals", team.id),
                ));
            }
        }

        if self.trials < 1 {
            return Err(SimError::invalid("trials", format!("must be >= 1, got {}", self.trials)));
        }

        let team_count = self.teams.len() as i64;
        if self.playoff_spots < 1 || self.playoff_spots > team_count {
            return Err(SimError::invalid(
                "playoffSpots",
                format!("must be within [1, {}], got {}", team_count, self.playoff_spots),
            ));
        }

        if self.remaining_weeks < 0 {
            return Err(SimError::invalid(
                "remainingWeeks",
                format!("must be >= 0, got {}", self.remaining_weeks),
            ));
        }

        if let Some(sd) = self.score_std_dev {
            if !sd.is_finite() || sd <= 0.0 {
                return Err(SimError::invalid(
                    "scoreStdDev",
                    format!("must be a positive number of points, got {}", sd),
                ));
            }
        }

        let remaining_weeks = match &self.schedule {
            Some(weeks) => weeks.len(),
            None => self.remaining_weeks as usize,
        };

        Ok(SimulationConfig {
            remaining_weeks,
            playoff_spots: self.playoff_spots as usize,
            trials: self.trials as usize,
            score_std_dev: self.score_std_dev,
            seed: self.seed,
        })
    }
}

/// Validated simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub remaining_weeks: usize,
    pub playoff_spots: usize,
    pub trials: usize,
    pub score_std_dev: Option<f64>,
    pub seed: Option<u64>,
}
