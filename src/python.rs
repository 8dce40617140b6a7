use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::aggregate::TeamReport;
use crate::config::SimulateInput;
use crate::constants::{
    DEFAULT_PLAYOFF_SPOTS, DEFAULT_REMAINING_WEEKS, DEFAULT_TRIALS, MIN_STD_DEV, NEAR_TIE_MARGIN,
    STD_DEV_MULTIPLIER,
};
use crate::error::{RecordParseError, SimError};
use crate::score_model::ScoreDistribution;
use crate::season::simulate;
use crate::sensitivity::{playoff_sensitivity, TeamSensitivity};
use crate::team::TeamRecord;
use crate::win_prob::{win_probability, MatchupOdds};

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<RecordParseError> for PyErr {
    fn from(err: RecordParseError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymethods]
impl TeamRecord {
    /// Create a team from its standings string, e.g. `"5-2-1"`.
    #[new]
    #[pyo3(signature = (id, record, avg_points, points_for, name = String::new(), manager = String::new()))]
    fn py_new(
        id: String,
        record: &str,
        avg_points: f64,
        points_for: f64,
        name: String,
        manager: String,
    ) -> PyResult<Self> {
        Ok(TeamRecord::from_record_str(id, name, manager, record, avg_points, points_for)?)
    }

    fn __repr__(&self) -> String {
        format!(
            "TeamRecord({:?}, {}, avg={}, pf={})",
            self.id,
            self.record(),
            self.avg_points,
            self.points_for
        )
    }
}

#[pymethods]
impl TeamReport {
    fn __repr__(&self) -> String {
        format!(
            "TeamReport({:?}, playoff={:.3}, expected={:.2}, likely={})",
            self.id, self.playoff_probability, self.expected_place, self.most_likely_place
        )
    }
}

fn make_input(
    teams: Vec<TeamRecord>,
    remaining_weeks: i64,
    playoff_spots: i64,
    trials: i64,
    score_std_dev: Option<f64>,
    seed: Option<u64>,
    schedule: Option<Vec<Vec<Vec<String>>>>,
) -> SimulateInput {
    SimulateInput {
        teams,
        remaining_weeks,
        playoff_spots,
        trials,
        score_std_dev,
        seed,
        schedule,
    }
}

/// Simulate the rest of the season and return one report per team.
#[pyfunction(name = "simulate")]
#[pyo3(signature = (
    teams,
    remaining_weeks = DEFAULT_REMAINING_WEEKS,
    playoff_spots = DEFAULT_PLAYOFF_SPOTS,
    trials = DEFAULT_TRIALS,
    score_std_dev = None,
    seed = None,
    schedule = None
))]
fn py_simulate(
    py: Python<'_>,
    teams: Vec<TeamRecord>,
    remaining_weeks: i64,
    playoff_spots: i64,
    trials: i64,
    score_std_dev: Option<f64>,
    seed: Option<u64>,
    schedule: Option<Vec<Vec<Vec<String>>>>,
) -> PyResult<Vec<TeamReport>> {
    let input = make_input(teams, remaining_weeks, playoff_spots, trials, score_std_dev, seed, schedule);
    let output = py.allow_threads(|| simulate(&input))?;
    Ok(output.reports)
}

/// Probability that a team scoring N(mean_a, sd_a) outscores one scoring N(mean_b, sd_b).
#[pyfunction(name = "win_probability")]
fn py_win_probability(mean_a: f64, sd_a: f64, mean_b: f64, sd_b: f64) -> f64 {
    win_probability(&ScoreDistribution::new(mean_a, sd_a), &ScoreDistribution::new(mean_b, sd_b))
}

/// Playoff odds of every team with its average shifted up and down by `point_delta`.
#[pyfunction(name = "playoff_sensitivity")]
#[pyo3(signature = (
    teams,
    point_delta = 5.0,
    remaining_weeks = DEFAULT_REMAINING_WEEKS,
    playoff_spots = DEFAULT_PLAYOFF_SPOTS,
    trials = DEFAULT_TRIALS,
    score_std_dev = None,
    seed = None
))]
fn py_playoff_sensitivity(
    py: Python<'_>,
    teams: Vec<TeamRecord>,
    point_delta: f64,
    remaining_weeks: i64,
    playoff_spots: i64,
    trials: i64,
    score_std_dev: Option<f64>,
    seed: Option<u64>,
) -> PyResult<Vec<TeamSensitivity>> {
    let input = make_input(teams, remaining_weeks, playoff_spots, trials, score_std_dev, seed, None);
    Ok(py.allow_threads(|| playoff_sensitivity(&input, point_delta))?)
}

/// Python module definition
#[pymodule]
fn playoff_odds(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<TeamRecord>()?;
    m.add_class::<TeamReport>()?;
    m.add_class::<MatchupOdds>()?;
    m.add_class::<TeamSensitivity>()?;

    // Functions
    m.add_function(wrap_pyfunction!(py_simulate, m)?)?;
    m.add_function(wrap_pyfunction!(py_win_probability, m)?)?;
    m.add_function(wrap_pyfunction!(py_playoff_sensitivity, m)?)?;

    // Tunables
    m.add("STD_DEV_MULTIPLIER", STD_DEV_MULTIPLIER)?;
    m.add("MIN_STD_DEV", MIN_STD_DEV)?;
    m.add("NEAR_TIE_MARGIN", NEAR_TIE_MARGIN)?;

    Ok(())
}
