use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimulateInput;
use crate::error::{Result, SimError};
use crate::season::simulate;

/// How a team's playoff odds respond to a shift in its scoring average.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSensitivity {
    pub id: String,
    pub point_delta: f64,
    pub baseline: f64,
    /// Playoff probability with the average raised by `point_delta`
    pub improved: f64,
    /// Playoff probability with the average lowered by `point_delta`
    pub worsened: f64,
}

impl TeamSensitivity {
    /// Probability swing between the improved and worsened runs.
    pub fn swing(&self) -> f64 {
        self.improved - self.worsened
    }
}

/// Pin the seed so every variant of a request shares its schedule and score streams.
fn pinned(input: &SimulateInput) -> SimulateInput {
    let mut pinned = input.clone();
    pinned.seed = Some(input.seed.unwrap_or_else(rand::random));
    pinned
}

fn playoff_probability(input: &SimulateInput, team_id: &str) -> Result<f64> {
    let output = simulate(input)?;
    output
        .report(team_id)
        .map(|r| r.playoff_probability)
        .ok_or_else(|| SimError::UnknownTeam(team_id.to_string()))
}

fn adjusted(input: &SimulateInput, team_id: &str, points: f64) -> SimulateInput {
    let mut adjusted = input.clone();
    for team in adjusted.teams.iter_mut().filter(|t| t.id == team_id) {
        *team = team.with_adjustment(points);
    }
    adjusted
}

fn sensitivity_with_baseline(
    input: &SimulateInput,
    team_id: &str,
    point_delta: f64,
    baseline: f64,
) -> Result<TeamSensitivity> {
    Ok(TeamSensitivity {
        id: team_id.to_string(),
        point_delta,
        baseline,
        improved: playoff_probability(&adjusted(input, team_id, point_delta), team_id)?,
        worsened: playoff_probability(&adjusted(input, team_id, -point_delta), team_id)?,
    })
}

/// Playoff sensitivity of one team to a `point_delta` change in its average.
pub fn team_sensitivity(input: &SimulateInput, team_id: &str, point_delta: f64) -> Result<TeamSensitivity> {
    if !input.teams.iter().any(|t| t.id == team_id) {
        return Err(SimError::UnknownTeam(team_id.to_string()));
    }

    let input = pinned(input);
    let baseline = playoff_probability(&input, team_id)?;
    sensitivity_with_baseline(&input, team_id, point_delta, baseline)
}

/// Playoff sensitivity of every team, computed in parallel.
pub fn playoff_sensitivity(input: &SimulateInput, point_delta: f64) -> Result<Vec<TeamSensitivity>> {
    let input = pinned(input);
    let baseline = simulate(&input)?;

    baseline
        .reports
        .par_iter()
        .map(|report| sensitivity_with_baseline(&input, &report.id, point_delta, report.playoff_probability))
        .collect()
}
