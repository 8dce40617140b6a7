use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RecordParseError;

/// Win/loss/tie counts parsed from a standings string such as `"7-3"` or `"7-3-1"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn played(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses) + u64::from(self.ties)
    }
}

impl FromStr for Record {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').map(str::trim).collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(RecordParseError::Format(s.to_string()));
        }

        let count = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| RecordParseError::Count(part.to_string()))
        };

        Ok(Record {
            wins: count(parts[0])?,
            losses: count(parts[1])?,
            ties: match parts.get(2) {
                Some(t) => count(t)?,
                None => 0,
            },
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// A team's standing going into the simulated remainder of the season.
///
/// `name` and `manager` are display metadata and never influence the simulation.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub manager: String,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    #[serde(default)]
    pub ties: u32,

    /// Mean points scored per played week
    #[serde(default)]
    pub avg_points: f64,

    /// Cumulative points scored so far
    #[serde(default)]
    pub points_for: f64,
}

impl TeamRecord {
    pub fn new(id: impl Into<String>, record: Record, avg_points: f64, points_for: f64) -> Self {
        TeamRecord {
            id: id.into(),
            name: String::new(),
            manager: String::new(),
            wins: record.wins,
            losses: record.losses,
            ties: record.ties,
            avg_points,
            points_for,
        }
    }

    /// Build a team from a standings string like `"5-2-1"`.
    pub fn from_record_str(
        id: impl Into<String>,
        name: impl Into<String>,
        manager: impl Into<String>,
        record: &str,
        avg_points: f64,
        points_for: f64,
    ) -> Result<Self, RecordParseError> {
        let record: Record = record.parse()?;
        Ok(TeamRecord {
            name: name.into(),
            manager: manager.into(),
            ..TeamRecord::new(id, record, avg_points, points_for)
        })
    }

    pub fn record(&self) -> Record {
        Record {
            wins: self.wins,
            losses: self.losses,
            ties: self.ties,
        }
    }

    pub fn played(&self) -> u64 {
        self.record().played()
    }

    /// Average used for simulation. A team with no games has no meaningful average.
    pub fn effective_avg_points(&self) -> f64 {
        if self.played() == 0 {
            0.0
        } else {
            self.avg_points
        }
    }

    /// Points-for after the remaining weeks, assuming the team scores its average.
    pub fn projected_points_for(&self, remaining_weeks: usize) -> f64 {
        self.points_for + remaining_weeks as f64 * self.effective_avg_points()
    }

    /// Copy of this team with its scoring average shifted by `points`.
    pub fn with_adjustment(&self, points: f64) -> Self {
        TeamRecord {
            avg_points: self.avg_points + points,
            ..self.clone()
        }
    }
}
