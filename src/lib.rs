//! Playoff Odds - Monte Carlo playoff projections for a fixed-size league.
//!
//! Each team's remaining weekly scores are drawn from a normal distribution
//! around its scoring average, the rest of the season is replayed many times,
//! and the finishing places are aggregated into playoff odds. Optional Python
//! bindings via PyO3 live behind the `python` feature.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod ranking;
pub mod schedule;
pub mod score_model;
pub mod season;
pub mod sensitivity;
pub mod team;
pub mod win_prob;

#[cfg(feature = "python")]
mod python;

pub use aggregate::{PlaceTally, TeamReport};
pub use config::{SimulateInput, SimulationConfig};
pub use constants::{MIN_STD_DEV, NEAR_TIE_MARGIN, STD_DEV_MULTIPLIER};
pub use error::{RecordParseError, Result, SimError};
pub use schedule::{Matchup, Schedule};
pub use score_model::{estimate_league_std_dev, ScoreDistribution, ScoreModel};
pub use season::{simulate, Season, SimulateOutput};
pub use sensitivity::{playoff_sensitivity, team_sensitivity, TeamSensitivity};
pub use team::{Record, TeamRecord};
pub use win_prob::{matchup_odds, win_probability, MatchupOdds};
