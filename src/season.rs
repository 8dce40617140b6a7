use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregate::{PlaceTally, TeamReport};
use crate::config::{SimulateInput, SimulationConfig};
use crate::constants::TRIALS_PER_BLOCK;
use crate::error::Result;
use crate::game::play_game;
use crate::ranking::assign_places;
use crate::schedule::{Matchup, Schedule};
use crate::score_model::ScoreModel;
use crate::team::TeamRecord;
use crate::win_prob::{matchup_odds, MatchupOdds};

/// Playoff odds for every team in the league.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateOutput {
    /// One report per input team, in input order
    pub reports: Vec<TeamReport>,

    /// Weekly score deviation the run used, explicit or estimated
    pub score_std_dev: f64,
}

impl SimulateOutput {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn report(&self, id: &str) -> Option<&TeamReport> {
        self.reports.iter().find(|r| r.id == id)
    }
}

/// Run a complete playoff-odds simulation.
pub fn simulate(input: &SimulateInput) -> Result<SimulateOutput> {
    Ok(Season::new(input)?.run())
}

/// Random stream `stream` of the run seeded with `seed`.
///
/// Stream 0 draws the synthetic schedule; trial block `k` uses stream `k + 1`.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Per-trial working arrays, reused across the trials of one block.
struct TrialScratch {
    half_wins: Vec<u64>,
    order: Vec<usize>,
    places: Vec<usize>,
}

impl TrialScratch {
    fn new(team_count: usize) -> Self {
        TrialScratch {
            half_wins: vec![0; team_count],
            order: vec![0; team_count],
            places: vec![0; team_count],
        }
    }
}

/// A validated league ready to simulate.
///
/// The schedule is fixed when the season is built; every trial replays it with
/// freshly sampled scores.
#[derive(Clone, Debug)]
pub struct Season {
    teams: Vec<TeamRecord>,
    config: SimulationConfig,
    model: ScoreModel,
    schedule: Schedule,
    seed: u64,
    samplers: Vec<Normal<f64>>,
    bye_sampler: Normal<f64>,
    base_half_wins: Vec<u64>,
    projected_points: Vec<f64>,
}

impl Season {
    pub fn new(input: &SimulateInput) -> Result<Self> {
        let config = input.validate()?;
        let teams = input.teams.clone();

        info!(
            teams = teams.len(),
            weeks = config.remaining_weeks,
            trials = config.trials,
            playoff_spots = config.playoff_spots,
            "simulating playoff odds"
        );

        let model = ScoreModel::new(&teams, config.score_std_dev);
        let seed = config.seed.unwrap_or_else(rand::random);

        let schedule = match &input.schedule {
            Some(weeks) => Schedule::from_pairs(&teams, weeks)?,
            None => Schedule::generate(teams.len(), config.remaining_weeks, &mut stream_rng(seed, 0)),
        };
        if schedule.bye_count() > 0 {
            debug!(byes = schedule.bye_count(), "schedule includes byes against the league average");
        }

        let samplers = model
            .teams
            .iter()
            .map(|d| d.sampler())
            .collect::<Result<Vec<_>>>()?;
        let bye_sampler = model.bye.sampler()?;

        let base_half_wins = teams.iter().map(|t| u64::from(t.wins) * 2).collect();
        let projected_points = teams
            .iter()
            .map(|t| t.projected_points_for(schedule.len()))
            .collect();

        Ok(Season {
            teams,
            config,
            model,
            schedule,
            seed,
            samplers,
            bye_sampler,
            base_half_wins,
            projected_points,
        })
    }

    pub fn teams(&self) -> &[TeamRecord] {
        &self.teams
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Analytic win probability for each remaining game.
    pub fn matchup_odds(&self) -> Vec<MatchupOdds> {
        matchup_odds(&self.teams, &self.model, &self.schedule)
    }

    /// Run every trial and aggregate the finishing places.
    pub fn run(&self) -> SimulateOutput {
        let tally = self.run_trials();
        SimulateOutput {
            reports: tally.to_reports(&self.teams, self.config.playoff_spots),
            score_std_dev: self.model.std_dev,
        }
    }

    /// Run every trial and return the raw place counts.
    pub fn run_trials(&self) -> PlaceTally {
        let team_count = self.teams.len();
        let trials = self.config.trials;

        // Without games left every trial ends the same way
        if self.schedule.weeks().iter().all(|week| week.is_empty()) {
            debug!("no games remaining; ranking current standings once");
            let mut scratch = TrialScratch::new(team_count);
            let mut rng = stream_rng(self.seed, 1);
            self.simulate_season(&mut rng, &mut scratch);

            let mut tally = PlaceTally::new(team_count);
            tally.record_n(&scratch.places, trials as u64);
            return tally;
        }

        let blocks = trials.div_ceil(TRIALS_PER_BLOCK);
        (0..blocks)
            .into_par_iter()
            .map(|block| {
                let start = block * TRIALS_PER_BLOCK;
                let count = TRIALS_PER_BLOCK.min(trials - start);
                let mut rng = stream_rng(self.seed, block as u64 + 1);
                let mut scratch = TrialScratch::new(team_count);
                let mut tally = PlaceTally::new(team_count);

                for _ in 0..count {
                    self.simulate_season(&mut rng, &mut scratch);
                    tally.record(&scratch.places);
                }
                tally
            })
            .reduce(
                || PlaceTally::new(team_count),
                |mut acc, tally| {
                    acc.merge(&tally);
                    acc
                },
            )
    }

    /// Play out the remaining schedule once and rank the league into `scratch.places`.
    fn simulate_season<R: Rng + ?Sized>(&self, rng: &mut R, scratch: &mut TrialScratch) {
        scratch.half_wins.copy_from_slice(&self.base_half_wins);

        for week in self.schedule.weeks() {
            for matchup in week {
                match *matchup {
                    Matchup::Game(a, b) => {
                        let (first, second) = play_game(&self.samplers[a], &self.samplers[b], rng).half_wins();
                        scratch.half_wins[a] += first;
                        scratch.half_wins[b] += second;
                    }
                    Matchup::Bye(a) => {
                        let (first, _) = play_game(&self.samplers[a], &self.bye_sampler, rng).half_wins();
                        scratch.half_wins[a] += first;
                    }
                }
            }
        }

        assign_places(
            &scratch.half_wins,
            &self.projected_points,
            &mut scratch.order,
            &mut scratch.places,
        );
    }
}
