use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

use crate::error::{Result, SimError};
use crate::team::TeamRecord;

/// One game in a week, by team index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matchup {
    Game(usize, usize),
    /// Team plays the league-average bye opponent
    Bye(usize),
}

impl Matchup {
    pub fn teams(&self) -> (usize, Option<usize>) {
        match *self {
            Matchup::Game(a, b) => (a, Some(b)),
            Matchup::Bye(a) => (a, None),
        }
    }
}

/// Pairings for the remaining weeks, shared by every trial of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    weeks: Vec<Vec<Matchup>>,
}

impl Schedule {
    pub fn new(weeks: Vec<Vec<Matchup>>) -> Self {
        Schedule { weeks }
    }

    /// Random pairings for `weeks` weeks of a `team_count` league.
    ///
    /// Each week is an independent shuffle paired off in order, with the last
    /// team taking a bye when the count is odd. Repeat matchups across weeks are
    /// allowed and nothing balances the schedule.
    pub fn generate<R: Rng + ?Sized>(team_count: usize, weeks: usize, rng: &mut R) -> Self {
        let mut ids: Vec<usize> = (0..team_count).collect();
        let schedule = (0..weeks)
            .map(|_| {
                ids.shuffle(rng);
                ids.chunks(2)
                    .map(|pair| match *pair {
                        [a, b] => Matchup::Game(a, b),
                        [a] => Matchup::Bye(a),
                        _ => unreachable!("chunks(2) yields one or two items"),
                    })
                    .collect()
            })
            .collect();

        Schedule { weeks: schedule }
    }

    /// Build a schedule from a caller's real fixtures.
    ///
    /// Each week is a list of games; a game lists two team ids, or one id for a
    /// bye. Teams missing from a week sit that week out.
    pub fn from_pairs(teams: &[TeamRecord], weeks: &[Vec<Vec<String>>]) -> Result<Self> {
        let index: HashMap<&str, usize> = teams
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();
        let lookup = |id: &String| {
            index
                .get(id.as_str())
                .copied()
                .ok_or_else(|| SimError::UnknownTeam(id.clone()))
        };

        let mut schedule = Vec::with_capacity(weeks.len());
        for (week_no, games) in weeks.iter().enumerate() {
            let mut scheduled = vec![false; teams.len()];
            let mut week = Vec::with_capacity(games.len());

            for game in games {
                let matchup = match game.as_slice() {
                    [a, b] => {
                        let (a, b) = (lookup(a)?, lookup(b)?);
                        if a == b {
                            return Err(SimError::InvalidSchedule(format!(
                                "week {}: {:?} paired with itself",
                                week_no + 1,
                                teams[a].id
                            )));
                        }
                        Matchup::Game(a, b)
                    }
                    [a] => Matchup::Bye(lookup(a)?),
                    _ => {
                        return Err(SimError::InvalidSchedule(format!(
                            "week {}: a game needs one or two team ids, got {}",
                            week_no + 1,
                            game.len()
                        )))
                    }
                };

                let (a, b) = matchup.teams();
                for team in std::iter::once(a).chain(b) {
                    if std::mem::replace(&mut scheduled[team], true) {
                        return Err(SimError::InvalidSchedule(format!(
                            "week {}: {:?} scheduled more than once",
                            week_no + 1,
                            teams[team].id
                        )));
                    }
                }
                week.push(matchup);
            }
            schedule.push(week);
        }

        Ok(Schedule { weeks: schedule })
    }

    pub fn weeks(&self) -> &[Vec<Matchup>] {
        &self.weeks
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Total number of byes across all weeks.
    pub fn bye_count(&self) -> usize {
        self.weeks
            .iter()
            .flatten()
            .filter(|m| matches!(m, Matchup::Bye(_)))
            .count()
    }
}
