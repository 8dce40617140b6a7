use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::constants::NEAR_TIE_MARGIN;

/// Result of one simulated game from the first team's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    FirstWins,
    SecondWins,
    /// Scores within [`NEAR_TIE_MARGIN`]; each side gets half a win
    Split,
}

impl GameOutcome {
    /// Half-wins credited to (first, second).
    pub fn half_wins(self) -> (u64, u64) {
        match self {
            GameOutcome::FirstWins => (2, 0),
            GameOutcome::SecondWins => (0, 2),
            GameOutcome::Split => (1, 1),
        }
    }
}

/// Decide a game from two scores.
pub fn decide(first: f64, second: f64) -> GameOutcome {
    if first > second + NEAR_TIE_MARGIN {
        GameOutcome::FirstWins
    } else if second > first + NEAR_TIE_MARGIN {
        GameOutcome::SecondWins
    } else {
        GameOutcome::Split
    }
}

/// Sample both scores independently and decide the game.
pub fn play_game<R: Rng + ?Sized>(first: &Normal<f64>, second: &Normal<f64>, rng: &mut R) -> GameOutcome {
    let first_score = first.sample(rng);
    let second_score = second.sample(rng);
    decide(first_score, second_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_decide_clear_results() {
        assert_eq!(decide(101.0, 100.0), GameOutcome::FirstWins);
        assert_eq!(decide(100.0, 101.0), GameOutcome::SecondWins);
    }

    #[test]
    fn test_decide_near_tie_band() {
        assert_eq!(decide(100.0, 100.0), GameOutcome::Split);
        assert_eq!(decide(100.4, 100.0), GameOutcome::Split);
        assert_eq!(decide(100.0, 100.5), GameOutcome::Split);
        assert_eq!(decide(100.51, 100.0), GameOutcome::FirstWins);
    }

    #[test]
    fn test_half_wins() {
        assert_eq!(GameOutcome::FirstWins.half_wins(), (2, 0));
        assert_eq!(GameOutcome::SecondWins.half_wins(), (0, 2));
        assert_eq!(GameOutcome::Split.half_wins(), (1, 1));
    }

    #[test]
    fn test_play_game_lopsided() {
        let strong = Normal::new(150.0, 5.0).unwrap();
        let weak = Normal::new(50.0, 5.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..100 {
            assert_eq!(play_game(&strong, &weak, &mut rng), GameOutcome::FirstWins);
        }
    }

    #[test]
    fn test_play_game_deterministic() {
        let a = Normal::new(100.0, 15.0).unwrap();
        let b = Normal::new(100.0, 15.0).unwrap();

        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(play_game(&a, &b, &mut rng1), play_game(&a, &b, &mut rng2));
        }
    }
}
