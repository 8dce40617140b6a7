/// Multiplier applied to the spread of team averages when estimating weekly score deviation
pub const STD_DEV_MULTIPLIER: f64 = 1.5;

/// Lower bound for the estimated weekly score standard deviation (points)
pub const MIN_STD_DEV: f64 = 6.0;

/// Scores within this many points of each other split the game as a half-win each.
/// Tunable heuristic, not a property of the score model.
pub const NEAR_TIE_MARGIN: f64 = 0.5;

/// Substituted for a zero standard deviation in analytic win probability
pub const STD_DEV_EPSILON: f64 = 1e-6;

/// Default number of weeks left in the season
pub const DEFAULT_REMAINING_WEEKS: i64 = 6;

/// Default number of qualifying places
pub const DEFAULT_PLAYOFF_SPOTS: i64 = 6;

/// Default number of Monte Carlo trials
pub const DEFAULT_TRIALS: i64 = 2000;

/// Trials per independently seeded random stream
pub const TRIALS_PER_BLOCK: usize = 256;
