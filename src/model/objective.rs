//! Named objective aggregators.

use crate::error::AssignError;
use std::fmt;
use std::str::FromStr;

/// Aggregation of per-group statistic values into one solution score.
///
/// Scores are always minimized: the `Maximize*` variants return the
/// negated aggregate so every solver can assume minimization.
///
/// # Examples
///
/// ```
/// use u_assign::model::Objective;
///
/// let obj: Objective = "maximize_min_of_single_statistic".parse().unwrap();
/// assert_eq!(obj, Objective::MaximizeMin);
/// assert_eq!(obj.aggregate(&[3.0, 1.0, 2.0]), -1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Objective {
    /// Minimize the sum of statistic values.
    MinimizeSum,
    /// Minimize the smallest statistic value.
    MinimizeMin,
    /// Minimize the largest statistic value (bottleneck).
    MinimizeMax,
    /// Maximize the sum of statistic values.
    MaximizeSum,
    /// Maximize the smallest statistic value.
    MaximizeMin,
    /// Maximize the largest statistic value.
    MaximizeMax,
}

impl Objective {
    /// All named objectives.
    pub const ALL: [Objective; 6] = [
        Objective::MinimizeSum,
        Objective::MinimizeMin,
        Objective::MinimizeMax,
        Objective::MaximizeSum,
        Objective::MaximizeMin,
        Objective::MaximizeMax,
    ];

    /// Canonical name of this objective.
    pub fn name(self) -> &'static str {
        match self {
            Objective::MinimizeSum => "minimize_sum_of_single_statistic",
            Objective::MinimizeMin => "minimize_min_of_single_statistic",
            Objective::MinimizeMax => "minimize_max_of_single_statistic",
            Objective::MaximizeSum => "maximize_sum_of_single_statistic",
            Objective::MaximizeMin => "maximize_min_of_single_statistic",
            Objective::MaximizeMax => "maximize_max_of_single_statistic",
        }
    }

    /// Aggregates statistic values into a score to be minimized.
    ///
    /// Over an empty slice, sum is `0`, min is `+inf` and max is `-inf`
    /// (before negation).
    pub fn aggregate(self, stats: &[f64]) -> f64 {
        let sum = || stats.iter().sum::<f64>();
        let min = || stats.iter().copied().fold(f64::INFINITY, f64::min);
        let max = || stats.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        match self {
            Objective::MinimizeSum => sum(),
            Objective::MinimizeMin => min(),
            Objective::MinimizeMax => max(),
            Objective::MaximizeSum => -sum(),
            Objective::MaximizeMin => -min(),
            Objective::MaximizeMax => -max(),
        }
    }
}

impl FromStr for Objective {
    type Err = AssignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Objective::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| AssignError::UnknownObjective(s.to_string()))
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
