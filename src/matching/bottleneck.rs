//! Minimum-bottleneck (minimax) assignment via threshold search.
//!
//! The minimax value is always one of the matrix's finite cells, so the
//! threshold `t` is bisected over the sorted distinct cell values rather
//! than over the reals. Each round builds the feasibility matrix, in which
//! every cell above `t` is forbidden, and asks the exact solver for a
//! matching of that matrix. A feasible round moves the upper bound to the
//! worst pair of the matching found; an infeasible round moves the lower
//! bound past `t`.
//!
//! The search is exact and needs at most `ceil(log2(cells))` rounds. `hi`
//! is always the worst pair of a known feasible matching.
//!
//! # References
//!
//! Garfinkel (1971), "An Improved Algorithm for the Bottleneck Assignment
//! Problem"

use super::hungarian::solve_min_sum;
use super::matrix::{CostMatrix, Matching};
use crate::error::{AssignError, Result};
use tracing::debug;

/// Configuration for the bottleneck threshold search.
///
/// # Examples
///
/// ```
/// use u_assign::matching::BottleneckConfig;
///
/// let config = BottleneckConfig::default().with_max_rounds(40);
/// assert_eq!(config.max_rounds, 40);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BottleneckConfig {
    /// Maximum number of bisection rounds.
    ///
    /// Rounds never exceed `ceil(log2(cells))`, so the default only caps
    /// pathological sizes. A smaller cap trades optimality for time; the
    /// result is still a feasible matching.
    pub max_rounds: usize,
}

impl Default for BottleneckConfig {
    fn default() -> Self {
        Self { max_rounds: 100 }
    }
}

impl BottleneckConfig {
    /// Sets the maximum number of rounds.
    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(AssignError::InvalidConfig("max_rounds must be > 0".into()));
        }
        Ok(())
    }
}

/// Result of a bottleneck search.
#[derive(Debug, Clone, PartialEq)]
pub struct BottleneckSolution {
    /// Minimum-sum matching among those whose worst pair is `threshold`.
    pub matching: Matching,

    /// Final upper bound: the worst pair cost of `matching`.
    pub threshold: f64,

    /// Number of bisection rounds executed.
    pub rounds: usize,
}

/// Matching minimizing the largest matched cost.
///
/// Covers every entry of the smaller side, like
/// [`solve_min_sum`]. Returns `None` when no finite-cost matching exists
/// even with every finite cell allowed.
///
/// # Examples
///
/// ```
/// use u_assign::matching::{solve_min_max, BottleneckConfig, CostMatrix};
///
/// // Min-sum picks 1 + 10 = 11 (worst 10); minimax picks 6 + 6 (worst 6).
/// let m = CostMatrix::from_rows(vec![vec![1.0, 6.0], vec![6.0, 10.0]]);
/// let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
/// assert_eq!(sol.threshold, 6.0);
/// ```
pub fn solve_min_max(matrix: &CostMatrix, config: &BottleneckConfig) -> Option<BottleneckSolution> {
    if matrix.is_empty() {
        return Some(BottleneckSolution {
            matching: Matching::default(),
            threshold: 0.0,
            rounds: 0,
        });
    }

    let values = matrix.finite_values();
    let widest = *values.last()?;
    let mut best = solve_min_sum(&matrix.thresholded(widest))?;
    let index_of = |cost: f64| values.partition_point(|&v| v < cost);

    // Invariant: values[hi] is feasible, everything below values[lo] is not.
    let mut hi = best
        .bottleneck(matrix)
        .map_or(values.len() - 1, index_of);
    let mut lo = 0;
    let mut rounds = 0;

    while rounds < config.max_rounds && lo < hi {
        rounds += 1;
        let mid = lo + (hi - lo) / 2;
        let t = values[mid];
        match solve_min_sum(&matrix.thresholded(t)) {
            Some(found) => {
                hi = found.bottleneck(matrix).map_or(mid, index_of);
                best = found;
            }
            None => lo = mid + 1,
        }
        debug!(round = rounds, threshold = t, lo, hi, "bottleneck round");
    }

    // Cheapest matching among those within the final threshold.
    let threshold = values[hi];
    if let Some(found) = solve_min_sum(&matrix.thresholded(threshold)) {
        best = found;
    }

    Some(BottleneckSolution {
        matching: best,
        threshold,
        rounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::brute_force;
    use proptest::prelude::*;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn test_worker_job_scenario() {
        let workers = [10.0f64, 50.0, 90.0];
        let jobs = [15.0f64, 55.0, 85.0];
        let m = CostMatrix::from_fn(3, 3, |i, j| (workers[i] - jobs[j]).abs());

        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.matching.bottleneck(&m), Some(5.0));
        assert_eq!(sol.threshold, 5.0);
    }

    #[test]
    fn test_differs_from_min_sum() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 6.0], vec![6.0, 10.0]]);
        assert_eq!(solve_min_sum(&m).unwrap().bottleneck(&m), Some(10.0));

        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.matching.pairs(), &[(0, 1), (1, 0)]);
    }

    #[test]
    fn test_threshold_search_narrows() {
        // Raw min-sum matching has worst pair 100; only the thresholded
        // search finds the worst-pair-50 matching.
        let m = CostMatrix::from_rows(vec![
            vec![0.0, 50.0, 60.0],
            vec![50.0, 0.0, 60.0],
            vec![60.0, 50.0, 100.0],
        ]);
        let raw = solve_min_sum(&m).unwrap();
        assert_eq!(raw.bottleneck(&m), Some(100.0));

        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.matching.bottleneck(&m), Some(60.0));
        assert!(sol.rounds > 0);
    }

    #[test]
    fn test_prefers_min_sum_among_minimax() {
        let m = CostMatrix::from_rows(vec![vec![5.0, 5.0], vec![1.0, 5.0]]);
        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.threshold, 5.0);
        assert_eq!(sol.matching.total_cost(&m), 6.0);
    }

    #[test]
    fn test_negative_costs() {
        let m = CostMatrix::from_rows(vec![vec![-4.0, -1.0], vec![-2.0, -3.0]]);
        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.matching.bottleneck(&m), Some(-3.0));
    }

    #[test]
    fn test_forbidden_cells() {
        let m = CostMatrix::from_rows(vec![vec![INF, 3.0], vec![1.0, INF]]);
        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.matching.pairs(), &[(0, 1), (1, 0)]);

        let dead = CostMatrix::from_rows(vec![vec![INF, 3.0], vec![INF, 1.0]]);
        assert!(solve_min_max(&dead, &BottleneckConfig::default()).is_none());
        assert!(solve_min_max(&CostMatrix::from_fn(1, 1, |_, _| INF), &BottleneckConfig::default()).is_none());
    }

    #[test]
    fn test_zero_rounds_keeps_feasible_matching() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 6.0], vec![6.0, 10.0]]);
        let config = BottleneckConfig::default().with_max_rounds(0);
        let sol = solve_min_max(&m, &config).unwrap();
        assert_eq!(sol.rounds, 0);
        assert_eq!(sol.matching.len(), 2);
    }

    #[test]
    fn test_validate_rounds() {
        assert!(BottleneckConfig::default().with_max_rounds(0).validate().is_err());
        assert!(BottleneckConfig::default().with_max_rounds(1).validate().is_ok());
    }

    #[test]
    fn test_huge_cost_span() {
        // The cheapest and dearest cells are more than f64::MAX apart.
        let m = CostMatrix::from_rows(vec![vec![-1e308, 1e307], vec![1e307, 1e308]]);
        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.threshold, 1e307);
        assert_eq!(sol.matching.bottleneck(&m), Some(1e307));
        assert!(sol.rounds <= 2);
    }

    #[test]
    fn test_near_equal_costs_stay_distinct() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 1.0 + 1e-10], vec![-100.0, 1.0]]);
        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert_eq!(sol.threshold, 1.0);
        assert_eq!(sol.matching.pairs(), &[(0, 0), (1, 1)]);
    }

    #[test]
    fn test_rounds_bounded_by_distinct_values() {
        let m = CostMatrix::from_fn(8, 8, |i, j| (i * 8 + j) as f64);
        let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();
        assert!(sol.rounds <= 6);
        assert_eq!(sol.matching.bottleneck(&m), Some(brute_force(&m).1));
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force_minimax(
            (n, cells) in (1usize..=6).prop_flat_map(|n| {
                (Just(n), proptest::collection::vec(0u32..100, n * n))
            })
        ) {
            let m = CostMatrix::from_fn(n, n, |i, j| cells[i * n + j] as f64);
            let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();

            prop_assert_eq!(sol.matching.len(), n);
            let (_, best_max) = brute_force(&m);
            prop_assert_eq!(sol.matching.bottleneck(&m), Some(best_max));
        }

        #[test]
        fn prop_matches_brute_force_minimax_float(
            (rows, cols, cells) in (1usize..=5).prop_flat_map(|c| (1..=c, Just(c))).prop_flat_map(|(r, c)| {
                (Just(r), Just(c), proptest::collection::vec(-1e6f64..1e6, r * c))
            })
        ) {
            let m = CostMatrix::from_fn(rows, cols, |i, j| cells[i * cols + j]);
            let sol = solve_min_max(&m, &BottleneckConfig::default()).unwrap();

            prop_assert_eq!(sol.matching.len(), rows.min(cols));
            let (_, best_max) = brute_force(&m);
            prop_assert_eq!(sol.matching.bottleneck(&m), Some(best_max));
            prop_assert_eq!(sol.threshold, best_max);
        }
    }
}
