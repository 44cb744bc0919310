//! Bipartite matching on dense cost matrices.
//!
//! These routines are domain-agnostic: they see only numbers. Building a
//! matrix from entities and turning a matching back into groups lives in
//! [`crate::solver`].
//!
//! - [`solve_min_sum`]: exact minimum-sum assignment
//! - [`solve_min_max`]: minimum-bottleneck assignment via threshold search
//!
//! Both match every entry of the smaller side and treat `+inf` cells as
//! forbidden.

mod bottleneck;
mod hungarian;
mod matrix;

pub use bottleneck::{solve_min_max, BottleneckConfig, BottleneckSolution};
pub use hungarian::solve_min_sum;
pub use matrix::{CostMatrix, Matching};

/// Exhaustive (min sum, min max) over all permutations of a square matrix.
#[cfg(test)]
pub(crate) fn brute_force(matrix: &CostMatrix) -> (f64, f64) {
    fn recurse(
        m: &CostMatrix,
        row: usize,
        used: &mut [bool],
        sum: f64,
        worst: f64,
        best: &mut (f64, f64),
    ) {
        if row == m.rows() {
            best.0 = best.0.min(sum);
            best.1 = best.1.min(worst);
            return;
        }
        for col in 0..m.cols() {
            if !used[col] {
                used[col] = true;
                let c = m.get(row, col);
                recurse(m, row + 1, used, sum + c, worst.max(c), best);
                used[col] = false;
            }
        }
    }

    let mut best = (f64::INFINITY, f64::INFINITY);
    let mut used = vec![false; matrix.cols()];
    recurse(matrix, 0, &mut used, 0.0, f64::NEG_INFINITY, &mut best);
    best
}
