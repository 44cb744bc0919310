//! Exact minimum-sum assignment.
//!
//! Shortest augmenting paths with dual potentials (the Hungarian method in
//! its Jonker-Volgenant form). For an `n × m` matrix with `n ≤ m` each of
//! the `n` rows is inserted in turn and the matching is augmented along a
//! shortest alternating path in the reduced costs, O(n²·m) overall.
//!
//! # References
//!
//! - Kuhn (1955), "The Hungarian Method for the Assignment Problem"
//! - Jonker & Volgenant (1987), "A Shortest Augmenting Path Algorithm for
//!   Dense and Sparse Linear Assignment Problems"

use super::matrix::{CostMatrix, Matching};

/// Minimum-cost matching that covers every entry of the smaller side.
///
/// Forbidden (`+inf`) cells are never used. Returns `None` when no
/// matching of finite cost covers the smaller side. An empty matrix yields
/// an empty matching.
///
/// # Examples
///
/// ```
/// use u_assign::matching::{solve_min_sum, CostMatrix};
///
/// let m = CostMatrix::from_rows(vec![
///     vec![4.0, 1.0, 3.0],
///     vec![2.0, 0.0, 5.0],
///     vec![3.0, 2.0, 2.0],
/// ]);
/// let matching = solve_min_sum(&m).unwrap();
/// assert_eq!(matching.total_cost(&m), 5.0);
/// ```
pub fn solve_min_sum(matrix: &CostMatrix) -> Option<Matching> {
    if matrix.is_empty() {
        return Some(Matching::default());
    }
    if matrix.rows() > matrix.cols() {
        return solve_wide(&matrix.transposed()).map(|m| m.transposed());
    }
    solve_wide(matrix)
}

/// Core routine for `rows ≤ cols`. Arrays are 1-based; index 0 is the
/// virtual column the current row starts from.
fn solve_wide(a: &CostMatrix) -> Option<Matching> {
    let n = a.rows();
    let m = a.cols();
    debug_assert!(n <= m);

    let mut u = vec![0.0f64; n + 1];
    let mut v = vec![0.0f64; m + 1];
    // p[j]: row matched to column j (0 = free)
    let mut p = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for i in 1..=n {
        p[0] = i;
        let mut j0 = 0usize;
        let mut minv = vec![f64::INFINITY; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = p[j0];
            let mut delta = f64::INFINITY;
            let mut j1 = 0usize;

            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cur = a.get(i0 - 1, j - 1) - u[i0] - v[j];
                if cur < minv[j] {
                    minv[j] = cur;
                    way[j] = j0;
                }
                if minv[j] < delta {
                    delta = minv[j];
                    j1 = j;
                }
            }

            // Every reachable column is forbidden.
            if !delta.is_finite() {
                return None;
            }

            for j in 0..=m {
                if used[j] {
                    u[p[j]] += delta;
                    v[j] -= delta;
                } else {
                    minv[j] -= delta;
                }
            }

            j0 = j1;
            if p[j0] == 0 {
                break;
            }
        }

        // Flip the alternating path back to the virtual column.
        loop {
            let j1 = way[j0];
            p[j0] = p[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    let pairs = (1..=m)
        .filter(|&j| p[j] != 0)
        .map(|j| (p[j] - 1, j - 1))
        .collect();
    Some(Matching::new(pairs))
}
