//! Dense cost matrices and row/column matchings.

/// A dense, row-major cost matrix.
///
/// `+inf` marks a forbidden cell: matching algorithms never select it.
/// NaN and `-inf` are not valid costs.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Creates a `rows × cols` matrix of zeros.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F: FnMut(usize, usize) -> f64>(rows: usize, cols: usize, mut f: F) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Panics
    /// Panics if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "all rows must have equal length"
        );
        Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Cost of cell `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Overwrites cell `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Distinct finite costs in ascending order.
    pub fn finite_values(&self) -> Vec<f64> {
        let mut values: Vec<f64> = self.data.iter().copied().filter(|c| c.is_finite()).collect();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }

    /// Feasibility matrix: every cell above `threshold` becomes `+inf`.
    pub fn thresholded(&self, threshold: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|&c| if c > threshold { f64::INFINITY } else { c })
                .collect(),
        }
    }

    /// The transposed matrix.
    pub fn transposed(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i))
    }
}

/// A set of `(row, col)` pairs, each row and column used at most once.
///
/// Pairs are kept sorted by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    pairs: Vec<(usize, usize)>,
}

impl Matching {
    /// Creates a matching from pairs, sorting them by row.
    pub fn new(mut pairs: Vec<(usize, usize)>) -> Self {
        pairs.sort_unstable();
        Self { pairs }
    }

    /// The matched pairs, sorted by row.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing is matched.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sum of matched cell costs.
    pub fn total_cost(&self, matrix: &CostMatrix) -> f64 {
        self.pairs.iter().map(|&(i, j)| matrix.get(i, j)).sum()
    }

    /// Largest matched cell cost, `None` for an empty matching.
    pub fn bottleneck(&self, matrix: &CostMatrix) -> Option<f64> {
        self.pairs
            .iter()
            .map(|&(i, j)| matrix.get(i, j))
            .reduce(f64::max)
    }

    /// Matched cell costs in row order.
    pub fn costs(&self, matrix: &CostMatrix) -> Vec<f64> {
        self.pairs.iter().map(|&(i, j)| matrix.get(i, j)).collect()
    }

    /// Swaps rows and columns of every pair.
    pub fn transposed(&self) -> Self {
        Self::new(self.pairs.iter().map(|&(i, j)| (j, i)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_and_get() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.get(1, 2), 6.0);
        assert_eq!(m.row(0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_from_rows_ragged_panics() {
        CostMatrix::from_rows(vec![vec![1.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn test_thresholded() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 5.0], vec![3.0, f64::INFINITY]]);
        let t = m.thresholded(3.0);
        assert_eq!(t.get(0, 0), 1.0);
        assert_eq!(t.get(0, 1), f64::INFINITY);
        assert_eq!(t.get(1, 0), 3.0);
        assert_eq!(t.get(1, 1), f64::INFINITY);
    }

    #[test]
    fn test_finite_values_sorted_distinct() {
        let m = CostMatrix::from_rows(vec![vec![3.0, f64::INFINITY], vec![-1.0, 3.0]]);
        assert_eq!(m.finite_values(), vec![-1.0, 3.0]);

        let all_inf = CostMatrix::from_fn(2, 2, |_, _| f64::INFINITY);
        assert!(all_inf.finite_values().is_empty());
    }

    #[test]
    fn test_transposed() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0, 3.0]]);
        let t = m.transposed();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 1);
        assert_eq!(t.get(2, 0), 3.0);
    }

    #[test]
    fn test_matching_costs() {
        let m = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![4.0, 3.0]]);
        let matching = Matching::new(vec![(1, 0), (0, 1)]);
        assert_eq!(matching.pairs(), &[(0, 1), (1, 0)]);
        assert_eq!(matching.total_cost(&m), 6.0);
        assert_eq!(matching.bottleneck(&m), Some(4.0));
        assert_eq!(Matching::default().bottleneck(&m), None);
        assert_eq!(matching.transposed().pairs(), &[(0, 1), (1, 0)]);
    }
}
