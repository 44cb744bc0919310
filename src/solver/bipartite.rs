//! Cost-matrix construction and group reconstruction for two-sided rules.
//!
//! Side A holds the entities of `rule.types()[0]` (matrix rows), side B
//! those of `rule.types()[1]` (matrix columns). Cell `(i, j)` is a
//! statistic evaluated on a transient group `{A[i], B[j]}`. Pairs rejected
//! by the rule's validators are forbidden (`+inf`).

use crate::error::{AssignError, Result};
use crate::matching::{CostMatrix, Matching};
use crate::model::{Entity, Group, GroupRule, Statistic};
use tracing::{info, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The two ordered entity sides of a bipartite problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Bipartition<E: Entity> {
    left: Vec<E>,
    right: Vec<E>,
}

impl<E: Entity> Bipartition<E> {
    /// Creates a bipartition from explicit sides.
    pub fn new(left: Vec<E>, right: Vec<E>) -> Self {
        Self { left, right }
    }

    /// Splits raw entities by the rule's two categories, keeping input
    /// order. Entities of other categories are ignored.
    pub fn from_entities(rule: &GroupRule<E>, entities: &[E]) -> Result<Self> {
        let (a, b) = sides(rule)?;
        let pick = |c: E::Category| -> Vec<E> {
            entities
                .iter()
                .filter(|e| e.category() == c)
                .cloned()
                .collect()
        };
        Ok(Self::new(pick(a), pick(b)))
    }

    /// Collects the distinct entities of each side across all groups, in
    /// first-seen order.
    pub fn from_groups(rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Self> {
        let (a, b) = sides(rule)?;
        let distinct = |c: E::Category| -> Vec<E> {
            let mut seen: Vec<E> = Vec::new();
            for entity in groups.iter().flat_map(|g| g.members_of(c)) {
                if !seen.contains(entity) {
                    seen.push(entity.clone());
                }
            }
            seen
        };
        Ok(Self::new(distinct(a), distinct(b)))
    }

    /// Side A (matrix rows).
    pub fn left(&self) -> &[E] {
        &self.left
    }

    /// Side B (matrix columns).
    pub fn right(&self) -> &[E] {
        &self.right
    }

    /// Cost matrix from the rule's first statistic.
    pub fn cost_matrix(&self, rule: &GroupRule<E>) -> Result<CostMatrix> {
        self.cost_matrix_for(rule, 0)
    }

    /// Cost matrix from the statistic at `index`.
    pub fn cost_matrix_for(&self, rule: &GroupRule<E>, index: usize) -> Result<CostMatrix> {
        let stat = rule
            .statistics()
            .get(index)
            .ok_or(AssignError::MissingStatistic)?;
        let (n, m) = (self.left.len(), self.right.len());
        let cell = |k: usize| pair_cost(rule, stat, &self.left[k / m], &self.right[k % m]);

        #[cfg(feature = "parallel")]
        let data: Vec<f64> = (0..n * m).into_par_iter().map(cell).collect();
        #[cfg(not(feature = "parallel"))]
        let data: Vec<f64> = (0..n * m).map(cell).collect();

        if let Some(k) = data
            .iter()
            .position(|c| c.is_nan() || *c == f64::NEG_INFINITY)
        {
            return Err(AssignError::InvalidCost {
                row: k / m,
                col: k % m,
            });
        }
        trace!(rows = n, cols = m, statistic = index, "built cost matrix");
        Ok(CostMatrix::from_raw(n, m, data))
    }

    /// One group per matched `(row, col)` pair.
    pub fn recover(&self, matching: &Matching) -> Vec<Group<E>> {
        recover_groups(matching, &self.left, &self.right)
    }
}

fn sides<E: Entity>(rule: &GroupRule<E>) -> Result<(E::Category, E::Category)> {
    match rule.types() {
        [a, b] => Ok((*a, *b)),
        other => Err(AssignError::NotBipartite {
            categories: other.len(),
        }),
    }
}

fn pair_cost<E: Entity>(rule: &GroupRule<E>, stat: &Statistic<E>, a: &E, b: &E) -> f64 {
    let group = Group::pair(a.clone(), b.clone());
    if rule.passes_validators(group.members()) {
        stat(group.members())
    } else {
        f64::INFINITY
    }
}

/// Cost matrix over explicit sides A and B.
pub fn build_cost_matrix<E: Entity>(rule: &GroupRule<E>, a: &[E], b: &[E]) -> Result<CostMatrix> {
    Bipartition::new(a.to_vec(), b.to_vec()).cost_matrix(rule)
}

/// Cost matrix over the distinct entities of pre-built groups.
pub fn build_cost_matrix_from_groups<E: Entity>(
    rule: &GroupRule<E>,
    groups: &[Group<E>],
) -> Result<CostMatrix> {
    Bipartition::from_groups(rule, groups)?.cost_matrix(rule)
}

/// One group per matched pair, holding `a[row]` and `b[col]`.
pub fn recover_groups<E: Entity>(matching: &Matching, a: &[E], b: &[E]) -> Vec<Group<E>> {
    matching
        .pairs()
        .iter()
        .map(|&(i, j)| Group::pair(a[i].clone(), b[j].clone()))
        .collect()
}

/// Inverse of [`build_cost_matrix_from_groups`] for a matching of its matrix.
pub fn recover_groups_from_groups<E: Entity>(
    rule: &GroupRule<E>,
    matching: &Matching,
    groups: &[Group<E>],
) -> Result<Vec<Group<E>>> {
    Ok(Bipartition::from_groups(rule, groups)?.recover(matching))
}

/// Builds the matrix, runs `algorithm`, and turns the matching into groups.
pub(crate) fn solve_sides<E, F>(
    solver: &str,
    rule: &GroupRule<E>,
    sides: &Bipartition<E>,
    algorithm: F,
) -> Result<Vec<Group<E>>>
where
    E: Entity,
    F: FnOnce(&CostMatrix) -> Option<Matching>,
{
    let matrix = sides.cost_matrix(rule)?;
    let matching = algorithm(&matrix).ok_or(AssignError::NoFeasibleMatching {
        rows: matrix.rows(),
        cols: matrix.cols(),
    })?;
    info!(
        solver,
        pairs = matching.len(),
        total_cost = matching.total_cost(&matrix),
        "assignment solved"
    );
    Ok(sides.recover(&matching))
}
