//! Stable matching (Gale-Shapley) solver.
//!
//! Side A proposes; each side ranks the other by a statistic, lower values
//! preferred. The result admits no blocking pair: no A and B that both
//! prefer each other over their assigned partners.
//!
//! # References
//!
//! Gale & Shapley (1962), "College Admissions and the Stability of Marriage"

use super::bipartite::Bipartition;
use super::types::Solver;
use crate::error::Result;
use crate::matching::{CostMatrix, Matching};
use crate::model::{Entity, Group, GroupRule, ObjectiveFunction};
use std::collections::VecDeque;
use tracing::info;

/// Preference-driven one-to-one pairing.
///
/// Accepts rules with exactly two categories bounded `(1, 1)` and no
/// objective: a stable matching has no aggregate score to optimize.
/// Side A ranks by `statistics[0]`; side B by `statistics[1]` when present,
/// otherwise by `statistics[0]`. Forbidden (`+inf`) pairs are never formed,
/// and surplus entities stay unmatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct StableMarriage;

impl StableMarriage {
    /// Registry name.
    pub const NAME: &'static str = "stable_marriage";

    fn run<E: Entity>(&self, rule: &GroupRule<E>, sides: &Bipartition<E>) -> Result<Vec<Group<E>>> {
        let proposer_costs = sides.cost_matrix_for(rule, 0)?;
        let receiver_costs = if rule.statistics().len() > 1 {
            sides.cost_matrix_for(rule, 1)?
        } else {
            proposer_costs.clone()
        };
        let matching = gale_shapley(&proposer_costs, &receiver_costs);
        info!(
            solver = Self::NAME,
            pairs = matching.len(),
            "assignment solved"
        );
        Ok(sides.recover(&matching))
    }
}

impl<E: Entity> Solver<E> for StableMarriage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_solve(&self, rule: &GroupRule<E>) -> bool {
        rule.is_one_to_one_bipartite() && matches!(rule.objective(), ObjectiveFunction::Unset)
    }

    fn solve_from_entities(&self, rule: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>> {
        self.run(rule, &Bipartition::from_entities(rule, entities)?)
    }

    fn solve_from_groups(&self, rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>> {
        self.run(rule, &Bipartition::from_groups(rule, groups)?)
    }
}

/// Proposer-optimal stable matching.
///
/// `proposer[i][j]` is how row `i` rates column `j`; `receiver[i][j]` how
/// column `j` rates row `i`. Lower is better, ties go to the lower index.
pub(crate) fn gale_shapley(proposer: &CostMatrix, receiver: &CostMatrix) -> Matching {
    let (n, m) = (proposer.rows(), proposer.cols());

    let preferences: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            let mut cols: Vec<usize> = (0..m)
                .filter(|&j| proposer.get(i, j).is_finite() && receiver.get(i, j).is_finite())
                .collect();
            cols.sort_by(|&a, &b| proposer.get(i, a).total_cmp(&proposer.get(i, b)).then(a.cmp(&b)));
            cols
        })
        .collect();

    let mut next = vec![0usize; n];
    let mut holder: Vec<Option<usize>> = vec![None; m];
    let mut free: VecDeque<usize> = (0..n).collect();

    while let Some(i) = free.pop_front() {
        let Some(&j) = preferences[i].get(next[i]) else {
            continue;
        };
        next[i] += 1;

        match holder[j] {
            None => holder[j] = Some(i),
            Some(k) => {
                let prefers_new = receiver
                    .get(i, j)
                    .total_cmp(&receiver.get(k, j))
                    .then(i.cmp(&k))
                    .is_lt();
                if prefers_new {
                    holder[j] = Some(i);
                    free.push_back(k);
                } else {
                    free.push_back(i);
                }
            }
        }
    }

    Matching::new(
        holder
            .iter()
            .enumerate()
            .filter_map(|(j, h)| h.map(|i| (i, j)))
            .collect(),
    )
}
