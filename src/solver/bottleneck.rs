//! Minimum-bottleneck assignment solver.

use super::bipartite::{solve_sides, Bipartition};
use super::types::Solver;
use crate::error::Result;
use crate::matching::{solve_min_max, BottleneckConfig, CostMatrix, Matching};
use crate::model::{Entity, Group, GroupRule, Objective};

/// One-to-one pairing minimizing the worst pair's statistic.
///
/// Accepts rules with exactly two categories bounded `(1, 1)` and the
/// `minimize_max_of_single_statistic` objective. Among pairings with the
/// same worst pair, the one with the smallest sum is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct BottleneckAssignment {
    config: BottleneckConfig,
}

impl BottleneckAssignment {
    /// Registry name.
    pub const NAME: &'static str = "bottleneck_assignment";

    /// Creates the solver with a custom search configuration.
    pub fn new(config: BottleneckConfig) -> Self {
        Self { config }
    }

    /// The threshold search configuration.
    pub fn config(&self) -> &BottleneckConfig {
        &self.config
    }

    fn run<E: Entity>(&self, rule: &GroupRule<E>, sides: &Bipartition<E>) -> Result<Vec<Group<E>>> {
        self.config.validate()?;
        let search = |m: &CostMatrix| -> Option<Matching> {
            solve_min_max(m, &self.config).map(|s| s.matching)
        };
        solve_sides(Self::NAME, rule, sides, search)
    }
}

impl<E: Entity> Solver<E> for BottleneckAssignment {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_solve(&self, rule: &GroupRule<E>) -> bool {
        rule.is_one_to_one_bipartite() && rule.has_objective(Objective::MinimizeMax)
    }

    fn solve_from_entities(&self, rule: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>> {
        self.run(rule, &Bipartition::from_entities(rule, entities)?)
    }

    fn solve_from_groups(&self, rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>> {
        self.run(rule, &Bipartition::from_groups(rule, groups)?)
    }
}
