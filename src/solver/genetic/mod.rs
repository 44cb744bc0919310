//! Genetic assignment solver.
//!
//! Handles one-to-one rules whose objective the exact solvers cannot
//! optimize directly: the maximize variants, `minimize_min`, and
//! caller-supplied aggregators. Pairings are encoded as permutations, so
//! every candidate is a valid matching.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod runner;

pub use config::GeneticConfig;

use super::bipartite::Bipartition;
use super::types::Solver;
use crate::error::{AssignError, Result};
use crate::model::{Entity, Group, GroupRule, ObjectiveFunction};
use tracing::info;

/// Heuristic one-to-one pairing for any objective.
///
/// Accepts rules with exactly two categories bounded `(1, 1)` and any
/// objective, named or arbitrary. Registered after
/// [`ExactAssignment`](super::ExactAssignment) and
/// [`BottleneckAssignment`](super::BottleneckAssignment), so by default it
/// only receives the objectives they refuse. The result is the best
/// pairing found, not a proven optimum.
#[derive(Debug, Clone, Default)]
pub struct GeneticAssignment {
    config: GeneticConfig,
}

impl GeneticAssignment {
    /// Registry name.
    pub const NAME: &'static str = "genetic_assignment";

    /// Creates the solver with a custom configuration.
    pub fn new(config: GeneticConfig) -> Self {
        Self { config }
    }

    /// The evolution parameters.
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    fn run<E: Entity>(&self, rule: &GroupRule<E>, sides: &Bipartition<E>) -> Result<Vec<Group<E>>> {
        self.config.validate()?;
        let matrix = sides.cost_matrix(rule)?;
        let outcome = runner::evolve(&matrix, rule.objective(), &self.config);

        if outcome.matching.costs(&matrix).iter().any(|c| c.is_infinite()) {
            return Err(AssignError::NoFeasibleMatching {
                rows: matrix.rows(),
                cols: matrix.cols(),
            });
        }

        info!(
            solver = Self::NAME,
            pairs = outcome.matching.len(),
            fitness = outcome.fitness,
            generations = outcome.generations,
            stagnated = outcome.stagnated,
            "assignment solved"
        );
        Ok(sides.recover(&outcome.matching))
    }
}

impl<E: Entity> Solver<E> for GeneticAssignment {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn can_solve(&self, rule: &GroupRule<E>) -> bool {
        rule.is_one_to_one_bipartite() && !matches!(rule.objective(), ObjectiveFunction::Unset)
    }

    fn solve_from_entities(&self, rule: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>> {
        self.run(rule, &Bipartition::from_entities(rule, entities)?)
    }

    fn solve_from_groups(&self, rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>> {
        self.run(rule, &Bipartition::from_groups(rule, groups)?)
    }
}
