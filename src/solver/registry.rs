//! Ordered solver collection with first-match dispatch.

use super::bottleneck::BottleneckAssignment;
use super::exact::ExactAssignment;
use super::genetic::GeneticAssignment;
use super::stable_marriage::StableMarriage;
use super::types::Solver;
use crate::error::{AssignError, Result};
use crate::model::{Entity, GroupRule};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Solvers consulted in insertion order.
///
/// [`choose_solver`](Self::choose_solver) returns the first solver whose
/// [`can_solve`](Solver::can_solve) accepts the rule, so earlier entries
/// take precedence when capabilities overlap.
///
/// # Examples
///
/// ```
/// use u_assign::solver::{ExactAssignment, SolverRegistry};
/// # use u_assign::model::Entity;
/// # #[derive(Debug, Clone, PartialEq)]
/// # struct Item;
/// # impl Entity for Item {
/// #     type Category = u8;
/// #     fn category(&self) -> u8 { 0 }
/// # }
///
/// let registry = SolverRegistry::<Item>::new().with_solver(ExactAssignment);
/// assert_eq!(registry.names(), vec!["exact_assignment"]);
/// ```
pub struct SolverRegistry<E: Entity> {
    solvers: Vec<Arc<dyn Solver<E>>>,
}

impl<E: Entity> SolverRegistry<E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            solvers: Vec::new(),
        }
    }

    /// Registry preloaded with the built-in solvers:
    /// exact, bottleneck, stable marriage, genetic.
    pub fn with_defaults() -> Self {
        Self::new()
            .with_solver(ExactAssignment)
            .with_solver(BottleneckAssignment::default())
            .with_solver(StableMarriage)
            .with_solver(GeneticAssignment::default())
    }

    /// Appends a solver (builder form).
    pub fn with_solver<S: Solver<E> + 'static>(mut self, solver: S) -> Self {
        self.add_solver(solver);
        self
    }

    /// Appends a solver.
    pub fn add_solver<S: Solver<E> + 'static>(&mut self, solver: S) -> &mut Self {
        self.add_shared(Arc::new(solver))
    }

    /// Appends an already shared solver.
    pub fn add_shared(&mut self, solver: Arc<dyn Solver<E>>) -> &mut Self {
        debug!(solver = solver.name(), position = self.solvers.len(), "solver registered");
        self.solvers.push(solver);
        self
    }

    /// Removes the first solver named `name`, returning it.
    pub fn remove_solver(&mut self, name: &str) -> Option<Arc<dyn Solver<E>>> {
        let idx = self.solvers.iter().position(|s| s.name() == name)?;
        Some(self.solvers.remove(idx))
    }

    /// Removes every solver.
    pub fn clear(&mut self) {
        self.solvers.clear();
    }

    /// Number of registered solvers.
    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    /// Whether no solver is registered.
    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }

    /// Solver names in dispatch order.
    pub fn names(&self) -> Vec<&str> {
        self.solvers.iter().map(|s| s.name()).collect()
    }

    /// First solver accepting `rule`.
    ///
    /// # Errors
    ///
    /// [`AssignError::NoSolverFound`] with the rule summary when none does.
    pub fn choose_solver(&self, rule: &GroupRule<E>) -> Result<&dyn Solver<E>> {
        match self.solvers.iter().find(|s| s.can_solve(rule)) {
            Some(solver) => {
                debug!(solver = solver.name(), "solver chosen");
                Ok(solver.as_ref())
            }
            None => {
                let summary = rule.summary();
                debug!(registered = self.solvers.len(), %summary, "no solver accepts rule");
                Err(AssignError::NoSolverFound { summary })
            }
        }
    }
}

impl<E: Entity> Default for SolverRegistry<E> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<E: Entity> Clone for SolverRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            solvers: self.solvers.clone(),
        }
    }
}

impl<E: Entity> fmt::Debug for SolverRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverRegistry")
            .field("solvers", &self.names())
            .finish()
    }
}
