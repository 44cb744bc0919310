//! Core trait for solvers.

use crate::error::Result;
use crate::model::{Entity, Group, GroupRule};

/// An assignment algorithm with a capability predicate.
///
/// The registry asks [`can_solve`](Solver::can_solve) first and only
/// dispatches rules the solver accepted. Solvers never mutate the rule.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Entity, Group, GroupRule};
/// use u_assign::solver::Solver;
/// use u_assign::Result;
///
/// /// Puts every entity into one group.
/// struct Everything;
///
/// impl<E: Entity> Solver<E> for Everything {
///     fn name(&self) -> &str { "everything" }
///     fn can_solve(&self, rule: &GroupRule<E>) -> bool { rule.types().is_empty() }
///     fn solve_from_entities(&self, _: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>> {
///         Ok(vec![entities.iter().cloned().collect()])
///     }
///     fn solve_from_groups(&self, _: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>> {
///         Ok(vec![groups.iter().flat_map(|g| g.iter().cloned()).collect()])
///     }
/// }
/// ```
pub trait Solver<E: Entity>: Send + Sync {
    /// Unique name, used by [`SolverRegistry::remove_solver`](super::SolverRegistry::remove_solver).
    fn name(&self) -> &str;

    /// Whether this solver supports the rule's constraints and objective.
    fn can_solve(&self, rule: &GroupRule<E>) -> bool;

    /// Groups raw entities.
    fn solve_from_entities(&self, rule: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>>;

    /// Regroups the entities found in pre-built candidate groups.
    fn solve_from_groups(&self, rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>>;
}
