//! Entry point: dispatch a rule and its input to a registered solver.

use crate::error::{AssignError, Result};
use crate::model::{Entity, Group, GroupRule};
use crate::solver::SolverRegistry;
use tracing::debug;

/// One element of optimizer input: a raw entity or a pre-built group.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance<E: Entity> {
    /// A single entity to be placed into a group.
    Entity(E),
    /// A candidate group whose members may be regrouped.
    Group(Group<E>),
}

/// Runs rules against an explicitly owned solver registry.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Entity, GroupRule, Objective};
/// use u_assign::{Instance, Optimizer};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Person { side: char, skill: f64 }
///
/// impl Entity for Person {
///     type Category = char;
///     fn category(&self) -> char { self.side }
/// }
///
/// let mut rule = GroupRule::<Person>::new();
/// rule.set_cardinality('w', 1, 1).unwrap()
///     .set_cardinality('j', 1, 1).unwrap()
///     .set_objective(Objective::MinimizeSum)
///     .add_statistic(|m| (m[&'w'][0].skill - m[&'j'][0].skill).abs());
///
/// let input: Vec<Instance<Person>> = [('w', 10.0), ('w', 50.0), ('j', 48.0), ('j', 12.0)]
///     .into_iter()
///     .map(|(side, skill)| Instance::Entity(Person { side, skill }))
///     .collect();
///
/// let groups = Optimizer::default().optimize(&rule, &input).unwrap();
/// assert_eq!(rule.score(&groups), Some(4.0));
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer<E: Entity> {
    registry: SolverRegistry<E>,
}

impl<E: Entity> Optimizer<E> {
    /// Creates an optimizer over `registry`.
    pub fn new(registry: SolverRegistry<E>) -> Self {
        Self { registry }
    }

    /// The solver registry.
    pub fn registry(&self) -> &SolverRegistry<E> {
        &self.registry
    }

    /// Mutable access to the solver registry.
    pub fn registry_mut(&mut self) -> &mut SolverRegistry<E> {
        &mut self.registry
    }

    /// Groups `instances` under `rule`.
    ///
    /// All groups go to `solve_from_groups`; all entities, or no input at
    /// all, go to `solve_from_entities`.
    ///
    /// # Errors
    ///
    /// - [`AssignError::MixedInputNotSupported`] when groups and entities mix
    /// - [`AssignError::NoSolverFound`] when no solver accepts the rule
    /// - whatever the chosen solver reports
    pub fn optimize(&self, rule: &GroupRule<E>, instances: &[Instance<E>]) -> Result<Vec<Group<E>>> {
        let groups = instances
            .iter()
            .filter(|i| matches!(i, Instance::Group(_)))
            .count();
        let entities = instances.len() - groups;
        if groups > 0 && entities > 0 {
            return Err(AssignError::MixedInputNotSupported { groups, entities });
        }

        if groups > 0 {
            let groups: Vec<Group<E>> = instances
                .iter()
                .filter_map(|i| match i {
                    Instance::Group(g) => Some(g.clone()),
                    Instance::Entity(_) => None,
                })
                .collect();
            self.optimize_groups(rule, &groups)
        } else {
            let entities: Vec<E> = instances
                .iter()
                .filter_map(|i| match i {
                    Instance::Entity(e) => Some(e.clone()),
                    Instance::Group(_) => None,
                })
                .collect();
            self.optimize_entities(rule, &entities)
        }
    }

    /// Groups raw entities under `rule`.
    pub fn optimize_entities(&self, rule: &GroupRule<E>, entities: &[E]) -> Result<Vec<Group<E>>> {
        let solver = self.registry.choose_solver(rule)?;
        debug!(solver = solver.name(), entities = entities.len(), "optimizing entities");
        solver.solve_from_entities(rule, entities)
    }

    /// Regroups the members of candidate groups under `rule`.
    pub fn optimize_groups(&self, rule: &GroupRule<E>, groups: &[Group<E>]) -> Result<Vec<Group<E>>> {
        let solver = self.registry.choose_solver(rule)?;
        debug!(solver = solver.name(), groups = groups.len(), "optimizing groups");
        solver.solve_from_groups(rule, groups)
    }
}

impl<E: Entity> Default for Optimizer<E> {
    fn default() -> Self {
        Self::new(SolverRegistry::with_defaults())
    }
}

/// Groups `instances` under `rule` with the default solvers.
///
/// Shorthand for `Optimizer::default().optimize(rule, instances)`.
pub fn optimize<E: Entity>(rule: &GroupRule<E>, instances: &[Instance<E>]) -> Result<Vec<Group<E>>> {
    Optimizer::default().optimize(rule, instances)
}
