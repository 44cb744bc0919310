//! Constraint and objective specification for one optimization run.

use super::entity::{Entity, Members};
use super::group::Group;
use super::objective::Objective;
use crate::error::{AssignError, Result};
use std::collections::HashMap;
use std::fmt;

/// A scalar function over a group's members. Must be pure.
pub type Statistic<E> = Box<dyn Fn(&Members<E>) -> f64 + Send + Sync>;

/// A predicate over a group's members.
pub type Validator<E> = Box<dyn Fn(&Members<E>) -> bool + Send + Sync>;

/// A caller-supplied aggregator over per-group statistic values.
pub type Aggregator = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Inclusive bounds on how many members of a category one group may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardinalityBounds {
    pub min: usize,
    pub max: usize,
}

impl CardinalityBounds {
    /// Bounds of exactly `n`.
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Whether `count` lies within the bounds.
    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

/// The objective currently active on a rule.
pub enum ObjectiveFunction {
    /// No objective has been set.
    Unset,
    /// One of the six named aggregators.
    Named(Objective),
    /// A caller-supplied aggregator, reported as `"arbitrary"`.
    Arbitrary(Aggregator),
}

impl ObjectiveFunction {
    /// Name of the active objective, `None` when unset.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            ObjectiveFunction::Unset => None,
            ObjectiveFunction::Named(obj) => Some(obj.name()),
            ObjectiveFunction::Arbitrary(_) => Some("arbitrary"),
        }
    }

    /// Aggregates statistic values, `None` when unset.
    pub fn aggregate(&self, stats: &[f64]) -> Option<f64> {
        match self {
            ObjectiveFunction::Unset => None,
            ObjectiveFunction::Named(obj) => Some(obj.aggregate(stats)),
            ObjectiveFunction::Arbitrary(f) => Some(f(stats)),
        }
    }
}

impl fmt::Debug for ObjectiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveFunction::Unset => f.write_str("Unset"),
            ObjectiveFunction::Named(obj) => f.debug_tuple("Named").field(obj).finish(),
            ObjectiveFunction::Arbitrary(_) => f.write_str("Arbitrary(..)"),
        }
    }
}

/// Cardinality constraints, statistics, objective and validators for
/// grouping entities of type `E`.
///
/// The rule is built once by the caller and only read by solvers.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Entity, Group, GroupRule};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind { Worker, Job }
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Item(Kind, f64);
///
/// impl Entity for Item {
///     type Category = Kind;
///     fn category(&self) -> Kind { self.0 }
/// }
///
/// let mut rule = GroupRule::<Item>::new();
/// rule.set_cardinality(Kind::Worker, 1, 1).unwrap();
/// rule.set_cardinality(Kind::Job, 1, 1).unwrap();
/// rule.set_optimized_objective_function("minimize_sum_of_single_statistic").unwrap();
///
/// let group = Group::new().with(Item(Kind::Worker, 1.0)).with(Item(Kind::Job, 2.0));
/// assert!(rule.validate(&group).is_ok());
/// ```
pub struct GroupRule<E: Entity> {
    cardinality: HashMap<E::Category, CardinalityBounds>,
    types: Vec<E::Category>,
    statistics: Vec<Statistic<E>>,
    validators: Vec<Validator<E>>,
    objective: ObjectiveFunction,
}

impl<E: Entity> GroupRule<E> {
    /// Creates a rule with no constraints and no objective.
    pub fn new() -> Self {
        Self {
            cardinality: HashMap::new(),
            types: Vec::new(),
            statistics: Vec::new(),
            validators: Vec::new(),
            objective: ObjectiveFunction::Unset,
        }
    }

    /// Declares inclusive bounds for a category.
    ///
    /// Redeclaring a category replaces its bounds and keeps its original
    /// position in [`types`](Self::types). Bounds are unsigned, so the only
    /// rejected shape is `min > max` ([`AssignError::InvalidBounds`]).
    pub fn set_cardinality(
        &mut self,
        category: E::Category,
        min: usize,
        max: usize,
    ) -> Result<&mut Self> {
        if min > max {
            return Err(AssignError::InvalidBounds {
                category: format!("{category:?}"),
                min,
                max,
            });
        }
        self.cardinality
            .insert(category, CardinalityBounds { min, max });
        if !self.types.contains(&category) {
            self.types.push(category);
        }
        Ok(self)
    }

    /// Activates a named objective by its canonical name.
    pub fn set_optimized_objective_function(&mut self, name: &str) -> Result<&mut Self> {
        let objective = name.parse::<Objective>()?;
        Ok(self.set_objective(objective))
    }

    /// Activates a named objective.
    pub fn set_objective(&mut self, objective: Objective) -> &mut Self {
        self.objective = ObjectiveFunction::Named(objective);
        self
    }

    /// Activates a caller-supplied aggregator.
    ///
    /// Solvers that require a specific named objective refuse such rules.
    pub fn set_arbitrary_objective_function<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        self.objective = ObjectiveFunction::Arbitrary(Box::new(f));
        self
    }

    /// Appends a statistic. Bipartite solvers use the first one.
    pub fn add_statistic<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Members<E>) -> f64 + Send + Sync + 'static,
    {
        self.statistics.push(Box::new(f));
        self
    }

    /// Appends a validator, run after the cardinality checks.
    pub fn add_validator<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&Members<E>) -> bool + Send + Sync + 'static,
    {
        self.validators.push(Box::new(f));
        self
    }

    /// Categories in declaration order.
    pub fn types(&self) -> &[E::Category] {
        &self.types
    }

    /// Bounds declared for `category`.
    pub fn cardinality(&self, category: E::Category) -> Option<CardinalityBounds> {
        self.cardinality.get(&category).copied()
    }

    /// Declared bounds in declaration order.
    pub fn cardinality_rules(&self) -> impl Iterator<Item = (E::Category, CardinalityBounds)> + '_ {
        self.types.iter().map(|c| (*c, self.cardinality[c]))
    }

    /// Registered statistics in order.
    pub fn statistics(&self) -> &[Statistic<E>] {
        &self.statistics
    }

    /// Number of registered validators.
    pub fn validator_count(&self) -> usize {
        self.validators.len()
    }

    /// The active objective.
    pub fn objective(&self) -> &ObjectiveFunction {
        &self.objective
    }

    /// Name of the active objective (`"arbitrary"` for a custom one).
    pub fn objective_name(&self) -> Option<&'static str> {
        self.objective.name()
    }

    /// Whether the active objective is exactly `objective`.
    pub fn has_objective(&self, objective: Objective) -> bool {
        matches!(self.objective, ObjectiveFunction::Named(o) if o == objective)
    }

    /// Exactly two categories declared, each bounded to exactly one member.
    ///
    /// This is the applicability guard of the bipartite matrix solvers:
    /// one matched pair per row and column. Rules with more than two
    /// categories are never accepted by them.
    pub fn is_one_to_one_bipartite(&self) -> bool {
        self.types.len() == 2
            && self
                .cardinality
                .values()
                .all(|b| *b == CardinalityBounds::exactly(1))
    }

    /// Checks cardinality bounds in declaration order, then validators.
    ///
    /// Fails fast on the first violation.
    pub fn validate(&self, group: &Group<E>) -> Result<()> {
        for (category, bounds) in self.cardinality_rules() {
            let found = group.count(category);
            if !bounds.contains(found) {
                return Err(AssignError::CardinalityViolation {
                    category: format!("{category:?}"),
                    found,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        match self.failing_validator(group.members()) {
            Some(index) => Err(AssignError::ValidatorFailed { index }),
            None => Ok(()),
        }
    }

    /// Whether every validator accepts `members`.
    pub fn passes_validators(&self, members: &Members<E>) -> bool {
        self.failing_validator(members).is_none()
    }

    fn failing_validator(&self, members: &Members<E>) -> Option<usize> {
        self.validators.iter().position(|v| !v(members))
    }

    /// Evaluates the first statistic on a group.
    pub fn evaluate(&self, group: &Group<E>) -> Option<f64> {
        self.statistics.first().map(|s| s(group.members()))
    }

    /// Scores a solution: the objective over each group's first statistic.
    ///
    /// `None` when there is no statistic or no objective.
    pub fn score(&self, groups: &[Group<E>]) -> Option<f64> {
        let stat = self.statistics.first()?;
        let values: Vec<f64> = groups.iter().map(|g| stat(g.members())).collect();
        self.objective.aggregate(&values)
    }

    /// Human-readable constraint summary.
    pub fn summary(&self) -> String {
        let bounds: Vec<String> = self
            .cardinality_rules()
            .map(|(c, b)| format!("{c:?}: {}..={}", b.min, b.max))
            .collect();
        format!(
            "{}; objective={}; statistics={}; validators={}",
            if bounds.is_empty() {
                "no cardinality rules".to_string()
            } else {
                bounds.join(", ")
            },
            self.objective_name().unwrap_or("none"),
            self.statistics.len(),
            self.validators.len()
        )
    }
}

impl<E: Entity> Default for GroupRule<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for GroupRule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupRule")
            .field("types", &self.types)
            .field("cardinality", &self.cardinality)
            .field("statistics", &self.statistics.len())
            .field("validators", &self.validators.len())
            .field("objective", &self.objective)
            .finish()
    }
}
