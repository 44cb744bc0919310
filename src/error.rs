//! Error types for the assignment engine.

use thiserror::Error;

/// Errors raised while configuring rules, dispatching, or solving.
///
/// Every failure is a deterministic function of the input; nothing is
/// retried and no partial result is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    /// Cardinality bounds with `min > max`.
    #[error("invalid bounds for category {category}: min {min} > max {max}")]
    InvalidBounds {
        category: String,
        min: usize,
        max: usize,
    },

    /// Objective name is not one of the six named aggregators.
    #[error("unknown objective function: {0}")]
    UnknownObjective(String),

    /// A group holds a number of members outside the declared bounds.
    #[error(
        "cardinality constraint violated for category {category}: found {found}, expected {min} to {max}"
    )]
    CardinalityViolation {
        category: String,
        found: usize,
        min: usize,
        max: usize,
    },

    /// The custom validator at `index` rejected the group.
    #[error("custom validator #{index} failed")]
    ValidatorFailed { index: usize },

    /// No registered solver accepts the rule.
    #[error("no suitable solver found for rule [{summary}]")]
    NoSolverFound { summary: String },

    /// `optimize` received both groups and raw entities.
    #[error("mixed input is not supported: {groups} group(s) and {entities} entity(ies)")]
    MixedInputNotSupported { groups: usize, entities: usize },

    /// `Group::remove` could not find the entity.
    #[error("member {entity} not found in group")]
    MemberNotFound { entity: String },

    /// No matching of finite cost exists for the cost matrix.
    #[error("no feasible matching exists for a {rows}x{cols} cost matrix")]
    NoFeasibleMatching { rows: usize, cols: usize },

    /// A bipartite solver was handed a rule without exactly two categories.
    #[error("bipartite solvers need exactly two categories, rule declares {categories}")]
    NotBipartite { categories: usize },

    /// The rule declares no statistic to build costs from.
    #[error("rule has no statistic to build a cost matrix from")]
    MissingStatistic,

    /// A statistic produced NaN or `-inf`.
    #[error("statistic produced an invalid cost at cell ({row}, {col})")]
    InvalidCost { row: usize, col: usize },

    /// Solver configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for assignment operations.
pub type Result<T> = std::result::Result<T, AssignError>;
