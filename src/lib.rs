//! Domain-agnostic group assignment engine.
//!
//! Assigns typed entities into groups under per-category cardinality
//! bounds, optimizing an objective computed from per-group statistics:
//!
//! - **Model**: [`Entity`](model::Entity) with an explicit category tag,
//!   [`Group`](model::Group), and the [`GroupRule`](model::GroupRule)
//!   contract (bounds, statistics, objective, validators).
//! - **Matching**: exact minimum-sum (Hungarian) and minimum-bottleneck
//!   assignment on dense cost matrices.
//! - **Solvers**: algorithms with capability predicates, dispatched by a
//!   [`SolverRegistry`](solver::SolverRegistry) to the first that accepts
//!   a rule. Built in: exact, bottleneck, stable marriage, genetic.
//!
//! # Quick Start
//!
//! ```
//! use u_assign::model::{Entity, GroupRule};
//! use u_assign::{optimize, Instance};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Side { Worker, Job }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person { side: Side, skill: f64 }
//!
//! impl Entity for Person {
//!     type Category = Side;
//!     fn category(&self) -> Side { self.side }
//! }
//!
//! let mut rule = GroupRule::<Person>::new();
//! rule.set_cardinality(Side::Worker, 1, 1).unwrap()
//!     .set_cardinality(Side::Job, 1, 1).unwrap()
//!     .set_optimized_objective_function("minimize_sum_of_single_statistic").unwrap()
//!     .add_statistic(|m| (m[&Side::Worker][0].skill - m[&Side::Job][0].skill).abs());
//!
//! let people = [
//!     (Side::Worker, 10.0), (Side::Worker, 50.0), (Side::Worker, 90.0),
//!     (Side::Job, 15.0), (Side::Job, 55.0), (Side::Job, 85.0),
//! ];
//! let input: Vec<_> = people
//!     .iter()
//!     .map(|&(side, skill)| Instance::Entity(Person { side, skill }))
//!     .collect();
//!
//! let groups = optimize(&rule, &input).unwrap();
//! assert_eq!(groups.len(), 3);
//! assert_eq!(rule.score(&groups), Some(15.0));
//! ```
//!
//! # Features
//!
//! - `parallel`: cost-matrix construction and genetic fitness evaluation
//!   on rayon.
//! - `serde`: `Serialize`/`Deserialize` for objectives, bounds and solver
//!   configurations.

pub mod error;
pub mod matching;
pub mod model;
pub mod optimizer;
pub mod solver;

#[cfg(test)]
mod test_utils;

pub use error::{AssignError, Result};
pub use optimizer::{optimize, Instance, Optimizer};
