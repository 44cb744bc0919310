//! Rule and group data model.
//!
//! - [`Entity`]: trait for caller types, with an explicit category tag
//! - [`Group`]: entities partitioned by category
//! - [`GroupRule`]: cardinality bounds, statistics, objective, validators
//! - [`Objective`]: the six named aggregators

mod entity;
mod group;
mod objective;
mod rule;

pub use entity::{Entity, Members};
pub use group::Group;
pub use objective::Objective;
pub use rule::{
    Aggregator, CardinalityBounds, GroupRule, ObjectiveFunction, Statistic, Validator,
};
