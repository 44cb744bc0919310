//! Assignment solvers and their registry.
//!
//! Every solver declares which rules it accepts through
//! [`Solver::can_solve`]; the [`SolverRegistry`] dispatches a rule to the
//! first solver that accepts it.
//!
//! # Built-in Solvers
//!
//! | Solver | Accepts |
//! |--------|---------|
//! | [`ExactAssignment`] | two categories at `(1, 1)`, `minimize_sum_of_single_statistic` |
//! | [`BottleneckAssignment`] | two categories at `(1, 1)`, `minimize_max_of_single_statistic` |
//! | [`StableMarriage`] | two categories at `(1, 1)`, no objective |
//! | [`GeneticAssignment`] | two categories at `(1, 1)`, any objective |
//!
//! The genetic solver overlaps the two exact ones and is registered after
//! them, so it receives only the objectives they refuse.

mod bipartite;
mod bottleneck;
mod exact;
mod genetic;
mod registry;
mod stable_marriage;
mod types;

pub use bipartite::{
    build_cost_matrix, build_cost_matrix_from_groups, recover_groups, recover_groups_from_groups,
    Bipartition,
};
pub use bottleneck::BottleneckAssignment;
pub use exact::ExactAssignment;
pub use genetic::{GeneticAssignment, GeneticConfig};
pub use registry::SolverRegistry;
pub use stable_marriage::StableMarriage;
pub use types::Solver;
