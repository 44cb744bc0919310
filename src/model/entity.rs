//! Core trait for assignable entities.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A value that can be placed into a [`Group`](super::Group).
///
/// Every entity belongs to exactly one category, declared explicitly through
/// an associated tag type rather than inferred from the Rust type. Identity
/// is `PartialEq`: two equal entities are the same member for the purpose of
/// removal and deduplication.
///
/// # Examples
///
/// ```
/// use u_assign::model::Entity;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind { Worker, Job }
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Item { id: u32, kind: Kind, skill: f64 }
///
/// impl Entity for Item {
///     type Category = Kind;
///     fn category(&self) -> Kind { self.kind }
/// }
/// ```
pub trait Entity: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// The category tag type.
    type Category: Copy + Eq + Hash + Debug + Send + Sync;

    /// Returns the category this entity belongs to.
    fn category(&self) -> Self::Category;
}

/// Members of a group keyed by category.
///
/// This is the argument handed to statistic and validator functions.
pub type Members<E> = HashMap<<E as Entity>::Category, Vec<E>>;
