//! Typed multiset of entities partitioned by category.

use super::entity::{Entity, Members};
use crate::error::{AssignError, Result};
use std::collections::HashMap;
use std::fmt;

/// A container of entities, organized by category.
///
/// Insertion order is preserved within each category and duplicates are
/// allowed. Removal matches by identity (`PartialEq`) and takes the first
/// occurrence.
///
/// # Examples
///
/// ```
/// use u_assign::model::{Entity, Group};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Kind { Worker, Job }
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Item(Kind, u32);
///
/// impl Entity for Item {
///     type Category = Kind;
///     fn category(&self) -> Kind { self.0 }
/// }
///
/// let mut group = Group::new();
/// group.add(Item(Kind::Worker, 1)).add(Item(Kind::Job, 7));
/// assert_eq!(group.count(Kind::Worker), 1);
/// assert_eq!(group.members_of(Kind::Job), &[Item(Kind::Job, 7)]);
///
/// group.remove(&Item(Kind::Worker, 1)).unwrap();
/// assert!(group.members_of(Kind::Worker).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Group<E: Entity> {
    members: Members<E>,
}

impl<E: Entity> Group<E> {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            members: HashMap::new(),
        }
    }

    /// Creates a group holding exactly the given pair.
    pub(crate) fn pair(a: E, b: E) -> Self {
        let mut group = Self::new();
        group.add(a).add(b);
        group
    }

    /// Adds a single entity.
    pub fn add(&mut self, entity: E) -> &mut Self {
        self.members
            .entry(entity.category())
            .or_default()
            .push(entity);
        self
    }

    /// Adds every entity of a sequence, in order.
    pub fn add_all<I: IntoIterator<Item = E>>(&mut self, entities: I) -> &mut Self {
        for entity in entities {
            self.add(entity);
        }
        self
    }

    /// Consuming variant of [`add`](Self::add).
    pub fn with(mut self, entity: E) -> Self {
        self.add(entity);
        self
    }

    /// Removes the first occurrence of `entity`.
    ///
    /// Fails with [`AssignError::MemberNotFound`] if no equal member exists.
    pub fn remove(&mut self, entity: &E) -> Result<&mut Self> {
        remove_from(&mut self.members, entity)?;
        Ok(self)
    }

    /// Removes every entity of `entities`, in order.
    ///
    /// All-or-nothing: the first missing entity aborts the call and leaves
    /// the group unchanged.
    pub fn remove_all(&mut self, entities: &[E]) -> Result<&mut Self> {
        let mut scratch = self.members.clone();
        for entity in entities {
            remove_from(&mut scratch, entity)?;
        }
        self.members = scratch;
        Ok(self)
    }

    /// Returns all members keyed by category.
    pub fn members(&self) -> &Members<E> {
        &self.members
    }

    /// Returns the members of one category, or an empty slice.
    pub fn members_of(&self, category: E::Category) -> &[E] {
        self.members
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of members of one category.
    pub fn count(&self, category: E::Category) -> usize {
        self.members_of(category).len()
    }

    /// Total number of members.
    pub fn len(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an equal entity is a member.
    pub fn contains(&self, entity: &E) -> bool {
        self.members_of(entity.category()).contains(entity)
    }

    /// Iterates over all members, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.members.values().flatten()
    }
}

fn remove_from<E: Entity>(members: &mut Members<E>, entity: &E) -> Result<()> {
    let category = entity.category();
    let list = members
        .get_mut(&category)
        .ok_or_else(|| not_found(entity))?;
    let pos = list
        .iter()
        .position(|m| m == entity)
        .ok_or_else(|| not_found(entity))?;
    list.remove(pos);
    if list.is_empty() {
        members.remove(&category);
    }
    Ok(())
}

fn not_found<E: Entity>(entity: &E) -> AssignError {
    AssignError::MemberNotFound {
        entity: format!("{entity:?}"),
    }
}

impl<E: Entity> Default for Group<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> FromIterator<E> for Group<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut group = Self::new();
        group.add_all(iter);
        group
    }
}

impl<E: Entity + fmt::Display> fmt::Display for Group<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group(")?;
        for (i, entity) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entity}")?;
        }
        write!(f, ")")
    }
}
