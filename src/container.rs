//! Integer-indexed entity containers.
//!
//! Nodes and instances never hold owning references to each other; all
//! cross-entity links are small integer indices into a [`Container`]. The
//! container is an ordered map from index to entity, so enumeration order is
//! always ascending by index and therefore deterministic.
//!
//! Containers are **immutable by convention**: [`Container::add`] and
//! [`Container::add_two`] return a new container and leave the original
//! untouched, so intermediate cluster states produced during evacuation
//! simulation never alias each other.

use crate::errors::{PlanError, PlanResult};
use std::collections::BTreeMap;

/// Index of a node in the node container.
pub type Ndx = i32;

/// Index of an instance in the instance container.
pub type Idx = i32;

/// Index of a node group in the group container.
pub type Gdx = i32;

/// Capability set shared by every containable entity.
///
/// Both nodes and instances carry a stable index and a human name; the
/// container is generic over anything that exposes them.
pub trait Element: Clone {
    /// The entity's stable integer index.
    fn idx_of(&self) -> i32;

    /// The entity's human-readable name.
    fn name_of(&self) -> &str;

    /// Return a copy with the index replaced.
    #[must_use]
    fn set_idx(self, idx: i32) -> Self;

    /// Return a copy with the name replaced.
    #[must_use]
    fn set_name(self, name: &str) -> Self;
}

/// Ordered mapping from integer index to entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
    items: BTreeMap<i32, T>,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }
}

impl<T: Element> Container<T> {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Build a container from a list of entities, keyed by each entity's own
    /// index. Later duplicates overwrite earlier ones.
    #[must_use]
    pub fn from_list(items: Vec<T>) -> Self {
        let items = items.into_iter().map(|e| (e.idx_of(), e)).collect();
        Self { items }
    }

    /// Look up an entity by index.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] if no entity carries the index.
    pub fn find(&self, idx: i32) -> PlanResult<&T> {
        self.items
            .get(&idx)
            .ok_or_else(|| PlanError::NotFound(format!("index {idx}")))
    }

    /// Look up an entity by name, scanning in ascending index order.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] if no entity carries the name.
    pub fn find_by_name(&self, name: &str) -> PlanResult<&T> {
        self.items
            .values()
            .find(|e| e.name_of() == name)
            .ok_or_else(|| PlanError::NotFound(format!("name {name:?}")))
    }

    /// Return a new container with `item` installed at `idx`.
    #[must_use]
    pub fn add(&self, idx: i32, item: T) -> Self {
        let mut items = self.items.clone();
        items.insert(idx, item);
        Self { items }
    }

    /// Return a new container with two entities installed in one step.
    ///
    /// Used by the relocation primitive, which always rewrites the source and
    /// target node together.
    #[must_use]
    pub fn add_two(&self, idx_a: i32, item_a: T, idx_b: i32, item_b: T) -> Self {
        let mut items = self.items.clone();
        items.insert(idx_a, item_a);
        items.insert(idx_b, item_b);
        Self { items }
    }

    /// All indices, ascending.
    #[must_use]
    pub fn keys(&self) -> Vec<i32> {
        self.items.keys().copied().collect()
    }

    /// All entities, in ascending index order.
    #[must_use]
    pub fn elems(&self) -> Vec<&T> {
        self.items.values().collect()
    }

    /// Iterate `(index, entity)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> {
        self.items.iter().map(|(&k, v)| (k, v))
    }

    /// Number of entities held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the container holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
