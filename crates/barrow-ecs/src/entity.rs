//! Entity identifiers and the registry of live entities.
//!
//! An [`Entity`] is an opaque 64-bit handle with no intrinsic data. Handles
//! are allocated from a monotonic counter and are never reused within a
//! process lifetime, so a stale handle held across a destroy can never
//! silently resolve to an unrelated newer entity.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// An opaque entity handle. Pure identity: all associated data lives in the
/// component store, keyed by this handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(u64);

impl Entity {
    /// Raw `u64` representation.
    #[inline]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    /// Reconstruct from a raw `u64`.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EntityRegistry
// ---------------------------------------------------------------------------

/// The set of live entities and the sole authority for creating them.
///
/// Destruction here only marks the handle dead; clearing the dead entity's
/// components and scheduler slot is coordinated by the
/// [`World`](crate::world::World).
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    next_id: u64,
    alive: BTreeSet<Entity>,
}

impl EntityRegistry {
    /// Create an empty registry. The first allocated handle is `1`.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            alive: BTreeSet::new(),
        }
    }

    /// Allocate the next handle and mark it alive.
    pub fn create(&mut self) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.alive.insert(entity);
        entity
    }

    /// Mark an entity dead. Returns `false` if it was not alive; the counter
    /// never rewinds, so the handle stays retired forever.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.alive.remove(&entity)
    }

    /// Whether the handle refers to a currently live entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// All live entities in ascending handle order.
    pub fn all_alive(&self) -> Vec<Entity> {
        self.alive.iter().copied().collect()
    }

    /// Number of live entities.
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
