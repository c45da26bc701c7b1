//! Round-robin turn order over participating entities.
//!
//! The scheduler is an ordered sequence of entity handles plus a cursor. It
//! may transiently disagree with the registry's alive-set (an entity can be
//! destroyed mid-tick before the scheduler hears about it); [`next_turn`]
//! self-heals by dropping dead entries instead of surfacing an error.
//!
//! [`next_turn`]: TurnScheduler::next_turn

use tracing::debug;

use crate::entity::{Entity, EntityRegistry};

/// Turn order plus cursor. Owned by the [`World`](crate::world::World);
/// participation is opt-in via `add_entity`.
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    turn_order: Vec<Entity>,
    current: usize,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity to the end of the turn order.
    pub fn add_entity(&mut self, entity: Entity) {
        self.turn_order.push(entity);
    }

    /// Remove an entity from the turn order by value. When the removed index
    /// is at or before the cursor, the cursor shifts back one step (never
    /// below zero) so it keeps pointing at the same logical next entity.
    /// Removing an absent entity is a no-op; returns whether a removal
    /// happened.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        let Some(index) = self.turn_order.iter().position(|&e| e == entity) else {
            return false;
        };
        self.turn_order.remove(index);
        if index <= self.current && self.current > 0 {
            self.current -= 1;
        }
        true
    }

    /// Advance to the next living participant.
    ///
    /// Entities no longer alive in `registry` are removed and skipped until
    /// a living one is found; returns `None` once the order is empty.
    pub fn next_turn(&mut self, registry: &EntityRegistry) -> Option<Entity> {
        loop {
            if self.turn_order.is_empty() {
                return None;
            }
            self.current = (self.current + 1) % self.turn_order.len();
            let candidate = self.turn_order[self.current];
            if registry.is_alive(candidate) {
                return Some(candidate);
            }
            debug!(entity = %candidate, "turn order self-heal: dropping dead entity");
            self.remove_entity(candidate);
        }
    }

    /// The entity whose turn it currently is, if any participants remain.
    pub fn current_entity(&self) -> Option<Entity> {
        self.turn_order.get(self.current).copied()
    }

    /// The participation sequence in turn order.
    pub fn turn_order(&self) -> &[Entity] {
        &self.turn_order
    }

    pub fn len(&self) -> usize {
        self.turn_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turn_order.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
