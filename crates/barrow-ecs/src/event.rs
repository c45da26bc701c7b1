//! Deferred gameplay events.
//!
//! Systems publish [`Event`]s while they run; nothing is delivered until the
//! [`World`](crate::world::World) flushes the queue after every system in the
//! tick has finished. An event handler may publish further events, but those
//! are deferred to the *next* flush -- the batch taken at flush start is the
//! whole batch, so handler chains cannot recurse within one tick.
//!
//! Payloads are a closed tagged union rather than a bag of named fields, so
//! a handler unpacks exactly the fields its event kind actually carries.

use std::collections::HashMap;

use crate::component::Position;
use crate::entity::Entity;
use crate::world::World;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A gameplay notification queued by a system and delivered at flush time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// An entity's position changed.
    EntityMoved {
        entity: Entity,
        from: Position,
        to: Position,
    },
    /// An attack resolved (even for zero damage).
    EntityAttacked {
        attacker: Entity,
        target: Entity,
        damage: i32,
    },
    /// An entity's hit points reached zero and it was destroyed.
    EntityDefeated { entity: Entity },
    /// An item moved from the ground into an inventory.
    ItemPickedUp { entity: Entity, item: Entity },
    /// A usable item's effect was applied.
    ItemUsed {
        entity: Entity,
        item: Entity,
        target: Entity,
    },
    /// An item moved from the carry list into an equipment slot.
    ItemEquipped {
        entity: Entity,
        item: Entity,
        target: Entity,
    },
    /// An item moved from an equipment slot back to the carry list.
    ItemUnequipped {
        entity: Entity,
        item: Entity,
        target: Entity,
    },
}

impl Event {
    /// The kind tag used for subscription routing.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::EntityMoved { .. } => EventKind::EntityMoved,
            Event::EntityAttacked { .. } => EventKind::EntityAttacked,
            Event::EntityDefeated { .. } => EventKind::EntityDefeated,
            Event::ItemPickedUp { .. } => EventKind::ItemPickedUp,
            Event::ItemUsed { .. } => EventKind::ItemUsed,
            Event::ItemEquipped { .. } => EventKind::ItemEquipped,
            Event::ItemUnequipped { .. } => EventKind::ItemUnequipped,
        }
    }

    /// The acting (source) entity of this event.
    pub fn source(&self) -> Entity {
        match *self {
            Event::EntityMoved { entity, .. } => entity,
            Event::EntityAttacked { attacker, .. } => attacker,
            Event::EntityDefeated { entity } => entity,
            Event::ItemPickedUp { entity, .. } => entity,
            Event::ItemUsed { entity, .. } => entity,
            Event::ItemEquipped { entity, .. } => entity,
            Event::ItemUnequipped { entity, .. } => entity,
        }
    }
}

/// Fieldless tags for the event kinds, used to key subscriber lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    EntityMoved,
    EntityAttacked,
    EntityDefeated,
    ItemPickedUp,
    ItemUsed,
    ItemEquipped,
    ItemUnequipped,
}

impl EventKind {
    /// Stable snake_case name, used for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::EntityMoved => "entity_moved",
            EventKind::EntityAttacked => "entity_attacked",
            EventKind::EntityDefeated => "entity_defeated",
            EventKind::ItemPickedUp => "item_picked_up",
            EventKind::ItemUsed => "item_used",
            EventKind::ItemEquipped => "item_equipped",
            EventKind::ItemUnequipped => "item_unequipped",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// A subscriber callback. Handlers run only during a flush, after every
/// system of the tick has finished, so they may assume the tick's state
/// mutations are complete -- and may themselves mutate the world (e.g.
/// destroy an entity) safely.
pub type EventHandler = Box<dyn FnMut(&mut World, &Event)>;

pub(crate) type HandlerMap = HashMap<EventKind, Vec<EventHandler>>;

/// Buffered event records plus per-kind subscriber lists.
///
/// `publish` only appends; draining is owned by the world's flush so that
/// handlers can borrow the world mutably while the bus's own storage is
/// temporarily detached.
#[derive(Default)]
pub struct EventBus {
    queue: Vec<Event>,
    handlers: HandlerMap,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event to the buffer. Never invokes handlers synchronously.
    pub fn publish(&mut self, event: Event) {
        self.queue.push(event);
    }

    /// Register a handler for `kind`. Handlers of the same kind are invoked
    /// in registration order.
    pub fn subscribe(&mut self, kind: EventKind, handler: impl FnMut(&mut World, &Event) + 'static) {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Number of events waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Detach the currently queued batch, leaving the buffer empty. Events
    /// published afterwards (by handlers) accumulate for the next flush.
    pub(crate) fn take_batch(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.queue)
    }

    /// Detach the subscriber lists for the duration of a flush.
    pub(crate) fn take_handlers(&mut self) -> HandlerMap {
        std::mem::take(&mut self.handlers)
    }

    /// Reattach subscriber lists after a flush. Subscriptions made while the
    /// flush ran (self.handlers) are appended behind the originals.
    pub(crate) fn restore_handlers(&mut self, mut handlers: HandlerMap) {
        for (kind, added) in self.handlers.drain() {
            handlers.entry(kind).or_default().extend(added);
        }
        self.handlers = handlers;
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("pending", &self.queue.len())
            .field("subscribed_kinds", &self.handlers.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
