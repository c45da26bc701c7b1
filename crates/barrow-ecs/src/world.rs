//! The [`World`] is the composition root: it owns the entity registry, the
//! component store, the event bus, the turn scheduler, and the ordered
//! system pipeline, and exposes the single [`run_tick`](World::run_tick)
//! entry point.
//!
//! A tick is an uninterrupted, single-threaded sequence: every system runs
//! once in registration order, leftover intent components are swept (an
//! intent must never survive the tick that created it), and the event queue
//! is flushed exactly once. Event handlers run last and may mutate the world
//! freely -- including destroying entities -- because all of the tick's
//! state changes are already complete.

use tracing::{debug, warn};

use crate::component::{Component, ComponentKind, ComponentRecord, Inventory};
use crate::entity::{Entity, EntityRegistry};
use crate::event::{Event, EventBus, EventKind};
use crate::scheduler::TurnScheduler;
use crate::store::ComponentStore;

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// One stage of the update pipeline. Systems scan the store for the intent
/// or component kind they care about, apply effects, queue events, and
/// consume the intents they processed. Registration order is execution
/// order, every tick.
pub trait System {
    /// Short name used for diagnostics.
    fn name(&self) -> &str;

    /// Run the stage once over the world.
    fn run(&mut self, world: &mut World);
}

// ---------------------------------------------------------------------------
// TickReport
// ---------------------------------------------------------------------------

/// What a tick did, for callers that track simulation health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Events delivered by this tick's flush.
    pub events_delivered: usize,
    /// Unconsumed intents swept at end of tick (normal for invalid or
    /// unprocessed actions; they are dropped, never retried).
    pub intents_dropped: usize,
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The sole mutable resource of the simulation core.
pub struct World {
    registry: EntityRegistry,
    store: ComponentStore,
    events: EventBus,
    scheduler: TurnScheduler,
    systems: Vec<Box<dyn System>>,
}

impl World {
    /// Create an empty world with no entities and no systems.
    pub fn new() -> Self {
        Self {
            registry: EntityRegistry::new(),
            store: ComponentStore::new(),
            events: EventBus::new(),
            scheduler: TurnScheduler::new(),
            systems: Vec::new(),
        }
    }

    // -- entity lifecycle ---------------------------------------------------

    /// Allocate a fresh entity. It starts with no components and does not
    /// participate in the turn order until added.
    pub fn create_entity(&mut self) -> Entity {
        self.registry.create()
    }

    /// Destroy an entity: retire the handle, clear every component, drop it
    /// from the turn order, and purge it from every surviving inventory so
    /// no slot or carry-list entry dangles. Idempotent; returns whether the
    /// entity was alive. Safe to call from an event handler mid-flush.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.registry.destroy(entity) {
            return false;
        }
        self.store.remove_all(entity);
        self.scheduler.remove_entity(entity);
        for holder in self.store.entities_with(ComponentKind::Inventory) {
            if let Some(inventory) = self.store.get_mut_as::<Inventory>(holder) {
                inventory.items.retain(|&item| item != entity);
                inventory.slots.retain(|_, &mut item| item != entity);
            }
        }
        true
    }

    /// Whether the handle refers to a live entity.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.registry.is_alive(entity)
    }

    /// All live entities in ascending handle order.
    pub fn live_entities(&self) -> Vec<Entity> {
        self.registry.all_alive()
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.registry.alive_count()
    }

    // -- component access ---------------------------------------------------

    /// Insert or overwrite a component on a live entity. Writes aimed at a
    /// dead entity are discarded: a stale handle must not resurrect state.
    pub fn set_component(&mut self, entity: Entity, component: impl Into<Component>) {
        let component = component.into();
        if !self.registry.is_alive(entity) {
            warn!(
                %entity,
                kind = component.kind().name(),
                "discarding component write to dead entity"
            );
            return;
        }
        self.store.insert(entity, component);
    }

    /// Borrow the record of type `T` on `entity`. Absence is the common
    /// case; every caller branches on it.
    pub fn get_component<T: ComponentRecord>(&self, entity: Entity) -> Option<&T> {
        self.store.get_as::<T>(entity)
    }

    /// Mutably borrow the record of type `T` on `entity`.
    pub fn get_component_mut<T: ComponentRecord>(&mut self, entity: Entity) -> Option<&mut T> {
        self.store.get_mut_as::<T>(entity)
    }

    /// Whether `entity` holds a component of `kind`.
    pub fn has_component(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.store.has(entity, kind)
    }

    /// Remove the component of `kind` from `entity`. No-op if absent.
    pub fn remove_component(&mut self, entity: Entity, kind: ComponentKind) -> Option<Component> {
        self.store.remove(entity, kind)
    }

    /// Remove and return the record of type `T` -- how systems consume the
    /// intents they process.
    pub fn take_component<T: ComponentRecord>(&mut self, entity: Entity) -> Option<T> {
        self.store.take::<T>(entity)
    }

    /// Snapshot of every entity holding `kind`, ascending by handle. Safe to
    /// mutate the world while iterating the returned list.
    pub fn entities_with(&self, kind: ComponentKind) -> Vec<Entity> {
        self.store.entities_with(kind)
    }

    // -- events -------------------------------------------------------------

    /// Queue an event for delivery at this tick's flush.
    pub fn publish(&mut self, event: Event) {
        self.events.publish(event);
    }

    /// Register a handler for `kind`; same-kind handlers run in registration
    /// order. Relative order across different kinds follows queue order, not
    /// subscription order.
    pub fn subscribe(&mut self, kind: EventKind, handler: impl FnMut(&mut World, &Event) + 'static) {
        self.events.subscribe(kind, handler);
    }

    /// Events queued and not yet flushed.
    pub fn pending_events(&self) -> usize {
        self.events.pending()
    }

    /// Deliver every event queued so far, in publish order, to the
    /// registered handlers; returns how many were delivered. Events
    /// published by handlers during the flush stay queued for the *next*
    /// flush -- one batch per tick, no recursive draining.
    pub fn flush_events(&mut self) -> usize {
        let batch = self.events.take_batch();
        let mut handlers = self.events.take_handlers();
        for event in &batch {
            if let Some(list) = handlers.get_mut(&event.kind()) {
                for handler in list.iter_mut() {
                    handler(self, event);
                }
            }
        }
        self.events.restore_handlers(handlers);
        batch.len()
    }

    // -- turn order ---------------------------------------------------------

    /// Add an entity to the end of the turn order.
    pub fn add_to_turn_order(&mut self, entity: Entity) {
        self.scheduler.add_entity(entity);
    }

    /// Remove an entity from the turn order. Idempotent.
    pub fn remove_from_turn_order(&mut self, entity: Entity) -> bool {
        self.scheduler.remove_entity(entity)
    }

    /// Advance the turn order to the next living participant.
    pub fn next_turn(&mut self) -> Option<Entity> {
        self.scheduler.next_turn(&self.registry)
    }

    /// The entity whose turn it currently is.
    pub fn current_entity(&self) -> Option<Entity> {
        self.scheduler.current_entity()
    }

    /// Read access to the turn scheduler.
    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    // -- pipeline -----------------------------------------------------------

    /// Append a system to the pipeline. Registration happens once at
    /// startup, in the desired execution order.
    pub fn add_system(&mut self, system: impl System + 'static) {
        self.systems.push(Box::new(system));
    }

    /// Number of registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Names of the registered systems, in execution order.
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// Execute one tick: run every system once in registration order, sweep
    /// leftover intents, then flush the event queue.
    pub fn run_tick(&mut self) -> TickReport {
        // The pipeline is detached while it runs so each system can borrow
        // the world mutably. Systems registered mid-tick land behind the
        // originals.
        let mut systems = std::mem::take(&mut self.systems);
        for system in &mut systems {
            system.run(self);
        }
        let added = std::mem::replace(&mut self.systems, systems);
        self.systems.extend(added);

        let intents_dropped = self.sweep_intents();
        let events_delivered = self.flush_events();
        TickReport {
            events_delivered,
            intents_dropped,
        }
    }

    /// Drop every intent component still present after the pipeline ran.
    /// An unconsumed intent means its system did not run or found it
    /// invalid; either way it is dropped, never retried on a later tick.
    fn sweep_intents(&mut self) -> usize {
        let mut dropped = 0;
        for kind in ComponentKind::INTENTS {
            let swept = self.store.clear_kind(kind);
            if swept > 0 {
                debug!(kind = kind.name(), count = swept, "sweeping unconsumed intents");
                dropped += swept;
            }
        }
        dropped
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entity_count", &self.registry.alive_count())
            .field("system_count", &self.systems.len())
            .field("pending_events", &self.events.pending())
            .field("turn_order_len", &self.scheduler.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
