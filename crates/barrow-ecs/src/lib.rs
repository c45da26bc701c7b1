//! Barrow ECS -- the data-oriented runtime core of a turn-based simulation.
//!
//! Entities are opaque monotonically allocated handles; all data hangs off
//! them in a per-kind component store built around a closed tagged union of
//! component kinds. Systems run once per tick in a fixed order, communicate
//! through short-lived *intent* components and a deferred event queue, and a
//! round-robin scheduler decides whose turn it is.
//!
//! # Quick Start
//!
//! ```
//! use barrow_ecs::prelude::*;
//!
//! let mut world = World::new();
//! let hero = world.create_entity();
//! world.set_component(hero, Position { x: 0, y: 0 });
//! world.set_component(hero, Health { hp: 20, max_hp: 20 });
//! world.add_to_turn_order(hero);
//!
//! assert_eq!(world.get_component::<Position>(hero), Some(&Position { x: 0, y: 0 }));
//! assert_eq!(world.current_entity(), Some(hero));
//! ```

#![deny(unsafe_code)]

pub mod component;
pub mod entity;
pub mod event;
pub mod scheduler;
pub mod store;
pub mod world;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::component::{
        Armor, AttackIntent, Component, ComponentKind, ComponentRecord, EquipIntent,
        EquipmentSlot, Equippable, Health, Inventory, Item, MoveIntent, ParseError,
        PickupIntent, PlayerControlled, Position, Sprite, Strength, UnequipIntent, Usable,
        UseEffect, UseItemIntent, Weapon,
    };
    pub use crate::entity::{Entity, EntityRegistry};
    pub use crate::event::{Event, EventBus, EventHandler, EventKind};
    pub use crate::scheduler::TurnScheduler;
    pub use crate::store::ComponentStore;
    pub use crate::world::{System, TickReport, World};
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------
