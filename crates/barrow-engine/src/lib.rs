//! Barrow Engine -- the turn-based gameplay pipeline on top of
//! [`barrow_ecs`].
//!
//! The ECS crate provides the storage, event, and scheduling machinery; this
//! crate supplies the gameplay: the five pipeline systems (movement, combat,
//! inventory pickup, equipment, item use), the AI decision stage, blueprint
//! spawning, and the [`Engine`](engine::Engine) that drives one actor per
//! turn.
//!
//! # Quick Start
//!
//! ```
//! use barrow_engine::prelude::*;
//!
//! let mut engine = Engine::new();
//! let world = engine.world_mut();
//! let player = spawn_player(world, &PlayerBlueprint {
//!     x: 0, y: 0, hp: 100, max_hp: 100, strength: 15,
//! });
//! world.add_to_turn_order(player);
//!
//! // The input layer deposits an intent, then the turn runs.
//! world.set_component(player, MoveIntent { dx: 1, dy: 0 });
//! let summary = engine.take_turn().unwrap();
//! assert_eq!(summary.actor, player);
//! ```

#![deny(unsafe_code)]

pub mod ai;
pub mod engine;
pub mod spawn;
pub mod systems;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::ai::AiSystem;
    pub use crate::engine::{Engine, TurnSummary};
    pub use crate::spawn::{
        spawn_item, spawn_monster, spawn_player, ItemBlueprint, MonsterBlueprint, PlayerBlueprint,
    };
    pub use crate::systems::{
        CombatSystem, EquipmentSystem, InventorySystem, MovementSystem, UsableSystem,
    };
    pub use barrow_ecs::prelude::*;
}
