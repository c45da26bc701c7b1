//! The turn-driving engine.
//!
//! Wires the pipeline in its fixed order and drives one actor per call:
//! the current entity (or its AI) deposits an intent, every system runs,
//! events flush, and the scheduler advances to the next living participant.

use barrow_ecs::prelude::*;
use tracing::debug;

use crate::ai::AiSystem;
use crate::systems::{
    CombatSystem, EquipmentSystem, InventorySystem, MovementSystem, UsableSystem,
};

/// What one turn did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    /// The entity that acted this turn.
    pub actor: Entity,
    /// The tick's event/intent accounting.
    pub report: TickReport,
}

/// Owns the world and the fixed pipeline order: movement, combat, inventory
/// pickup, equipment, item use. The AI decision stage runs before the
/// pipeline, only for non-player actors; player intents are deposited by the
/// caller between turns.
pub struct Engine {
    world: World,
    ai: AiSystem,
}

impl Engine {
    /// A wired, empty engine. Spawn entities and add them to the turn order
    /// before taking turns.
    pub fn new() -> Self {
        let mut world = World::new();
        world.add_system(MovementSystem);
        world.add_system(CombatSystem);
        world.add_system(InventorySystem);
        world.add_system(EquipmentSystem);
        world.add_system(UsableSystem);
        Self {
            world,
            ai: AiSystem::new(),
        }
    }

    /// Run one full turn for the current entity. Returns `None` when the
    /// turn order has no participants.
    pub fn take_turn(&mut self) -> Option<TurnSummary> {
        let actor = self.world.current_entity()?;
        debug!(%actor, "taking turn");

        if !self
            .world
            .has_component(actor, ComponentKind::PlayerControlled)
        {
            self.ai.set_actor(actor);
            self.ai.run(&mut self.world);
        }

        let report = self.world.run_tick();
        self.world.next_turn();
        Some(TurnSummary { actor, report })
    }

    /// Read access to the world (rendering, assertions).
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world (setup, player intents, subscriptions).
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::{spawn_monster, spawn_player, MonsterBlueprint, PlayerBlueprint};

    fn basic_player() -> PlayerBlueprint {
        PlayerBlueprint {
            x: 0,
            y: 0,
            hp: 100,
            max_hp: 100,
            strength: 15,
        }
    }

    #[test]
    fn pipeline_is_wired_in_fixed_order() {
        let engine = Engine::new();
        assert_eq!(
            engine.world().system_names(),
            vec!["movement", "combat", "inventory", "equipment", "usable"]
        );
    }

    #[test]
    fn empty_turn_order_yields_none() {
        let mut engine = Engine::new();
        assert_eq!(engine.take_turn(), None);
    }

    #[test]
    fn monster_turn_moves_it_toward_the_player() {
        let mut engine = Engine::new();
        let world = engine.world_mut();
        let player = spawn_player(world, &basic_player());
        let monster = spawn_monster(world, &MonsterBlueprint {
            x: 5,
            y: 0,
            hp: 30,
            max_hp: 30,
            strength: 7,
            glyph: 'g',
        });
        world.add_to_turn_order(monster);
        world.add_to_turn_order(player);

        let summary = engine.take_turn().unwrap();
        assert_eq!(summary.actor, monster);
        assert_eq!(
            engine.world().get_component::<Position>(monster),
            Some(&Position { x: 4, y: 0 })
        );
        // One move event was delivered.
        assert_eq!(summary.report.events_delivered, 1);
        // Next up: the player.
        assert_eq!(engine.world().current_entity(), Some(player));
    }

    #[test]
    fn player_turn_consumes_caller_deposited_intent() {
        let mut engine = Engine::new();
        let world = engine.world_mut();
        let player = spawn_player(world, &basic_player());
        world.add_to_turn_order(player);
        world.set_component(player, MoveIntent { dx: 1, dy: 0 });

        let summary = engine.take_turn().unwrap();
        assert_eq!(summary.actor, player);
        assert_eq!(
            engine.world().get_component::<Position>(player),
            Some(&Position { x: 1, y: 0 })
        );
    }

    #[test]
    fn adjacent_monster_attacks_the_player() {
        let mut engine = Engine::new();
        let world = engine.world_mut();
        let player = spawn_player(world, &basic_player());
        let monster = spawn_monster(world, &MonsterBlueprint {
            x: 1,
            y: 0,
            hp: 30,
            max_hp: 30,
            strength: 7,
            glyph: 'g',
        });
        world.add_to_turn_order(monster);
        world.add_to_turn_order(player);

        engine.take_turn().unwrap();

        // Monster strength 7, no weapon; player has no armor equipped
        // (the starting sword is a weapon): 100 - 7 = 93.
        assert_eq!(
            engine.world().get_component::<Health>(player).unwrap().hp,
            93
        );
    }
}
