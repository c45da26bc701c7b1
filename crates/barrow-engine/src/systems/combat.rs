//! Combat stage: consumes `AttackIntent`.

use barrow_ecs::prelude::*;
use tracing::debug;

/// Resolves attack intents into damage, defeat events, and destruction.
///
/// The canonical damage formula is
/// `max(raw - target equipped armor defense, 0)`, where `raw` is the
/// intent's explicit damage when present, otherwise the attacker's equipped
/// weapon damage plus `Strength`. Only items occupying an equipment slot
/// contribute; the carry list does not.
pub struct CombatSystem;

impl CombatSystem {
    /// Summed damage of weapons in the entity's equipment slots.
    fn equipped_weapon_damage(world: &World, entity: Entity) -> i32 {
        let Some(inventory) = world.get_component::<Inventory>(entity) else {
            return 0;
        };
        inventory
            .slots
            .values()
            .filter_map(|&item| world.get_component::<Weapon>(item))
            .map(|weapon| weapon.damage)
            .sum()
    }

    /// Summed defense of armor in the entity's equipment slots.
    fn equipped_armor_defense(world: &World, entity: Entity) -> i32 {
        let Some(inventory) = world.get_component::<Inventory>(entity) else {
            return 0;
        };
        inventory
            .slots
            .values()
            .filter_map(|&item| world.get_component::<Armor>(item))
            .map(|armor| armor.defense)
            .sum()
    }

    fn strength(world: &World, entity: Entity) -> i32 {
        world
            .get_component::<Strength>(entity)
            .map_or(0, |strength| strength.value)
    }
}

impl System for CombatSystem {
    fn name(&self) -> &str {
        "combat"
    }

    fn run(&mut self, world: &mut World) {
        for entity in world.entities_with(ComponentKind::AttackIntent) {
            let Some(intent) = world.take_component::<AttackIntent>(entity) else {
                continue;
            };
            let target = intent.target;

            let raw = intent.damage.unwrap_or_else(|| {
                Self::equipped_weapon_damage(world, entity) + Self::strength(world, entity)
            });
            let damage = (raw - Self::equipped_armor_defense(world, target)).max(0);

            // A target that no longer exists (e.g. already destroyed by an
            // earlier attack this tick) drops the intent with no event.
            let Some(health) = world.get_component_mut::<Health>(target) else {
                debug!(attacker = %entity, %target, "attack intent dropped: target has no health");
                continue;
            };

            health.hp -= damage;
            let defeated = health.hp <= 0;

            world.publish(Event::EntityAttacked {
                attacker: entity,
                target,
                damage,
            });

            if defeated {
                world.publish(Event::EntityDefeated { entity: target });
                world.destroy_entity(target);
            }
        }
    }
}
