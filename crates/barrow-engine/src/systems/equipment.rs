//! Equipment stage: consumes `EquipIntent` and `UnequipIntent`.

use barrow_ecs::prelude::*;
use tracing::debug;

/// Moves item references between the carry list and the slot map.
///
/// Equip validation: the item must be `Equippable` in the requested slot and
/// the target's slot must be free. Any failure drops the intent silently --
/// no event, no partial mutation, no retry.
pub struct EquipmentSystem;

impl EquipmentSystem {
    fn handle_equip(world: &mut World, entity: Entity) {
        let Some(intent) = world.take_component::<EquipIntent>(entity) else {
            return;
        };

        let slot_allowed = world
            .get_component::<Equippable>(intent.item)
            .is_some_and(|equippable| equippable.slots.contains(&intent.slot));
        if !slot_allowed {
            debug!(item = %intent.item, slot = %intent.slot, "equip intent dropped: slot not allowed");
            return;
        }

        let Some(inventory) = world.get_component_mut::<Inventory>(intent.target) else {
            debug!(target = %intent.target, "equip intent dropped: target has no inventory");
            return;
        };
        if inventory.slots.contains_key(&intent.slot) {
            debug!(target = %intent.target, slot = %intent.slot, "equip intent dropped: slot occupied");
            return;
        }

        inventory.slots.insert(intent.slot, intent.item);
        if let Some(index) = inventory.items.iter().position(|&item| item == intent.item) {
            inventory.items.remove(index);
        }

        world.publish(Event::ItemEquipped {
            entity,
            item: intent.item,
            target: intent.target,
        });
    }

    fn handle_unequip(world: &mut World, entity: Entity) {
        let Some(intent) = world.take_component::<UnequipIntent>(entity) else {
            return;
        };

        let Some(inventory) = world.get_component_mut::<Inventory>(intent.target) else {
            debug!(target = %intent.target, "unequip intent dropped: target has no inventory");
            return;
        };
        let Some(item) = inventory.slots.remove(&intent.slot) else {
            debug!(target = %intent.target, slot = %intent.slot, "unequip intent dropped: slot empty");
            return;
        };
        inventory.items.push(item);

        world.publish(Event::ItemUnequipped {
            entity,
            item,
            target: intent.target,
        });
    }
}

impl System for EquipmentSystem {
    fn name(&self) -> &str {
        "equipment"
    }

    fn run(&mut self, world: &mut World) {
        for entity in world.entities_with(ComponentKind::EquipIntent) {
            Self::handle_equip(world, entity);
        }
        for entity in world.entities_with(ComponentKind::UnequipIntent) {
            Self::handle_unequip(world, entity);
        }
    }
}
