//! Inventory stage: consumes `PickupIntent`.

use barrow_ecs::prelude::*;
use tracing::debug;

/// Moves items from the ground into the actor's inventory.
///
/// Every item entity whose position exactly matches the actor's tile is
/// appended to the carry list and loses its `Position` (it is no longer on
/// the ground). The intent is consumed even when nothing was found.
pub struct InventorySystem;

impl System for InventorySystem {
    fn name(&self) -> &str {
        "inventory"
    }

    fn run(&mut self, world: &mut World) {
        for entity in world.entities_with(ComponentKind::PickupIntent) {
            if world.take_component::<PickupIntent>(entity).is_none() {
                continue;
            }
            let Some(actor_position) = world.get_component::<Position>(entity).copied() else {
                debug!(%entity, "pickup intent dropped: entity has no position");
                continue;
            };
            if !world.has_component(entity, ComponentKind::Inventory) {
                debug!(%entity, "pickup intent dropped: entity has no inventory");
                continue;
            }

            for item in world.entities_with(ComponentKind::Item) {
                let Some(item_position) = world.get_component::<Position>(item) else {
                    // Carried items have no position; they are not on the ground.
                    continue;
                };
                if *item_position != actor_position {
                    continue;
                }
                world.remove_component(item, ComponentKind::Position);
                if let Some(inventory) = world.get_component_mut::<Inventory>(entity) {
                    inventory.items.push(item);
                }
                world.publish(Event::ItemPickedUp { entity, item });
            }
        }
    }
}
