//! Usable-item stage: consumes `UseItemIntent`.

use barrow_ecs::prelude::*;
use tracing::{debug, warn};

/// Applies item effects (heal, damage, repair) to targets.
///
/// Quirk, kept deliberately: encountering an intent whose item has no
/// `Usable` component aborts the remaining scan for this tick, not just that
/// one intent. The stranded intents are swept at end of tick, so nothing is
/// retried later either way.
pub struct UsableSystem;

impl UsableSystem {
    /// Drop `item` from `consumer`'s carry list, if it is there.
    fn consume_from_inventory(world: &mut World, consumer: Entity, item: Entity) {
        if let Some(inventory) = world.get_component_mut::<Inventory>(consumer) {
            if let Some(index) = inventory.items.iter().position(|&carried| carried == item) {
                inventory.items.remove(index);
            }
        }
    }

    fn apply_heal(world: &mut World, entity: Entity, intent: UseItemIntent, power: i32) {
        let Some(health) = world.get_component::<Health>(intent.target) else {
            debug!(target = %intent.target, "use intent dropped: target has no health");
            return;
        };
        if health.hp >= health.max_hp {
            // Healing at full health is a complete no-op: the item is not
            // consumed and no event fires.
            return;
        }

        Self::consume_from_inventory(world, intent.consumer, intent.item);
        if let Some(health) = world.get_component_mut::<Health>(intent.target) {
            health.hp = (health.hp + power).min(health.max_hp);
        }
        world.remove_component(intent.item, ComponentKind::Usable);
        world.publish(Event::ItemUsed {
            entity,
            item: intent.item,
            target: intent.target,
        });
    }

    fn apply_damage(world: &mut World, entity: Entity, intent: UseItemIntent, power: i32) {
        let Some(health) = world.get_component_mut::<Health>(intent.target) else {
            debug!(target = %intent.target, "use intent dropped: target has no health");
            return;
        };
        health.hp = (health.hp - power).max(0);
        let defeated = health.hp == 0;

        Self::consume_from_inventory(world, intent.consumer, intent.item);
        world.remove_component(intent.item, ComponentKind::Usable);
        world.publish(Event::ItemUsed {
            entity,
            item: intent.item,
            target: intent.target,
        });

        if defeated {
            world.publish(Event::EntityDefeated {
                entity: intent.target,
            });
            world.destroy_entity(intent.target);
        }
    }
}

impl System for UsableSystem {
    fn name(&self) -> &str {
        "usable"
    }

    fn run(&mut self, world: &mut World) {
        for entity in world.entities_with(ComponentKind::UseItemIntent) {
            let Some(intent) = world.take_component::<UseItemIntent>(entity) else {
                continue;
            };

            let Some(usable) = world.get_component::<Usable>(intent.item).copied() else {
                warn!(item = %intent.item, "use-item scan aborted: item is not usable");
                return;
            };

            match usable.effect {
                UseEffect::Heal => Self::apply_heal(world, entity, intent, usable.power),
                UseEffect::Damage => Self::apply_damage(world, entity, intent, usable.power),
                // Reserved for armor durability mechanics.
                UseEffect::Repair => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn world_with_usable() -> World {
        let mut world = World::new();
        world.add_system(UsableSystem);
        world
    }

    /// Actor carrying a potion with the given effect.
    fn actor_with_item(world: &mut World, effect: UseEffect, power: i32) -> (Entity, Entity) {
        let item = world.create_entity();
        world.set_component(
            item,
            Item {
                name: "potion".to_owned(),
                weight: 1,
                value: 5,
            },
        );
        world.set_component(item, Usable { effect, power });

        let actor = world.create_entity();
        let mut inventory = Inventory::with_capacity(10);
        inventory.items.push(item);
        world.set_component(actor, inventory);
        (actor, item)
    }

    fn count_events(world: &mut World, kind: EventKind) -> Rc<RefCell<u32>> {
        let counter = Rc::new(RefCell::new(0u32));
        let log = Rc::clone(&counter);
        world.subscribe(kind, move |_world, _event| {
            *log.borrow_mut() += 1;
        });
        counter
    }

    #[test]
    fn heal_consumes_item_and_caps_at_max() {
        let mut world = world_with_usable();
        let (actor, item) = actor_with_item(&mut world, UseEffect::Heal, 30);
        world.set_component(actor, Health { hp: 40, max_hp: 50 });

        let used = count_events(&mut world, EventKind::ItemUsed);
        world.set_component(
            actor,
            UseItemIntent {
                item,
                consumer: actor,
                target: actor,
            },
        );
        world.run_tick();

        assert_eq!(world.get_component::<Health>(actor).unwrap().hp, 50);
        // Spent: out of the carry list and no longer usable, but not deleted.
        assert!(world.get_component::<Inventory>(actor).unwrap().items.is_empty());
        assert!(!world.has_component(item, ComponentKind::Usable));
        assert!(world.is_alive(item));
        assert_eq!(*used.borrow(), 1);
    }

    #[test]
    fn heal_at_full_health_is_a_complete_noop() {
        let mut world = world_with_usable();
        let (actor, item) = actor_with_item(&mut world, UseEffect::Heal, 30);
        world.set_component(actor, Health { hp: 50, max_hp: 50 });

        let used = count_events(&mut world, EventKind::ItemUsed);
        world.set_component(
            actor,
            UseItemIntent {
                item,
                consumer: actor,
                target: actor,
            },
        );
        world.run_tick();

        assert_eq!(world.get_component::<Health>(actor).unwrap().hp, 50);
        assert_eq!(world.get_component::<Inventory>(actor).unwrap().items, vec![item]);
        assert!(world.has_component(item, ComponentKind::Usable));
        assert_eq!(*used.borrow(), 0);
        // The intent itself is still gone.
        assert!(!world.has_component(actor, ComponentKind::UseItemIntent));
    }

    #[test]
    fn damage_floors_at_zero_and_defeats() {
        let mut world = world_with_usable();
        let (actor, item) = actor_with_item(&mut world, UseEffect::Damage, 99);
        let victim = world.create_entity();
        world.set_component(victim, Health { hp: 10, max_hp: 10 });
        world.add_to_turn_order(victim);

        let defeats = count_events(&mut world, EventKind::EntityDefeated);
        world.set_component(
            actor,
            UseItemIntent {
                item,
                consumer: actor,
                target: victim,
            },
        );
        world.run_tick();

        assert_eq!(*defeats.borrow(), 1);
        assert!(!world.is_alive(victim));
        assert!(world.get_component::<Inventory>(actor).unwrap().items.is_empty());
        assert!(!world.has_component(item, ComponentKind::Usable));
    }

    #[test]
    fn damage_below_lethal_just_hurts() {
        let mut world = world_with_usable();
        let (actor, item) = actor_with_item(&mut world, UseEffect::Damage, 4);
        let victim = world.create_entity();
        world.set_component(victim, Health { hp: 10, max_hp: 10 });

        world.set_component(
            actor,
            UseItemIntent {
                item,
                consumer: actor,
                target: victim,
            },
        );
        world.run_tick();

        assert_eq!(world.get_component::<Health>(victim).unwrap().hp, 6);
        assert!(world.is_alive(victim));
    }

    #[test]
    fn repair_is_a_reserved_noop_but_consumes_the_intent() {
        let mut world = world_with_usable();
        let (actor, item) = actor_with_item(&mut world, UseEffect::Repair, 10);
        world.set_component(actor, Health { hp: 5, max_hp: 50 });

        let used = count_events(&mut world, EventKind::ItemUsed);
        world.set_component(
            actor,
            UseItemIntent {
                item,
                consumer: actor,
                target: actor,
            },
        );
        world.run_tick();

        assert_eq!(world.get_component::<Health>(actor).unwrap().hp, 5);
        assert_eq!(*used.borrow(), 0);
        assert!(!world.has_component(actor, ComponentKind::UseItemIntent));
    }

    #[test]
    fn non_usable_item_aborts_the_remaining_scan() {
        let mut world = world_with_usable();

        // Lowest-id actor holds a dud; scans run in ascending entity order,
        // so the dud is hit first and strands the later intent.
        let dud = world.create_entity();
        let first = world.create_entity();
        let mut first_inventory = Inventory::with_capacity(5);
        first_inventory.items.push(dud);
        world.set_component(first, first_inventory);

        let (second, potion) = actor_with_item(&mut world, UseEffect::Heal, 10);
        world.set_component(second, Health { hp: 1, max_hp: 20 });

        let used = count_events(&mut world, EventKind::ItemUsed);
        world.set_component(
            first,
            UseItemIntent {
                item: dud,
                consumer: first,
                target: first,
            },
        );
        world.set_component(
            second,
            UseItemIntent {
                item: potion,
                consumer: second,
                target: second,
            },
        );
        let report = world.run_tick();

        // The potion was never applied...
        assert_eq!(world.get_component::<Health>(second).unwrap().hp, 1);
        assert_eq!(*used.borrow(), 0);
        // ...and the stranded intent was swept rather than carried over.
        assert_eq!(report.intents_dropped, 1);
        assert!(!world.has_component(second, ComponentKind::UseItemIntent));
        world.run_tick();
        assert_eq!(world.get_component::<Health>(second).unwrap().hp, 1);
    }
}
