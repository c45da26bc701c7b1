//! Headless skirmish demo: a player and two monsters take turns until one
//! side is defeated. Gameplay events are printed by subscribed handlers the
//! way a presentation layer would consume them.
//!
//! Run with: `cargo run --example skirmish`

use anyhow::Context;
use barrow_engine::prelude::*;

fn item_name(world: &World, item: Entity) -> String {
    world
        .get_component::<Item>(item)
        .map(|record| record.name.clone())
        .unwrap_or_else(|| format!("item {item}"))
}

fn subscribe_narration(world: &mut World) {
    world.subscribe(EventKind::EntityMoved, |_world, event| {
        if let Event::EntityMoved { entity, to, .. } = *event {
            println!("  entity {entity} moves to ({}, {})", to.x, to.y);
        }
    });
    world.subscribe(EventKind::EntityAttacked, |_world, event| {
        if let Event::EntityAttacked {
            attacker,
            target,
            damage,
        } = *event
        {
            println!("  entity {attacker} hits entity {target} for {damage}");
        }
    });
    world.subscribe(EventKind::EntityDefeated, |_world, event| {
        println!("  entity {} is defeated!", event.source());
    });
    world.subscribe(EventKind::ItemPickedUp, |world, event| {
        if let Event::ItemPickedUp { entity, item } = *event {
            println!("  entity {entity} picks up {}", item_name(world, item));
        }
    });
    world.subscribe(EventKind::ItemUsed, |world, event| {
        if let Event::ItemUsed { entity, item, .. } = *event {
            println!("  entity {entity} uses {}", item_name(world, item));
        }
    });
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init()
        .ok();

    let mut engine = Engine::new();
    let world = engine.world_mut();
    subscribe_narration(world);

    let player = spawn_player(world, &PlayerBlueprint {
        x: 3,
        y: 7,
        hp: 100,
        max_hp: 100,
        strength: 15,
    });
    let brute = spawn_monster(world, &MonsterBlueprint {
        x: 7,
        y: 3,
        hp: 50,
        max_hp: 50,
        strength: 10,
        glyph: 'G',
    });
    let whelp = spawn_monster(world, &MonsterBlueprint {
        x: 12,
        y: 5,
        hp: 30,
        max_hp: 30,
        strength: 7,
        glyph: 'g',
    });
    spawn_item(world, &ItemBlueprint {
        name: "Healing Draught".to_owned(),
        weight: 1,
        value: 25,
        glyph: '!',
        position: Some((3, 7)),
        equippable_slots: Vec::new(),
        weapon_damage: None,
        armor_defense: None,
        usable: Some(Usable {
            effect: UseEffect::Heal,
            power: 20,
        }),
    });

    for entity in [player, brute, whelp] {
        world.add_to_turn_order(entity);
    }

    // The player's "input layer" here is a fixed script: grab what is on the
    // ground, then swing at whichever monster stands adjacent.
    for round in 1..=60 {
        let world = engine.world_mut();
        let Some(actor) = world.current_entity() else {
            break;
        };
        if actor == player {
            let wants_pickup = world
                .get_component::<Inventory>(player)
                .is_some_and(|inventory| inventory.items.is_empty());
            let adjacent_monster = [brute, whelp].into_iter().find(|&monster| {
                let Some(&mine) = world.get_component::<Position>(player) else {
                    return false;
                };
                world
                    .get_component::<Position>(monster)
                    .is_some_and(|&theirs| {
                        (mine.x - theirs.x).abs() + (mine.y - theirs.y).abs() == 1
                    })
            });
            if wants_pickup {
                world.set_component(player, PickupIntent);
            } else if let Some(target) = adjacent_monster {
                world.set_component(player, AttackIntent {
                    target,
                    damage: None,
                });
            }
        }

        let Some(summary) = engine.take_turn() else {
            break;
        };
        println!(
            "round {round}: entity {} acted ({} events)",
            summary.actor, summary.report.events_delivered
        );

        let world = engine.world();
        if !world.is_alive(player) {
            println!("the player has fallen.");
            break;
        }
        if !world.is_alive(brute) && !world.is_alive(whelp) {
            println!("the barrow stands silent: all monsters defeated.");
            break;
        }
    }

    if engine.world().is_alive(player) {
        let health = engine
            .world()
            .get_component::<Health>(player)
            .context("player is alive but has no health component")?;
        println!("final player HP: {}/{}", health.hp, health.max_hp);
    }
    Ok(())
}
