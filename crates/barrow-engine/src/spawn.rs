//! Blueprint-driven entity spawning.
//!
//! Blueprints are plain serializable records: whatever loads them (a JSON
//! template layer, a test, the demo) materializes values first and the
//! functions here only attach components. Spawned actors are *not* added to
//! the turn order; participation is the caller's decision.

use std::collections::BTreeMap;

use barrow_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Stats for the player-controlled actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBlueprint {
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub strength: i32,
}

/// Stats for a hostile actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterBlueprint {
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub strength: i32,
    pub glyph: char,
}

/// An item with optional combat, equip, and use aspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBlueprint {
    pub name: String,
    pub weight: i32,
    pub value: i32,
    pub glyph: char,
    /// Ground position; `None` spawns the item off-map (e.g. straight into
    /// an inventory).
    #[serde(default)]
    pub position: Option<(i32, i32)>,
    #[serde(default)]
    pub equippable_slots: Vec<EquipmentSlot>,
    #[serde(default)]
    pub weapon_damage: Option<i32>,
    #[serde(default)]
    pub armor_defense: Option<i32>,
    #[serde(default)]
    pub usable: Option<Usable>,
}

/// Spawn the player. There can only be one player-controlled entity: if one
/// already exists it is returned unchanged. The fresh player starts with a
/// rusty sword equipped in the right hand.
pub fn spawn_player(world: &mut World, blueprint: &PlayerBlueprint) -> Entity {
    if let Some(&existing) = world.entities_with(ComponentKind::PlayerControlled).first() {
        return existing;
    }

    let player = world.create_entity();
    world.set_component(player, Position {
        x: blueprint.x,
        y: blueprint.y,
    });
    world.set_component(player, Health {
        hp: blueprint.hp,
        max_hp: blueprint.max_hp,
    });
    world.set_component(player, Strength {
        value: blueprint.strength,
    });
    world.set_component(player, Sprite { glyph: '@' });
    world.set_component(player, PlayerControlled);

    let sword = world.create_entity();
    world.set_component(sword, Item {
        name: "Rusty Sword".to_owned(),
        weight: 5,
        value: 13,
    });
    world.set_component(sword, Sprite { glyph: '|' });
    world.set_component(sword, Equippable {
        slots: vec![EquipmentSlot::RightHand, EquipmentSlot::LeftHand],
    });
    world.set_component(sword, Weapon { damage: 3 });

    let mut slots = BTreeMap::new();
    slots.insert(EquipmentSlot::RightHand, sword);
    world.set_component(player, Inventory {
        items: Vec::new(),
        slots,
        max_capacity: 30,
    });

    player
}

/// Spawn a hostile actor.
pub fn spawn_monster(world: &mut World, blueprint: &MonsterBlueprint) -> Entity {
    let monster = world.create_entity();
    world.set_component(monster, Position {
        x: blueprint.x,
        y: blueprint.y,
    });
    world.set_component(monster, Health {
        hp: blueprint.hp,
        max_hp: blueprint.max_hp,
    });
    world.set_component(monster, Strength {
        value: blueprint.strength,
    });
    world.set_component(monster, Sprite {
        glyph: blueprint.glyph,
    });
    monster
}

/// Spawn an item, attaching only the aspects the blueprint carries.
pub fn spawn_item(world: &mut World, blueprint: &ItemBlueprint) -> Entity {
    let item = world.create_entity();
    world.set_component(item, Item {
        name: blueprint.name.clone(),
        weight: blueprint.weight,
        value: blueprint.value,
    });
    world.set_component(item, Sprite {
        glyph: blueprint.glyph,
    });
    if let Some((x, y)) = blueprint.position {
        world.set_component(item, Position { x, y });
    }
    if !blueprint.equippable_slots.is_empty() {
        world.set_component(item, Equippable {
            slots: blueprint.equippable_slots.clone(),
        });
    }
    if let Some(damage) = blueprint.weapon_damage {
        world.set_component(item, Weapon { damage });
    }
    if let Some(defense) = blueprint.armor_defense {
        world.set_component(item, Armor { defense });
    }
    if let Some(usable) = blueprint.usable {
        world.set_component(item, usable);
    }
    item
}
