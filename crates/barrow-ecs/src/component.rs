//! Component kinds and their data records.
//!
//! Every piece of data attached to an entity is one of a closed set of
//! [`ComponentKind`]s known at compile time. Values are carried in the
//! [`Component`] tagged union, so storage stays type-erased at the container
//! level without any runtime downcast that could fail silently: projecting a
//! variant back to its record type goes through [`ComponentRecord`], whose
//! kind tag is checked by the compiler.
//!
//! Intent kinds are ordinary components with a shorter life: deposited by the
//! acting layer (input or AI), consumed by exactly one system, and never
//! allowed to survive the tick that created them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::entity::Entity;

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// The closed enumeration of component kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Position,
    Health,
    Strength,
    Sprite,
    PlayerControlled,
    Inventory,
    Item,
    Weapon,
    Armor,
    Equippable,
    Usable,
    MoveIntent,
    AttackIntent,
    PickupIntent,
    UseItemIntent,
    EquipIntent,
    UnequipIntent,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 17] = [
        ComponentKind::Position,
        ComponentKind::Health,
        ComponentKind::Strength,
        ComponentKind::Sprite,
        ComponentKind::PlayerControlled,
        ComponentKind::Inventory,
        ComponentKind::Item,
        ComponentKind::Weapon,
        ComponentKind::Armor,
        ComponentKind::Equippable,
        ComponentKind::Usable,
        ComponentKind::MoveIntent,
        ComponentKind::AttackIntent,
        ComponentKind::PickupIntent,
        ComponentKind::UseItemIntent,
        ComponentKind::EquipIntent,
        ComponentKind::UnequipIntent,
    ];

    /// The six short-lived intent kinds, in pipeline consumption order.
    pub const INTENTS: [ComponentKind; 6] = [
        ComponentKind::MoveIntent,
        ComponentKind::AttackIntent,
        ComponentKind::PickupIntent,
        ComponentKind::UseItemIntent,
        ComponentKind::EquipIntent,
        ComponentKind::UnequipIntent,
    ];

    /// Whether this kind is an intent (consumed within the tick it was set).
    pub fn is_intent(self) -> bool {
        Self::INTENTS.contains(&self)
    }

    /// Stable snake_case name, used for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Position => "position",
            ComponentKind::Health => "health",
            ComponentKind::Strength => "strength",
            ComponentKind::Sprite => "sprite",
            ComponentKind::PlayerControlled => "player_controlled",
            ComponentKind::Inventory => "inventory",
            ComponentKind::Item => "item",
            ComponentKind::Weapon => "weapon",
            ComponentKind::Armor => "armor",
            ComponentKind::Equippable => "equippable",
            ComponentKind::Usable => "usable",
            ComponentKind::MoveIntent => "move_intent",
            ComponentKind::AttackIntent => "attack_intent",
            ComponentKind::PickupIntent => "pickup_intent",
            ComponentKind::UseItemIntent => "use_item_intent",
            ComponentKind::EquipIntent => "equip_intent",
            ComponentKind::UnequipIntent => "unequip_intent",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Error returned when text from an outer layer (input decoding, templates)
/// does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {what} '{input}'")]
pub struct ParseError {
    what: &'static str,
    input: String,
}

impl ParseError {
    fn new(what: &'static str, input: &str) -> Self {
        Self {
            what,
            input: input.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// EquipmentSlot / UseEffect
// ---------------------------------------------------------------------------

/// Body slots an item may occupy while equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Torso,
    Legs,
    Feet,
    LeftHand,
    RightHand,
}

impl EquipmentSlot {
    pub fn name(self) -> &'static str {
        match self {
            EquipmentSlot::Head => "head",
            EquipmentSlot::Torso => "torso",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::LeftHand => "left_hand",
            EquipmentSlot::RightHand => "right_hand",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentSlot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(EquipmentSlot::Head),
            "torso" => Ok(EquipmentSlot::Torso),
            "legs" => Ok(EquipmentSlot::Legs),
            "feet" => Ok(EquipmentSlot::Feet),
            "left_hand" => Ok(EquipmentSlot::LeftHand),
            "right_hand" => Ok(EquipmentSlot::RightHand),
            other => Err(ParseError::new("equipment slot", other)),
        }
    }
}

/// What applying a usable item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseEffect {
    Heal,
    Damage,
    /// Reserved for armor durability mechanics; currently a no-op.
    Repair,
}

impl FromStr for UseEffect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heal" => Ok(UseEffect::Heal),
            "damage" => Ok(UseEffect::Damage),
            "repair" => Ok(UseEffect::Repair),
            other => Err(ParseError::new("use effect", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Component records
// ---------------------------------------------------------------------------

/// Grid location, in integer cells. No bounds are enforced here; boundary
/// validation belongs to the layer that deposits movement intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Hit points. `hp` may dip below zero transiently while a tick resolves;
/// defeat handling runs before the value is observable across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

/// Innate damage contribution of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub value: i32,
}

/// Display glyph. Presentation-only; the core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub glyph: char,
}

/// Marker for the player-controlled actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerControlled;

/// Carried items plus equipped slots. The entries are non-owning references;
/// the world purges them when the referenced item entity is destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<Entity>,
    pub slots: BTreeMap<EquipmentSlot, Entity>,
    pub max_capacity: usize,
}

impl Inventory {
    /// An empty inventory with the given capacity ceiling.
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            slots: BTreeMap::new(),
            max_capacity,
        }
    }
}

/// Item metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub weight: i32,
    pub value: i32,
}

/// Offensive modifier contributed while equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: i32,
}

/// Defensive modifier contributed while equipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Armor {
    pub defense: i32,
}

/// The slots an item may legally occupy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equippable {
    pub slots: Vec<EquipmentSlot>,
}

/// A consumable effect carried by an item. Stripped when spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usable {
    pub effect: UseEffect,
    pub power: i32,
}

/// Intent: move by a relative delta this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub dx: i32,
    pub dy: i32,
}

/// Intent: attack another entity. When `damage` is set it overrides the
/// computed raw damage (equipped weapons + strength); armor mitigation
/// applies either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackIntent {
    pub target: Entity,
    pub damage: Option<i32>,
}

/// Intent: pick up whatever items share the actor's tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupIntent;

/// Intent: apply `item`'s usable effect to `target`, consuming it from
/// `consumer`'s inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseItemIntent {
    pub item: Entity,
    pub consumer: Entity,
    pub target: Entity,
}

/// Intent: equip `item` into `slot` on `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipIntent {
    pub item: Entity,
    pub slot: EquipmentSlot,
    pub target: Entity,
}

/// Intent: clear `slot` on `target`, returning the item to the carry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnequipIntent {
    pub slot: EquipmentSlot,
    pub target: Entity,
}

// ---------------------------------------------------------------------------
// Component union
// ---------------------------------------------------------------------------

/// Projection between a record type and the [`Component`] union, tagged with
/// the record's [`ComponentKind`] at compile time.
pub trait ComponentRecord: Sized {
    /// The kind this record is stored under.
    const KIND: ComponentKind;

    /// Borrow the record out of a component of the matching variant.
    fn from_component(component: &Component) -> Option<&Self>;

    /// Mutably borrow the record out of a component of the matching variant.
    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;

    /// Take ownership of the record out of a component of the matching variant.
    fn take_from(component: Component) -> Option<Self>;
}

macro_rules! components {
    ($($kind:ident),+ $(,)?) => {
        /// Tagged union over every component record, one variant per
        /// [`ComponentKind`].
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum Component {
            $($kind($kind),)+
        }

        impl Component {
            /// The kind tag of this value.
            pub fn kind(&self) -> ComponentKind {
                match self {
                    $(Component::$kind(_) => ComponentKind::$kind,)+
                }
            }
        }

        $(
            impl ComponentRecord for $kind {
                const KIND: ComponentKind = ComponentKind::$kind;

                fn from_component(component: &Component) -> Option<&Self> {
                    match component {
                        Component::$kind(record) => Some(record),
                        _ => None,
                    }
                }

                fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
                    match component {
                        Component::$kind(record) => Some(record),
                        _ => None,
                    }
                }

                fn take_from(component: Component) -> Option<Self> {
                    match component {
                        Component::$kind(record) => Some(record),
                        _ => None,
                    }
                }
            }

            impl From<$kind> for Component {
                fn from(record: $kind) -> Self {
                    Component::$kind(record)
                }
            }
        )+
    };
}

components!(
    Position,
    Health,
    Strength,
    Sprite,
    PlayerControlled,
    Inventory,
    Item,
    Weapon,
    Armor,
    Equippable,
    Usable,
    MoveIntent,
    AttackIntent,
    PickupIntent,
    UseItemIntent,
    EquipIntent,
    UnequipIntent,
);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_matches_variant() {
        let component: Component = Position { x: 1, y: 2 }.into();
        assert_eq!(component.kind(), ComponentKind::Position);
        assert_eq!(Position::KIND, ComponentKind::Position);
    }

    #[test]
    fn projection_is_kind_checked() {
        let component: Component = Health { hp: 10, max_hp: 10 }.into();
        assert!(Health::from_component(&component).is_some());
        assert!(Position::from_component(&component).is_none());
        assert_eq!(
            Health::take_from(component),
            Some(Health { hp: 10, max_hp: 10 })
        );
    }

    #[test]
    fn intents_are_flagged() {
        for kind in ComponentKind::INTENTS {
            assert!(kind.is_intent(), "{kind} should be an intent");
        }
        assert!(!ComponentKind::Position.is_intent());
        assert!(!ComponentKind::Inventory.is_intent());
        assert_eq!(ComponentKind::ALL.len(), 17);
    }

    #[test]
    fn slot_names_roundtrip() {
        for slot in [
            EquipmentSlot::Head,
            EquipmentSlot::Torso,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::LeftHand,
            EquipmentSlot::RightHand,
        ] {
            assert_eq!(slot.name().parse::<EquipmentSlot>(), Ok(slot));
        }
        assert!("elbow".parse::<EquipmentSlot>().is_err());
    }

    #[test]
    fn use_effect_parses() {
        assert_eq!("heal".parse::<UseEffect>(), Ok(UseEffect::Heal));
        assert_eq!("damage".parse::<UseEffect>(), Ok(UseEffect::Damage));
        assert_eq!("repair".parse::<UseEffect>(), Ok(UseEffect::Repair));
        assert!("explode".parse::<UseEffect>().is_err());
    }

    #[test]
    fn records_deserialize_from_template_json() {
        // Collaborating template loaders hand the core values shaped like
        // these; the core only sees the materialized records.
        let health: Health = serde_json::from_str(r#"{"hp": 30, "max_hp": 50}"#).unwrap();
        assert_eq!(health, Health { hp: 30, max_hp: 50 });

        let equippable: Equippable =
            serde_json::from_str(r#"{"slots": ["right_hand", "left_hand"]}"#).unwrap();
        assert_eq!(
            equippable.slots,
            vec![EquipmentSlot::RightHand, EquipmentSlot::LeftHand]
        );

        let usable: Usable = serde_json::from_str(r#"{"effect": "heal", "power": 20}"#).unwrap();
        assert_eq!(usable.effect, UseEffect::Heal);
    }
}
