//! Decision stage for non-player actors.
//!
//! The AI never mutates world state directly: it only deposits intents on
//! the acting entity, exactly like the input layer does for the player. The
//! engine points it at the current actor before the pipeline runs.

use barrow_ecs::prelude::*;

/// Two behaviors: attack a player-controlled entity when orthogonally
/// adjacent, otherwise step one cell toward it.
#[derive(Debug, Default)]
pub struct AiSystem {
    actor: Option<Entity>,
}

impl AiSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set which entity decides this turn.
    pub fn set_actor(&mut self, actor: Entity) {
        self.actor = Some(actor);
    }
}

/// Orthogonal adjacency: exactly one cell apart on one axis.
pub(crate) fn adjacent(a: Position, b: Position) -> bool {
    ((a.x - b.x).abs() == 1 && a.y == b.y) || ((a.y - b.y).abs() == 1 && a.x == b.x)
}

impl System for AiSystem {
    fn name(&self) -> &str {
        "ai"
    }

    fn run(&mut self, world: &mut World) {
        let Some(actor) = self.actor else {
            return;
        };
        if !world.is_alive(actor)
            || world.has_component(actor, ComponentKind::PlayerControlled)
            || !world.has_component(actor, ComponentKind::Health)
        {
            return;
        }

        let Some(&target) = world.entities_with(ComponentKind::PlayerControlled).first() else {
            return;
        };
        let Some(&actor_position) = world.get_component::<Position>(actor) else {
            return;
        };
        let Some(&target_position) = world.get_component::<Position>(target) else {
            return;
        };

        if adjacent(actor_position, target_position) {
            // Leave the damage to the combat formula (equipment + strength).
            world.set_component(actor, AttackIntent {
                target,
                damage: None,
            });
        } else {
            world.set_component(actor, MoveIntent {
                dx: (target_position.x - actor_position.x).signum(),
                dy: (target_position.y - actor_position.y).signum(),
            });
        }
    }
}
