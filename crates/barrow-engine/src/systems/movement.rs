//! Movement stage: consumes `MoveIntent`.

use barrow_ecs::prelude::*;
use tracing::debug;

/// Applies movement intents to positions and announces the result.
///
/// No bounds checking happens here. Validating the destination is the acting
/// layer's job before it deposits the intent; the system trusts any intent
/// it receives.
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(&mut self, world: &mut World) {
        for entity in world.entities_with(ComponentKind::MoveIntent) {
            let Some(intent) = world.take_component::<MoveIntent>(entity) else {
                continue;
            };
            let Some(position) = world.get_component_mut::<Position>(entity) else {
                debug!(%entity, "move intent dropped: entity has no position");
                continue;
            };
            let from = *position;
            position.x += intent.dx;
            position.y += intent.dy;
            let to = *position;
            world.publish(Event::EntityMoved { entity, from, to });
        }
    }
}
