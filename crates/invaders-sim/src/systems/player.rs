//! Player movement from held direction keys.

use hecs::{Entity, World};

use invaders_core::components::PlayerShip;
use invaders_core::types::Position;

/// Directions currently held. At most one is set at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub fn press_left(&mut self) {
        self.left = true;
        self.right = false;
    }

    pub fn press_right(&mut self) {
        self.right = true;
        self.left = false;
    }
}

/// Shift the player by its speed in the held direction.
pub fn run(world: &mut World, player: Entity, input: MoveInput) {
    let Ok((pos, ship)) = world.query_one_mut::<(&mut Position, &PlayerShip)>(player) else {
        return;
    };
    if input.left {
        pos.x -= ship.speed;
    }
    if input.right {
        pos.x += ship.speed;
    }
}
