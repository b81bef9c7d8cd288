//! Keep foreground entities inside the world rectangle.

use hecs::{Entity, World};

use invaders_core::constants::BOUNDARY_MARGIN;
use invaders_core::enums::Layer;
use invaders_core::types::{Bounds, Position};

/// Push every foreground entity that touches or crosses an edge back inside,
/// leaving `BOUNDARY_MARGIN` between it and that edge.
pub fn run(world: &mut World, live: &[Entity], world_bounds: Bounds) {
    for &entity in live {
        let Ok((layer, pos, bounds)) =
            world.query_one_mut::<(&Layer, &mut Position, &Bounds)>(entity)
        else {
            continue;
        };
        if *layer != Layer::Foreground {
            continue;
        }
        clamp(pos, *bounds, world_bounds);
    }
}

pub fn clamp(pos: &mut Position, bounds: Bounds, world_bounds: Bounds) {
    if pos.x + bounds.width >= world_bounds.width {
        pos.x = world_bounds.width - BOUNDARY_MARGIN - bounds.width;
    }
    if pos.x <= 0.0 {
        pos.x = BOUNDARY_MARGIN;
    }
    if pos.y + bounds.height >= world_bounds.height {
        pos.y = world_bounds.height - BOUNDARY_MARGIN - bounds.height;
    }
    if pos.y <= 0.0 {
        pos.y = BOUNDARY_MARGIN;
    }
}
