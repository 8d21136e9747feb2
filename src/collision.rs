//! Collision resolution, the only place damage is ever applied.
//!
//! Runs once per tick after the spawner and all motion updates.  Each
//! obstacle instance gets at most one effect for its whole lifetime,
//! guarded by its `has_hit_ship` flag, no matter how many consecutive
//! ticks the boxes keep overlapping.

use log::info;

use crate::entities::{Obstacle, ObstacleKind, Ship};

/// Side-effect hook for the front-end (flash, log, haptics).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impact {
    /// The ship took one hit from this kind of obstacle.
    Hit(ObstacleKind),
    /// The ship picked up a collectible.
    Collected(ObstacleKind),
}

/// Axis-aligned overlap on integer-rounded edges: boxes overlap iff
/// neither is entirely left of, right of, above, or below the other.
pub fn boxes_overlap(a_pos: (i32, i32), a_dims: (i32, i32), b_pos: (i32, i32), b_dims: (i32, i32)) -> bool {
    !(a_pos.0 + a_dims.0 <= b_pos.0
        || a_pos.0 >= b_pos.0 + b_dims.0
        || a_pos.1 + a_dims.1 <= b_pos.1
        || a_pos.1 >= b_pos.1 + b_dims.1)
}

/// Test the ship against every live obstacle and apply first-contact
/// effects.  Decorative signals never participate.  A hidden black hole
/// still collides (`collidable_while_hidden`); invisibility is a render
/// state, not an escape hatch.
pub fn resolve(ship: &mut Ship, obstacles: &mut [Obstacle]) -> Vec<Impact> {
    let mut impacts = Vec::new();

    let ship_pos = (ship.x.round() as i32, ship.y.round() as i32);
    let ship_dims = ship.dims();

    for obstacle in obstacles.iter_mut() {
        if obstacle.kind == ObstacleKind::Signal {
            continue;
        }
        if obstacle.has_hit_ship {
            continue;
        }
        if !obstacle.visible && !obstacle.kind.collidable_while_hidden() {
            continue;
        }

        let pos = (obstacle.x.round() as i32, obstacle.y.round() as i32);
        if !boxes_overlap(ship_pos, ship_dims, pos, obstacle.dims()) {
            continue;
        }

        obstacle.has_hit_ship = true;
        if obstacle.kind.is_damaging() {
            ship.take_damage(1);
            info!(
                "ship hit by {:?}, hits {}/{}",
                obstacle.kind,
                ship.hits,
                ship.max_hits()
            );
            impacts.push(Impact::Hit(obstacle.kind));
        } else {
            info!("ship collected {:?}", obstacle.kind);
            impacts.push(Impact::Collected(obstacle.kind));
        }
    }

    impacts
}
