use star_dodge::collision::*;
use star_dodge::entities::{Obstacle, ObstacleKind, Ship};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Box overlap ───────────────────────────────────────────────────────────────

#[test]
fn separated_boxes_do_not_overlap() {
    let dims = (4, 3);
    assert!(!boxes_overlap((0, 0), dims, (10, 0), dims)); // right of
    assert!(!boxes_overlap((10, 0), dims, (0, 0), dims)); // left of
    assert!(!boxes_overlap((0, 0), dims, (0, 10), dims)); // below
    assert!(!boxes_overlap((0, 10), dims, (0, 0), dims)); // above
}

#[test]
fn touching_edges_do_not_overlap() {
    // Exclusive edges: a box ending where the other begins is a miss.
    assert!(!boxes_overlap((0, 0), (4, 3), (4, 0), (4, 3)));
    assert!(!boxes_overlap((0, 0), (4, 3), (0, 3), (4, 3)));
}

#[test]
fn intersecting_boxes_overlap() {
    assert!(boxes_overlap((0, 0), (4, 3), (3, 2), (4, 3)));
    assert!(boxes_overlap((5, 5), (2, 2), (4, 4), (4, 4))); // contained
}

// ── Damage application ────────────────────────────────────────────────────────

#[test]
fn overlapping_meteor_damages_once() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Meteor, 10.0, 10.0, 0.2)];

    let impacts = resolve(&mut ship, &mut obstacles);
    assert_eq!(impacts, vec![Impact::Hit(ObstacleKind::Meteor)]);
    assert_eq!(ship.hits, 1);
    assert!(obstacles[0].has_hit_ship);
}

/// A box overlapping for 5 consecutive ticks charges
/// exactly one hit, with the spent flag up the whole time.
#[test]
fn damage_is_idempotent_across_persistent_overlap() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Meteor, 10.0, 10.0, 0.2)];

    for _ in 0..5 {
        resolve(&mut ship, &mut obstacles);
        assert_eq!(ship.hits, 1);
        assert!(obstacles[0].has_hit_ship);
    }
}

#[test]
fn each_instance_charges_its_own_hit() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut obstacles = vec![
        Obstacle::new(ObstacleKind::Meteor, 10.0, 10.0, 0.2),
        Obstacle::new(ObstacleKind::Asteroid, 12.0, 11.0, 0.3),
    ];

    let impacts = resolve(&mut ship, &mut obstacles);
    assert_eq!(impacts.len(), 2);
    assert_eq!(ship.hits, 2);
}

#[test]
fn distant_obstacle_is_ignored() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Meteor, 100.0, 10.0, 0.2)];

    assert!(resolve(&mut ship, &mut obstacles).is_empty());
    assert_eq!(ship.hits, 0);
    assert!(!obstacles[0].has_hit_ship);
}

// ── Category rules ────────────────────────────────────────────────────────────

#[test]
fn record_overlap_collects_without_damage() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Record, 10.0, 10.0, 0.1)];

    let impacts = resolve(&mut ship, &mut obstacles);
    assert_eq!(impacts, vec![Impact::Collected(ObstacleKind::Record)]);
    assert_eq!(ship.hits, 0);
    assert!(obstacles[0].has_hit_ship); // consumed, culled next tick
}

#[test]
fn signals_never_participate() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Signal, 10.0, 10.0, 0.0)];

    assert!(resolve(&mut ship, &mut obstacles).is_empty());
    assert_eq!(ship.hits, 0);
    assert!(!obstacles[0].has_hit_ship);
}

/// Explicit policy: a blinked-out black hole keeps its hitbox.
#[test]
fn hidden_black_hole_still_hits() {
    let mut ship = Ship::new(10.0, 10.0);
    let mut hole = Obstacle::new(ObstacleKind::BlackHole, 10.0, 10.0, 0.2);
    hole.visible = false;
    let mut obstacles = vec![hole];

    let impacts = resolve(&mut ship, &mut obstacles);
    assert_eq!(impacts, vec![Impact::Hit(ObstacleKind::BlackHole)]);
    assert_eq!(ship.hits, 1);
}

// ── Destruction ───────────────────────────────────────────────────────────────

#[test]
fn final_hit_destroys_the_ship() {
    let mut ship = Ship::new(10.0, 10.0);
    ship.take_damage(3);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Moon, 10.0, 10.0, 0.1)];

    resolve(&mut ship, &mut obstacles);
    assert!(ship.is_destroyed());
    assert!(!ship.active);

    // A fresh obstacle cannot push hits past the cap.
    let mut more = vec![Obstacle::new(ObstacleKind::Meteor, 10.0, 10.0, 0.2)];
    resolve(&mut ship, &mut more);
    assert_eq!(ship.hits, ship.max_hits());
}

// ── Long-range drift scenario ─────────────────────────────────────────────────

/// 224×68 viewport, ship at (5, 34), meteor from (224, 10) at speed 1.5:
/// after 100 unit ticks the meteor sits near x = 74 and nothing has
/// collided; the boxes never came close.
#[test]
fn meteor_crosses_the_field_without_touching_the_ship() {
    let mut rng = seeded_rng();
    let mut ship = Ship::new(5.0, 34.0);
    let mut obstacles = vec![Obstacle::new(ObstacleKind::Meteor, 224.0, 10.0, 1.5)];

    for tick in 1..=100u64 {
        obstacles[0].update(tick, &mut rng);
        let impacts = resolve(&mut ship, &mut obstacles);
        assert!(impacts.is_empty());
    }

    assert!((obstacles[0].x - 74.0).abs() < 1e-3);
    assert_eq!(ship.hits, 0);
    assert!(!obstacles[0].has_hit_ship);
}
