use star_dodge::entities::{Obstacle, ObstacleKind, Phase};
use star_dodge::game::{Game, InputFrame, Overlay, Tint};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_game() -> Game {
    Game::new(224, 68)
}

fn pause() -> InputFrame {
    InputFrame { pause: true, ..InputFrame::default() }
}

fn restart() -> InputFrame {
    InputFrame { restart: true, ..InputFrame::default() }
}

// ── Initial state ─────────────────────────────────────────────────────────────

#[test]
fn new_game_starts_playing_left_of_center() {
    let game = make_game();
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.ship.x, 5.0);
    assert_eq!(game.ship.y, 34.0);
    assert_eq!(game.ship.hits, 0);
    assert!(game.obstacles.is_empty());
    assert_eq!(game.spawner.difficulty, 1);
    assert_eq!(game.score(), 0);
}

// ── Phase machine ─────────────────────────────────────────────────────────────

#[test]
fn pause_toggles_between_playing_and_paused() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.tick(10, &pause(), &mut rng);
    assert_eq!(game.phase, Phase::Paused);
    game.tick(20, &pause(), &mut rng);
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn pause_never_fires_from_game_over() {
    let mut rng = seeded_rng();
    let mut game = make_game();
    game.ship.take_damage(game.ship.max_hits());
    game.tick(10, &InputFrame::idle(), &mut rng);
    assert_eq!(game.phase, Phase::GameOver);

    game.tick(20, &pause(), &mut rng);
    assert_eq!(game.phase, Phase::GameOver);
}

#[test]
fn ship_destruction_ends_the_game() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.ship.take_damage(game.ship.max_hits());
    game.tick(10, &InputFrame::idle(), &mut rng);
    assert_eq!(game.phase, Phase::GameOver);

    // Terminal: neither movement nor time mutates hits any further.
    let hits = game.ship.hits;
    let walk = InputFrame { dx: 1, dy: 0, ..InputFrame::default() };
    game.tick(20, &walk, &mut rng);
    game.tick(30, &InputFrame::idle(), &mut rng);
    assert_eq!(game.ship.hits, hits);
    assert_eq!(game.ship.x, 5.0);
    assert_eq!(game.phase, Phase::GameOver);
}

#[test]
fn restart_only_works_from_game_over() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.tick(1000, &InputFrame::idle(), &mut rng);
    let score = game.score();
    game.tick(2000, &restart(), &mut rng);
    assert_eq!(game.phase, Phase::Playing);
    assert!(game.score() >= score); // no reset happened
}

#[test]
fn restart_resets_everything() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    // Play long enough to accrue score, difficulty, and obstacles.
    for i in 1..=40u64 {
        game.tick(i * 1000, &InputFrame::idle(), &mut rng);
    }
    assert!(game.spawner.difficulty > 1);
    assert!(game.score() > 0);

    game.ship.take_damage(game.ship.max_hits());
    game.tick(41_000, &InputFrame::idle(), &mut rng);
    assert_eq!(game.phase, Phase::GameOver);

    game.tick(42_000, &restart(), &mut rng);
    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.ship.hits, 0);
    assert!(game.ship.active);
    assert_eq!(game.spawner.difficulty, 1);
    assert!(game.obstacles.is_empty());
}

#[test]
fn first_tick_anchors_the_clock_to_the_host_timestamp() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    // A host whose monotonic clock started long ago: the first tick is
    // game time zero, not a 500-second catch-up.
    game.tick(500_000, &InputFrame::idle(), &mut rng);
    assert_eq!(game.score(), 0);
    assert_eq!(game.spawner.difficulty, 1);
    assert!(game.obstacles.is_empty());

    game.tick(501_000, &InputFrame::idle(), &mut rng);
    assert_eq!(game.score(), 10);
    assert_eq!(game.spawner.difficulty, 1);
}

#[test]
fn restarted_clock_is_reanchored() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.ship.take_damage(game.ship.max_hits());
    game.tick(30_000, &InputFrame::idle(), &mut rng);
    game.tick(31_000, &restart(), &mut rng);

    // One second of play after the restart is one second of score,
    // not thirty-two.
    game.tick(32_000, &InputFrame::idle(), &mut rng);
    assert_eq!(game.score(), 10);
    assert_eq!(game.spawner.difficulty, 1);
}

// ── Simulation gating ─────────────────────────────────────────────────────────

#[test]
fn score_accrues_only_while_playing() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.tick(0, &InputFrame::idle(), &mut rng);
    game.tick(1000, &InputFrame::idle(), &mut rng);
    assert_eq!(game.score(), 10);

    game.tick(1100, &pause(), &mut rng);
    let frozen = game.score();
    game.tick(5000, &InputFrame::idle(), &mut rng);
    assert_eq!(game.score(), frozen);
}

#[test]
fn spawner_is_idle_while_paused() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.tick(10, &pause(), &mut rng);
    for i in 1..=20u64 {
        game.tick(10 + i * 1000, &InputFrame::idle(), &mut rng);
    }
    assert!(game.obstacles.is_empty());
    assert_eq!(game.spawner.difficulty, 1);
}

#[test]
fn obstacles_spawn_and_drift_during_play() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    for i in 1..=300u64 {
        game.tick(i * 33, &InputFrame::idle(), &mut rng);
    }
    assert!(!game.obstacles.is_empty());
    // Everything spawned at the right edge and drifts left (records may
    // park; signals step slowly; none moves right).
    for o in &game.obstacles {
        assert!(o.x <= 224.0 + 5.0);
    }
}

#[test]
fn movement_honored_only_while_playing() {
    let mut rng = seeded_rng();
    let mut game = make_game();
    let walk = InputFrame { dx: 1, dy: 0, ..InputFrame::default() };

    game.tick(10, &walk, &mut rng);
    assert_eq!(game.ship.x, 6.0);

    game.tick(20, &pause(), &mut rng);
    game.tick(30, &walk, &mut rng);
    assert_eq!(game.ship.x, 6.0);
}

#[test]
fn background_scroll_freezes_outside_playing() {
    let mut rng = seeded_rng();
    let mut game = make_game();

    game.tick(0, &InputFrame::idle(), &mut rng);
    game.tick(100, &InputFrame::idle(), &mut rng);
    let rolling = game.scene().scroll_offset;
    assert!(rolling > 0);

    game.tick(110, &pause(), &mut rng);
    game.tick(500, &InputFrame::idle(), &mut rng);
    game.tick(900, &InputFrame::idle(), &mut rng);
    assert_eq!(game.scene().scroll_offset, rolling);
}

// ── Resize ────────────────────────────────────────────────────────────────────

#[test]
fn resize_clamps_entities_and_keeps_damage_state() {
    let mut game = make_game();
    game.ship.x = 200.0;
    game.ship.y = 60.0;
    game.ship.take_damage(2);
    let mut parked = Obstacle::new(ObstacleKind::Meteor, 150.0, 50.0, 0.2);
    parked.has_hit_ship = true;
    game.obstacles.push(parked);

    game.resize(80, 24);

    let (sw, sh) = game.ship.dims();
    assert!(game.ship.x as i32 + sw <= 80);
    assert!(game.ship.y as i32 + sh <= 24);
    assert_eq!(game.ship.hits, 2);

    let o = &game.obstacles[0];
    let (_, oh) = o.dims();
    assert!(o.y as i32 + oh <= 24);
    assert!(o.has_hit_ship);
}

#[test]
fn resize_to_degenerate_viewport_stays_representable() {
    let mut game = make_game();
    game.resize(1, 1);
    assert!(game.ship.x >= 0.0);
    assert!(game.ship.y >= 0.0);
}

// ── Scene payload ─────────────────────────────────────────────────────────────

#[test]
fn scene_reports_status_and_ship_tint_bands() {
    let mut game = make_game();

    let scene = game.scene();
    assert_eq!(scene.status.health_percent, 100.0);
    assert_eq!(scene.status.difficulty, 1);
    assert_eq!(scene.sprites.last().unwrap().tint, Tint::Green);

    game.ship.take_damage(3); // 25% → warning band
    assert_eq!(game.scene().sprites.last().unwrap().tint, Tint::Yellow);
}

#[test]
fn scene_overlays_follow_the_phase() {
    let mut rng = seeded_rng();
    let mut game = make_game();
    assert_eq!(game.scene().overlay, None);

    game.tick(10, &pause(), &mut rng);
    assert_eq!(game.scene().overlay, Some(Overlay::Paused));

    game.tick(20, &pause(), &mut rng);
    game.ship.take_damage(game.ship.max_hits());
    game.tick(30, &InputFrame::idle(), &mut rng);
    match game.scene().overlay {
        Some(Overlay::GameOver { level, .. }) => assert_eq!(level, 1),
        other => panic!("expected game-over overlay, got {other:?}"),
    }
}

#[test]
fn hidden_obstacles_are_not_drawn_but_stay_live() {
    let mut game = make_game();
    let mut hole = Obstacle::new(ObstacleKind::BlackHole, 100.0, 20.0, 0.2);
    hole.visible = false;
    game.obstacles.push(hole);

    // One sprite only: the ship.  The hole is still in the live list.
    assert_eq!(game.scene().sprites.len(), 1);
    assert_eq!(game.obstacles.len(), 1);
}

#[test]
fn destroyed_ship_is_not_drawn() {
    let mut game = make_game();
    game.ship.take_damage(game.ship.max_hits());
    assert!(game.scene().sprites.is_empty());
}
