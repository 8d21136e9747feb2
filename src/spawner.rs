//! Obstacle spawning and difficulty progression.
//!
//! The spawner owns all spawn timing, the weighted kind table, the
//! difficulty counter, and lifecycle culling of dead obstacles.  It is
//! driven only by the monotonically increasing `now_ms` timestamp the
//! game loop passes in, so a headless test harness can step it at any
//! cadence.

use log::{debug, info};
use rand::Rng;

use crate::entities::{Obstacle, ObstacleKind, Viewport};

// ── Spawn timing ──────────────────────────────────────────────────────────────

/// Base time between spawns at difficulty 1.
pub const BASE_SPAWN_RATE_MS: u64 = 2000;
/// Hard floor; below this the field would become unplayable-dense.
pub const MIN_SPAWN_RATE_MS: u64 = 500;
/// Difficulty goes up one level on this wall-clock interval.
pub const DIFFICULTY_INTERVAL_MS: u64 = 10_000;

/// Obstacles enter slightly off-screen to the right.
const SPAWN_LEAD_CELLS: f32 = 5.0;
/// Vertical margin kept clear at the bottom of the spawn band.
const SPAWN_BOTTOM_MARGIN: u16 = 10;

// ── Kind table ────────────────────────────────────────────────────────────────

pub struct SpawnSpec {
    pub kind: ObstacleKind,
    pub weight: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Kind is only eligible from this difficulty level on.
    pub min_difficulty: u32,
    /// At most one live instance at a time.
    pub singleton: bool,
}

pub const SPAWN_TABLE: &[SpawnSpec] = &[
    SpawnSpec { kind: ObstacleKind::Meteor,    weight: 40, min_speed: 0.2,  max_speed: 0.3,  min_difficulty: 1, singleton: false },
    SpawnSpec { kind: ObstacleKind::Moon,      weight: 20, min_speed: 0.1,  max_speed: 0.2,  min_difficulty: 1, singleton: false },
    SpawnSpec { kind: ObstacleKind::Asteroid,  weight: 30, min_speed: 0.3,  max_speed: 0.4,  min_difficulty: 1, singleton: false },
    SpawnSpec { kind: ObstacleKind::BlackHole, weight: 10, min_speed: 0.15, max_speed: 0.25, min_difficulty: 2, singleton: true },
    SpawnSpec { kind: ObstacleKind::Record,    weight: 5,  min_speed: 0.1,  max_speed: 0.15, min_difficulty: 3, singleton: true },
    SpawnSpec { kind: ObstacleKind::Signal,    weight: 5,  min_speed: 0.0,  max_speed: 0.0,  min_difficulty: 1, singleton: false },
];

// ── Difficulty curves (pure, so tests can probe them directly) ───────────────

/// Obstacle speed multiplier at a given difficulty level.
pub fn speed_multiplier(difficulty: u32) -> f32 {
    1.0 + (difficulty.saturating_sub(1)) as f32 * 0.3
}

/// Spawn delay for a difficulty level and a jitter factor in [0.7, 1.3).
/// Monotonically non-increasing in `difficulty` until the floor wins.
pub fn spawn_delay_ms(difficulty: u32, jitter: f64) -> u64 {
    let factor = (1.0 - (difficulty.saturating_sub(1)) as f64 * 0.15).max(0.1);
    let delay = BASE_SPAWN_RATE_MS as f64 * factor * jitter;
    (delay as u64).max(MIN_SPAWN_RATE_MS)
}

// ── Spawner ───────────────────────────────────────────────────────────────────

pub struct Spawner {
    pub viewport: Viewport,
    pub difficulty: u32,
    pub next_spawn_delay_ms: u64,
    pub last_spawn_ms: u64,
    pub last_difficulty_ms: u64,
    /// At-most-one-at-a-time guard for the rare record; cleared when the
    /// live record is culled so another may eventually appear.
    pub special_exists: bool,
}

impl Spawner {
    pub fn new(viewport: Viewport) -> Self {
        Spawner {
            viewport,
            difficulty: 1,
            next_spawn_delay_ms: BASE_SPAWN_RATE_MS,
            last_spawn_ms: 0,
            last_difficulty_ms: 0,
            special_exists: false,
        }
    }

    /// One spawner step: raise difficulty on its interval, spawn when the
    /// current delay has elapsed, then cull dead obstacles.
    pub fn advance(
        &mut self,
        now_ms: u64,
        obstacles: &mut Vec<Obstacle>,
        rng: &mut impl Rng,
    ) {
        if now_ms.saturating_sub(self.last_difficulty_ms) >= DIFFICULTY_INTERVAL_MS {
            self.difficulty += 1;
            self.last_difficulty_ms = now_ms;
            info!("difficulty raised to level {}", self.difficulty);
        }

        if now_ms.saturating_sub(self.last_spawn_ms) >= self.next_spawn_delay_ms {
            let obstacle = self.spawn(now_ms, obstacles, rng);
            debug!(
                "spawned {:?} at ({:.0}, {:.0}) speed {:.2}",
                obstacle.kind, obstacle.x, obstacle.y, obstacle.speed
            );
            obstacles.push(obstacle);
            self.last_spawn_ms = now_ms;
            self.schedule_next_spawn(rng);
        }

        self.cull(obstacles);
    }

    fn spawn(
        &mut self,
        now_ms: u64,
        obstacles: &[Obstacle],
        rng: &mut impl Rng,
    ) -> Obstacle {
        let spec = self.select_spec(obstacles, rng);

        let x = self.viewport.width as f32 + SPAWN_LEAD_CELLS;
        let band = self.viewport.height.saturating_sub(SPAWN_BOTTOM_MARGIN) as f32;
        let y = if band > 0.0 { rng.gen_range(0.0..band) } else { 0.0 };

        let base = spec.min_speed + rng.gen::<f32>() * (spec.max_speed - spec.min_speed);
        let speed = base * speed_multiplier(self.difficulty);

        let mut obstacle = Obstacle::new(spec.kind, x, y, speed);
        obstacle.spawned = true;
        obstacle.last_step_ms = now_ms;
        if spec.kind == ObstacleKind::Record {
            self.special_exists = true;
        }
        obstacle
    }

    /// Weighted draw over the kind table: subtract weights in table order
    /// until the draw goes non-positive (exact-zero boundaries resolve
    /// toward earlier entries).  An ineligible rare winner silently
    /// degrades to the common meteor.
    fn select_spec(&self, obstacles: &[Obstacle], rng: &mut impl Rng) -> &'static SpawnSpec {
        let total: u32 = SPAWN_TABLE.iter().map(|s| s.weight).sum();
        let mut draw = rng.gen::<f64>() * total as f64;
        for spec in SPAWN_TABLE {
            draw -= spec.weight as f64;
            if draw <= 0.0 {
                if self.eligible(spec, obstacles) {
                    return spec;
                }
                return &SPAWN_TABLE[0];
            }
        }
        &SPAWN_TABLE[0]
    }

    fn eligible(&self, spec: &SpawnSpec, obstacles: &[Obstacle]) -> bool {
        if self.difficulty < spec.min_difficulty {
            return false;
        }
        if spec.kind == ObstacleKind::Record && self.special_exists {
            return false;
        }
        if spec.singleton && obstacles.iter().any(|o| o.kind == spec.kind) {
            return false;
        }
        true
    }

    fn schedule_next_spawn(&mut self, rng: &mut impl Rng) {
        let jitter = 0.7 + rng.gen::<f64>() * 0.6;
        self.next_spawn_delay_ms = spawn_delay_ms(self.difficulty, jitter);
    }

    /// Drop obstacles fully past the left edge, and those that already
    /// spent their one hit on the ship during the previous tick.  Culling
    /// the record re-arms its spawn guard.
    fn cull(&mut self, obstacles: &mut Vec<Obstacle>) {
        let mut removed = 0usize;
        let special = &mut self.special_exists;
        obstacles.retain(|o| {
            let (w, _) = o.dims();
            let off_screen = o.x.round() as i32 + w < 0;
            let keep = !off_screen && !o.has_hit_ship;
            if !keep {
                removed += 1;
                if o.kind == ObstacleKind::Record {
                    *special = false;
                }
            }
            keep
        });
        if removed > 0 {
            debug!("culled {removed} obstacle(s)");
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Back to a fresh game: difficulty 1, timers and guards cleared.
    pub fn reset(&mut self) {
        self.difficulty = 1;
        self.next_spawn_delay_ms = BASE_SPAWN_RATE_MS;
        self.last_spawn_ms = 0;
        self.last_difficulty_ms = 0;
        self.special_exists = false;
        info!("spawner reset");
    }
}
