//! Entity types and their per-tick behavior.
//!
//! Positions are fractional grid cells (`f32`) so slow obstacles can move
//! less than one cell per tick; everything is rounded at draw/collision
//! time.  All randomness comes through an injected `Rng` handle so tests
//! with a seeded RNG are deterministic.

use std::collections::HashSet;

use rand::Rng;

use crate::assets;

// ── Motion tuning ─────────────────────────────────────────────────────────────

/// Per-tick chance a meteor tumbles one nudge downward.
const METEOR_TUMBLE_CHANCE: f64 = 0.05;
const METEOR_TUMBLE_STEP: f32 = 0.5;

const MOON_WAVE_FREQ: f32 = 0.1;
const MOON_WAVE_AMPLITUDE: f32 = 2.0;

/// Per-tick chance an asteroid re-randomizes its vertical drift rate.
const ASTEROID_JINK_CHANCE: f64 = 0.02;
const ASTEROID_MAX_DRIFT: f32 = 0.3;
/// Ticks per rotation frame.
const ASTEROID_SPIN_DIV: u32 = 8;

/// How far a record glides before stopping for good.
const RECORD_GLIDE_CELLS: f32 = 40.0;

const BLACK_HOLE_WAVE_FREQ: f32 = 0.15;
const BLACK_HOLE_WAVE_AMPLITUDE: f32 = 1.5;
/// Wall-clock blink period: visible for one interval, hidden the next.
pub const BLACK_HOLE_BLINK_MS: u64 = 600;

/// Signal entities advance only on this slow message cadence.
pub const SIGNAL_STEP_MS: u64 = 400;

// ── Shared geometry ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// (width, height) of a sprite: widest row × row count.
pub fn sprite_size(art: &[&str]) -> (i32, i32) {
    let width = art.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    (width as i32, art.len() as i32)
}

/// Grid cells covered by the non-space glyphs of `art` placed at (x, y).
pub fn occupied_cells(art: &[&str], x: i32, y: i32) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for (row, line) in art.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            if ch != ' ' {
                cells.push((x + col as i32, y + row as i32));
            }
        }
    }
    cells
}

// ── Game phase ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

// ── Obstacle variants ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Meteor,
    Moon,
    Asteroid,
    /// Rare collectible that glides in, stops, and waits to be picked up.
    Record,
    BlackHole,
    /// Decorative drifting message; never collides with anything.
    Signal,
}

impl ObstacleKind {
    /// Colliding with one of these costs the ship a hit.
    pub fn is_damaging(self) -> bool {
        matches!(
            self,
            ObstacleKind::Meteor
                | ObstacleKind::Moon
                | ObstacleKind::Asteroid
                | ObstacleKind::BlackHole
        )
    }

    /// Whether the movement check treats this kind as solid.  Collectibles
    /// and decorations never veto a move; the ship flies straight onto them.
    pub fn blocks_movement(self) -> bool {
        self.is_damaging()
    }

    /// A blinking black hole keeps its hitbox while hidden.  Deliberate:
    /// the hazard is the point, invisibility is only a rendering state.
    pub fn collidable_while_hidden(self) -> bool {
        matches!(self, ObstacleKind::BlackHole)
    }
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Unit-ish travel direction; everything currently drifts left.
    pub dir: (f32, f32),
    pub active: bool,
    pub spawned: bool,
    /// Set by the collision resolver the first (and only) time this
    /// instance hits the ship.
    pub has_hit_ship: bool,
    /// Reserved for pass-through scoring.
    pub passed_ship: bool,
    /// Rendering state; black holes blink, everything else stays visible.
    pub visible: bool,
    /// Asteroid: current vertical drift rate.
    drift: f32,
    /// Asteroid: rotation phase, presentation only.
    phase: u32,
    /// Record: distance glided so far.
    travelled: f32,
    /// Moon / black hole: row the sine wave oscillates around.
    anchor_y: f32,
    /// Signal: timestamp of the last message-tick step.
    pub last_step_ms: u64,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, y: f32, speed: f32) -> Self {
        Obstacle {
            kind,
            x,
            y,
            speed,
            dir: (-1.0, 0.0),
            active: true,
            spawned: false,
            has_hit_ship: false,
            passed_ship: false,
            visible: true,
            drift: 0.0,
            phase: 0,
            travelled: 0.0,
            anchor_y: y,
            last_step_ms: 0,
        }
    }

    /// Current art for this obstacle.  Asteroids pick a rotation frame
    /// from their phase counter; everything else is static.
    pub fn art(&self) -> &'static [&'static str] {
        match self.kind {
            ObstacleKind::Meteor => assets::METEOR,
            ObstacleKind::Moon => assets::MOON,
            ObstacleKind::Asteroid => {
                let frame = (self.phase / ASTEROID_SPIN_DIV) as usize
                    % assets::ASTEROID_FRAMES.len();
                assets::ASTEROID_FRAMES[frame]
            }
            ObstacleKind::Record => assets::RECORD,
            ObstacleKind::BlackHole => assets::BLACK_HOLE,
            ObstacleKind::Signal => assets::SIGNAL,
        }
    }

    pub fn dims(&self) -> (i32, i32) {
        sprite_size(self.art())
    }

    pub fn occupied_cells(&self) -> Vec<(i32, i32)> {
        occupied_cells(self.art(), self.x.round() as i32, self.y.round() as i32)
    }

    /// Advance one tick.  `now_ms` only drives the wall-clock effects
    /// (black-hole blink, signal message cadence); drift itself is
    /// per-tick so the simulation stays host-cadence agnostic.
    pub fn update(&mut self, now_ms: u64, rng: &mut impl Rng) {
        match self.kind {
            ObstacleKind::Meteor => {
                self.drift_along();
                if rng.gen_bool(METEOR_TUMBLE_CHANCE) {
                    self.y += METEOR_TUMBLE_STEP;
                }
            }
            ObstacleKind::Moon => {
                self.drift_along();
                self.y = self.anchor_y
                    + (self.x * MOON_WAVE_FREQ).sin() * MOON_WAVE_AMPLITUDE;
            }
            ObstacleKind::Asteroid => {
                self.drift_along();
                if rng.gen_bool(ASTEROID_JINK_CHANCE) {
                    self.drift = rng.gen_range(-ASTEROID_MAX_DRIFT..ASTEROID_MAX_DRIFT);
                }
                self.y += self.drift;
                self.phase = self.phase.wrapping_add(1);
            }
            ObstacleKind::Record => {
                // Glide in, then park; a stopped record never resumes.
                if self.travelled < RECORD_GLIDE_CELLS {
                    self.drift_along();
                    self.travelled += self.speed;
                }
            }
            ObstacleKind::BlackHole => {
                self.drift_along();
                self.y = self.anchor_y
                    + (self.x * BLACK_HOLE_WAVE_FREQ).sin() * BLACK_HOLE_WAVE_AMPLITUDE;
                self.visible = (now_ms / BLACK_HOLE_BLINK_MS) % 2 == 0;
            }
            ObstacleKind::Signal => {
                if now_ms.saturating_sub(self.last_step_ms) >= SIGNAL_STEP_MS {
                    self.x -= 1.0;
                    self.last_step_ms = now_ms;
                }
            }
        }
    }

    fn drift_along(&mut self) {
        self.x += self.dir.0 * self.speed;
        self.y += self.dir.1 * self.speed;
    }

    /// Pull this obstacle back inside a (possibly shrunken) viewport after
    /// a resize.  Obstacles still right of the edge are incoming spawns
    /// and keep their lead-in; vertically everything is clamped so no
    /// entity can end up unrepresentable.  Damage state is untouched.
    pub fn clamp_into(&mut self, viewport: Viewport) {
        let (w, h) = self.dims();
        let max_x = viewport.width as f32 + 5.0;
        let max_y = (viewport.height as i32 - h).max(0) as f32;
        self.x = self.x.min(max_x).max(-(w as f32));
        self.y = self.y.min(max_y).max(0.0);
        self.anchor_y = self.anchor_y.min(max_y).max(0.0);
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    /// Damage taken so far; monotone until restart.
    pub hits: u32,
    /// Grid cells per discrete move command.
    pub speed: f32,
    pub active: bool,
}

impl Ship {
    pub fn new(x: f32, y: f32) -> Self {
        Ship { x, y, hits: 0, speed: 1.0, active: true }
    }

    /// One hit point per damage-state art variant.
    pub fn max_hits(&self) -> u32 {
        assets::SHIP_STATES.len() as u32
    }

    /// Art for the current damage state.
    pub fn art(&self) -> &'static [&'static str] {
        let idx = (self.hits as usize).min(assets::SHIP_STATES.len() - 1);
        assets::SHIP_STATES[idx]
    }

    pub fn dims(&self) -> (i32, i32) {
        sprite_size(self.art())
    }

    pub fn occupied_cells(&self) -> Vec<(i32, i32)> {
        occupied_cells(self.art(), self.x.round() as i32, self.y.round() as i32)
    }

    /// Try to move by one command step in direction (dx, dy), each
    /// component in {-1, 0, 1}.  The move is vetoed, with no state
    /// change, if the candidate rectangle would leave the viewport or
    /// its occupied cells would land on a solid obstacle.  Purely
    /// advisory: damage is never applied here (that is the collision
    /// resolver's job, exactly once per obstacle).
    pub fn attempt_move(
        &mut self,
        dx: i32,
        dy: i32,
        viewport: Viewport,
        obstacles: &[Obstacle],
    ) -> bool {
        if !self.active {
            return false;
        }

        let nx = self.x + dx as f32 * self.speed;
        let ny = self.y + dy as f32 * self.speed;

        let (w, h) = self.dims();
        let rx = nx.round() as i32;
        let ry = ny.round() as i32;
        if rx < 0
            || ry < 0
            || rx + w > viewport.width as i32
            || ry + h > viewport.height as i32
        {
            return false;
        }

        let candidate: HashSet<(i32, i32)> =
            occupied_cells(self.art(), rx, ry).into_iter().collect();
        for obstacle in obstacles {
            if !obstacle.kind.blocks_movement() {
                continue;
            }
            // Consumed instances are just waiting for the next cull.
            if obstacle.has_hit_ship {
                continue;
            }
            if obstacle
                .occupied_cells()
                .iter()
                .any(|cell| candidate.contains(cell))
            {
                return false;
            }
        }

        self.x = nx;
        self.y = ny;
        true
    }

    /// Apply damage, clamped to `max_hits`.  The once-per-obstacle guard
    /// lives in the collision resolver, not here.
    pub fn take_damage(&mut self, amount: u32) {
        self.hits = (self.hits + amount).min(self.max_hits());
        if self.hits >= self.max_hits() {
            self.active = false;
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits >= self.max_hits()
    }

    /// Remaining health in [0, 100].
    pub fn health_percentage(&self) -> f32 {
        (self.max_hits() - self.hits) as f32 / self.max_hits() as f32 * 100.0
    }
}
