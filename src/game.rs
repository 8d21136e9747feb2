//! Game loop / state machine and the render payload it exposes.
//!
//! `Game::tick` is the scheduler-agnostic entry point: the host calls it
//! at whatever cadence it likes with a monotonically increasing
//! timestamp.  One tick runs input → spawn → motion → collision to
//! completion; there is no parallel mutation anywhere.  The front-end
//! reads a `Scene` afterwards and owns all terminal I/O.

use log::info;
use rand::Rng;

use crate::collision::{self, Impact};
use crate::entities::{Obstacle, ObstacleKind, Phase, Ship, Viewport};
use crate::spawner::Spawner;

/// Background starfield advances on this cadence while playing.
const SCROLL_INTERVAL_MS: u64 = 25;

/// Ship start column; the row is the vertical center.
const SHIP_START_X: f32 = 5.0;

/// Score bonus for picking up a record, in score-clock milliseconds.
const RECORD_BONUS_MS: u64 = 5000;

// ── Input ─────────────────────────────────────────────────────────────────────

/// One frame of player intent.  `dx`/`dy` are level-style movement in
/// {-1, 0, 1}; `pause` and `restart` must arrive edge-triggered (at most
/// once per press) from the input layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputFrame {
    pub dx: i32,
    pub dy: i32,
    pub pause: bool,
    pub restart: bool,
}

impl InputFrame {
    pub fn idle() -> Self {
        InputFrame::default()
    }
}

// ── Render payload ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Grey,
    DarkGrey,
    White,
    Yellow,
    Green,
    Red,
    Magenta,
    Blue,
}

#[derive(Clone, Debug)]
pub struct SceneSprite {
    pub x: i32,
    pub y: i32,
    pub art: &'static [&'static str],
    pub tint: Tint,
}

#[derive(Clone, Copy, Debug)]
pub struct Status {
    pub health_percent: f32,
    pub difficulty: u32,
    pub score: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    GameOver { score: u64, level: u32 },
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub viewport: Viewport,
    pub scroll_offset: usize,
    pub sprites: Vec<SceneSprite>,
    pub status: Status,
    pub overlay: Option<Overlay>,
}

fn kind_tint(kind: ObstacleKind) -> Tint {
    match kind {
        ObstacleKind::Meteor => Tint::Grey,
        ObstacleKind::Moon => Tint::Yellow,
        ObstacleKind::Asteroid => Tint::White,
        ObstacleKind::Record => Tint::Magenta,
        ObstacleKind::BlackHole => Tint::Blue,
        ObstacleKind::Signal => Tint::DarkGrey,
    }
}

/// Ship color by health band.
fn health_tint(percent: f32) -> Tint {
    if percent > 30.0 {
        Tint::Green
    } else if percent > 10.0 {
        Tint::Yellow
    } else {
        Tint::Red
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

pub struct Game {
    pub viewport: Viewport,
    pub ship: Ship,
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub phase: Phase,
    /// Host timestamp of the current game's start; all internal clocks
    /// run on game time so restart truly resets every timer.
    epoch_ms: u64,
    /// The epoch is captured from the first tick's timestamp, so a host
    /// whose clock is not zero-based still starts at game time zero.
    epoch_anchored: bool,
    last_tick_ms: u64,
    score_ms: u64,
    scroll_offset: usize,
    last_scroll_ms: u64,
}

impl Game {
    pub fn new(width: u16, height: u16) -> Self {
        let viewport = Viewport { width, height };
        Game {
            viewport,
            ship: Self::spawn_ship(viewport),
            obstacles: Vec::new(),
            spawner: Spawner::new(viewport),
            phase: Phase::Playing,
            epoch_ms: 0,
            epoch_anchored: false,
            last_tick_ms: 0,
            score_ms: 0,
            scroll_offset: 0,
            last_scroll_ms: 0,
        }
    }

    fn spawn_ship(viewport: Viewport) -> Ship {
        let ship = Ship::new(SHIP_START_X, viewport.height as f32 / 2.0);
        let (w, h) = ship.dims();
        let x = ship.x.min((viewport.width as i32 - w).max(0) as f32);
        let y = ship.y.min((viewport.height as i32 - h).max(0) as f32);
        Ship::new(x, y)
    }

    /// Advance one tick.  Returns the collision side-effects of this tick
    /// so the front-end can flash or buzz.
    pub fn tick(
        &mut self,
        now_ms: u64,
        input: &InputFrame,
        rng: &mut impl Rng,
    ) -> Vec<Impact> {
        if !self.epoch_anchored {
            self.epoch_ms = now_ms;
            self.epoch_anchored = true;
        }

        // Phase actions come first so a restart re-anchors the clocks
        // before anything else looks at them.
        if input.pause {
            self.toggle_pause();
        }
        if input.restart && self.phase == Phase::GameOver {
            self.restart(now_ms);
        }

        let t = now_ms.saturating_sub(self.epoch_ms);
        let dt = t.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = t;

        if self.phase == Phase::Playing && (input.dx != 0 || input.dy != 0) {
            self.ship
                .attempt_move(input.dx, input.dy, self.viewport, &self.obstacles);
        }

        // Background scroll runs on its own cadence, frozen outside Playing.
        if t.saturating_sub(self.last_scroll_ms) >= SCROLL_INTERVAL_MS {
            if self.phase == Phase::Playing {
                self.scroll_offset = self.scroll_offset.wrapping_add(1);
            }
            self.last_scroll_ms = t;
        }

        let mut impacts = Vec::new();
        if self.phase == Phase::Playing {
            self.spawner.advance(t, &mut self.obstacles, rng);
            for obstacle in &mut self.obstacles {
                obstacle.update(t, rng);
            }
            impacts = collision::resolve(&mut self.ship, &mut self.obstacles);

            self.score_ms += dt;
            for impact in &impacts {
                if let Impact::Collected(_) = impact {
                    self.score_ms += RECORD_BONUS_MS;
                }
            }

            if self.ship.is_destroyed() {
                self.phase = Phase::GameOver;
                info!(
                    "game over at level {} with score {}",
                    self.spawner.difficulty,
                    self.score()
                );
            }
        }

        impacts
    }

    /// Pause toggles strictly between Playing and Paused; it never fires
    /// from GameOver.
    fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            Phase::GameOver => Phase::GameOver,
        };
    }

    /// Full reset back to Playing: fresh ship, empty field, spawner at
    /// difficulty 1, score zeroed, clocks re-anchored at `now_ms`.
    pub fn restart(&mut self, now_ms: u64) {
        self.ship = Self::spawn_ship(self.viewport);
        self.obstacles.clear();
        self.spawner.reset();
        self.phase = Phase::Playing;
        self.epoch_ms = now_ms;
        self.epoch_anchored = true;
        self.last_tick_ms = 0;
        self.score_ms = 0;
        self.scroll_offset = 0;
        self.last_scroll_ms = 0;
        info!("game restarted");
    }

    /// Viewport change from the host (debounced externally).  Entities
    /// are pulled back inside the new bounds; health and damage state
    /// are untouched.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
        self.spawner.set_viewport(self.viewport);

        let (w, h) = self.ship.dims();
        self.ship.x = self
            .ship
            .x
            .min((width as i32 - w).max(0) as f32)
            .max(0.0);
        self.ship.y = self
            .ship
            .y
            .min((height as i32 - h).max(0) as f32)
            .max(0.0);

        for obstacle in &mut self.obstacles {
            obstacle.clamp_into(self.viewport);
        }
        info!("viewport resized to {width}x{height}");
    }

    /// Elapsed-time score: one point per 100 ms of play.
    pub fn score(&self) -> u64 {
        self.score_ms / 100
    }

    /// Build the drawable view of the current state.  Obstacles first,
    /// ship on top; hidden (blinking) obstacles are simply not emitted,
    /// though they stay collidable.
    pub fn scene(&self) -> Scene {
        let mut sprites = Vec::with_capacity(self.obstacles.len() + 1);
        for obstacle in &self.obstacles {
            if !obstacle.active || !obstacle.visible {
                continue;
            }
            sprites.push(SceneSprite {
                x: obstacle.x.round() as i32,
                y: obstacle.y.round() as i32,
                art: obstacle.art(),
                tint: kind_tint(obstacle.kind),
            });
        }
        if self.ship.active {
            sprites.push(SceneSprite {
                x: self.ship.x.round() as i32,
                y: self.ship.y.round() as i32,
                art: self.ship.art(),
                tint: health_tint(self.ship.health_percentage()),
            });
        }

        let overlay = match self.phase {
            Phase::Playing => None,
            Phase::Paused => Some(Overlay::Paused),
            Phase::GameOver => Some(Overlay::GameOver {
                score: self.score(),
                level: self.spawner.difficulty,
            }),
        };

        Scene {
            viewport: self.viewport,
            scroll_offset: self.scroll_offset,
            sprites,
            status: Status {
                health_percent: self.ship.health_percentage(),
                difficulty: self.spawner.difficulty,
                score: self.score(),
            },
            overlay,
        }
    }
}
