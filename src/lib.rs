//! Star-dodge: a terminal arcade game where a ship weaves through an
//! ever-harder stream of ASCII obstacles.
//!
//! This crate is split the usual way: the simulation lives here as a
//! library (pure state + logic, randomness injected), and the binary
//! target owns the terminal: input thread, frame pacing, and the
//! crossterm renderer that draws whatever `game::Scene` says.

pub mod assets;
pub mod collision;
pub mod entities;
pub mod game;
pub mod spawner;
