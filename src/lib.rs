//! Racket Rampage library
//!
//! A first-person arena game on a tennis court: serve balls at a rotating
//! crew of Kadosh opponents, dodge their serves, and crouch over the fallen
//! to patch yourself up.
//!
//! The simulation core (`player`, `weapon`, `enemy`, `game`) is plain Rust
//! with no ECS queries, so it can be driven frame by frame from tests.  The
//! Bevy plugins (`simulation`, `input`, `audio`, `rendering`, `menu`) wrap it.

pub mod audio;
pub mod config;
pub mod constants;
pub mod enemy;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod player;
pub mod rendering;
pub mod simulation;
pub mod weapon;
