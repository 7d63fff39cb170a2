//! Player data: kinematic state, input intent, teabag tracking, and the
//! smoothed first-person camera rig.
//!
//! Everything here is plain data.  The only code that mutates it is
//! [`super::controller::PlayerController`], which owns the single
//! [`PlayerState`] for the whole session.

use crate::config::GameConfig;
use bevy::prelude::*;

// ── Input ──────────────────────────────────────────────────────────────────────

/// Movement intent for the current frame, already decoded from devices.
///
/// Axes are in `[-1, 1]` (positive = forward / right).  Nothing validates the
/// range; out-of-range values are still capped by the max-speed clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub forward: f32,
    pub right: f32,
    pub jump: bool,
    pub crouch: bool,
}

/// One intent channel plus its new value, for [`PlayerController::set_input`].
///
/// [`PlayerController::set_input`]: super::controller::PlayerController::set_input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAxis {
    Forward(f32),
    Right(f32),
    Jump(bool),
    Crouch(bool),
}

// ── Teabag tracking ────────────────────────────────────────────────────────────

/// Progress of the crouch streak on a single corpse.
///
/// The count belongs to `corpse`; switching to another corpse restarts it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TeabagTracker {
    /// Corpse the current streak is counted against.
    pub corpse: Option<u64>,
    /// Accepted crouches on `corpse` so far.
    pub crouches: u32,
    /// Simulated time of the last accepted crouch; `None` before the first.
    pub last_record_time: Option<f64>,
}

// ── Player state ───────────────────────────────────────────────────────────────

/// The player's complete simulation state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Feet position.
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
    pub crouching: bool,
    /// Always within `[0, player_max_hp]`.
    pub hp: f32,
    /// Accumulated, unbounded.
    pub yaw: f32,
    /// Clamped to `[pitch_min, pitch_max]`.
    pub pitch: f32,
    pub input: PlayerInput,
    pub teabag: TeabagTracker,
    /// Set when `hp` reaches zero; cleared only by a reset.
    pub dead: bool,
}

impl PlayerState {
    /// Fresh state standing at the court origin with full HP.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.ground_y, 0.0),
            velocity: Vec3::ZERO,
            grounded: true,
            crouching: false,
            hp: config.player_max_hp,
            yaw: 0.0,
            pitch: 0.0,
            input: PlayerInput::default(),
            teabag: TeabagTracker::default(),
            dead: false,
        }
    }
}

// ── Camera rig ─────────────────────────────────────────────────────────────────

/// Where the renderer should put the first-person camera.
///
/// `position` trails the true eye point by an exponential lerp each frame,
/// which cushions jumps, landings, and crouches.  Orientation is not
/// smoothed: the view follows the mouse exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraRig {
    /// Rig at standing eye height above the origin.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Vec3::new(0.0, config.ground_y + config.eye_height, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Camera orientation as a quaternion (yaw about Y, then pitch about the
    /// local X axis).  A positive pitch tilts the view upward.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}
