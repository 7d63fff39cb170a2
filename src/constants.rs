//! Centralised movement, combat, and AI tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//!
//! ## Tuning guidance
//!
//! Every constant is mirrored by a field of [`crate::config::GameConfig`], so
//! any value can be overridden from `assets/game.toml` without recompiling.
//! The values below remain the **authoritative defaults**.
//!
//! Times are in seconds, distances in world units (1 u ≈ 1 m), angles in
//! radians.

// ── World ─────────────────────────────────────────────────────────────────────

/// Side length of the square court the fight takes place on.
pub const GROUND_SIZE: f32 = 80.0;

/// Height of the court surface.  Everything stands on this plane.
pub const GROUND_Y: f32 = 0.0;

/// Inset from the court edge kept free of enemy spawns.
pub const SPAWN_EDGE_MARGIN: f32 = 5.0;

// ── Movement ──────────────────────────────────────────────────────────────────

/// Horizontal speed (u/s) while standing.
pub const WALK_SPEED: f32 = 8.0;

/// Horizontal speed (u/s) while crouching.
pub const CROUCH_SPEED: f32 = 3.0;

/// Upward velocity (u/s) applied on the jump frame.
///
/// With `GRAVITY = 28` the apex is ≈ 2.6 u and the hang time ≈ 0.86 s.
pub const JUMP_IMPULSE: f32 = 12.0;

/// Downward acceleration (u/s²) while airborne.
pub const GRAVITY: f32 = 28.0;

// ── Player ────────────────────────────────────────────────────────────────────

/// Player starting and maximum HP.
pub const PLAYER_MAX_HP: f32 = 100.0;

/// HP restored by one completed teabag.
pub const TEABAG_HEAL_AMOUNT: f32 = 20.0;

/// Accepted crouches on the same corpse needed to earn a heal.
pub const TEABAG_CROUCHES_REQUIRED: u32 = 3;

/// Minimum seconds between two accepted crouch registrations.
///
/// Holding crouch in range counts as one crouch per interval, so a single
/// held key cannot register the whole streak in one frame.
pub const TEABAG_CROUCH_INTERVAL: f64 = 0.28;

/// Height of the enemy model; drives the teabag radius.
pub const ENEMY_MODEL_HEIGHT: f32 = 1.85;

/// Horizontal radius around a corpse inside which crouches count.
pub const TEABAG_DISTANCE: f32 = 1.5 * ENEMY_MODEL_HEIGHT;

// ── Camera ────────────────────────────────────────────────────────────────────

/// Eye height above the feet while standing.
pub const EYE_HEIGHT: f32 = 1.55;

/// Eye height above the feet while crouching.
pub const CROUCH_EYE_HEIGHT: f32 = 0.95;

/// Fraction of the remaining distance the camera closes each frame.
///
/// Lower values give a floatier, more cushioned camera.  1.0 snaps.
pub const CAMERA_LERP: f32 = 0.15;

/// Lowest pitch (rad) the view can reach.
pub const PITCH_MIN: f32 = -1.45;

/// Highest pitch (rad) the view can reach.
pub const PITCH_MAX: f32 = 0.5;

/// Radians of look rotation per pixel of mouse travel.
pub const MOUSE_SENSITIVITY: f32 = 0.0022;

// ── Weapon ────────────────────────────────────────────────────────────────────

/// Balls held by a full racket magazine.
pub const MAGAZINE_SIZE: u32 = 3;

/// Seconds from reload start until the magazine is full again.
pub const RELOAD_DURATION: f64 = 1.5;

/// Minimum seconds between consecutive shots.
pub const SHOOT_COOLDOWN: f64 = 0.3;

/// Speed (u/s) of a ball served by the player.
pub const PROJECTILE_SPEED: f32 = 35.0;

/// Seconds a player ball lives before it is discarded.
pub const PROJECTILE_LIFETIME: f64 = 3.0;

/// HP removed from an enemy per ball hit.
pub const WEAPON_DAMAGE: f32 = 25.0;

/// Height above the player's feet that balls are launched from.
pub const MUZZLE_HEIGHT: f32 = 1.2;

/// Radius of the sphere used to hit-test an enemy.
pub const ENEMY_HIT_RADIUS: f32 = 1.5;

/// Height above an enemy's feet of the hit-sphere centre.
pub const ENEMY_HIT_CENTER_HEIGHT: f32 = 1.0;

// ── Enemy ─────────────────────────────────────────────────────────────────────

/// Live enemies kept on the court at all times.
pub const ENEMY_COUNT: usize = 3;

/// Enemy starting and maximum HP.  Two player hits kill.
pub const ENEMY_MAX_HP: f32 = 50.0;

/// Chase speed (u/s).
pub const ENEMY_MOVE_SPEED: f32 = 4.0;

/// Enemies stop advancing once this close (horizontally) to the player.
pub const ENEMY_STOP_DISTANCE: f32 = 0.5;

/// Horizontal distance at which an enemy starts a serve.
pub const ENEMY_ATTACK_RANGE: f32 = 12.0;

/// Minimum seconds between two serves of the same enemy.
pub const ENEMY_ATTACK_COOLDOWN: f64 = 1.5;

/// Length of the serve windup + swing animation.
pub const SERVE_DURATION: f64 = 0.4;

/// Start of the serve window in which the ball leaves the racket.
pub const SERVE_RELEASE_START: f64 = 0.32;

/// End of the serve window in which the ball leaves the racket.
///
/// The window is 60 ms wide; with the frame delta capped at 50 ms at least
/// one tick always lands inside it.
pub const SERVE_RELEASE_END: f64 = 0.38;

/// HP removed from the player per enemy ball hit.
pub const ENEMY_DAMAGE: f32 = 10.0;

/// Speed (u/s) of an enemy-served ball.
pub const ENEMY_PROJECTILE_SPEED: f32 = 18.0;

/// Seconds an enemy ball lives before it is discarded.
pub const ENEMY_PROJECTILE_LIFETIME: f64 = 3.0;

/// Distance from the player's position within which an enemy ball hits.
pub const ENEMY_PROJECTILE_HIT_RADIUS: f32 = 1.5;

/// Shortest gap between two taunts of the same enemy.
pub const TAUNT_INTERVAL_MIN: f64 = 5.0;

/// Longest gap between two taunts of the same enemy.
pub const TAUNT_INTERVAL_MAX: f64 = 15.0;

/// Seconds a taunt bubble stays up.
pub const TAUNT_DURATION: f64 = 2.5;

/// Delay between a kill and its "death whisper" notification.
pub const DEATH_WHISPER_DELAY: f64 = 0.4;

// ── Corpses ───────────────────────────────────────────────────────────────────

/// Maximum corpses lying on the court; the oldest is evicted beyond this.
pub const MAX_CORPSES: usize = 5;

/// Seconds before an untouched corpse is cleared away.
pub const CORPSE_LIFETIME: f64 = 30.0;

/// Height the fallen body is lifted above the court so it lies on, not in, it.
pub const CORPSE_REST_HEIGHT: f32 = 0.4;

// ── Session ───────────────────────────────────────────────────────────────────

/// Largest simulation step; longer frame stalls are clamped to this.
pub const MAX_FRAME_DELTA: f32 = 0.05;

/// Step used for the very first frame, before a delta is known.
pub const FIRST_FRAME_DELTA: f32 = 1.0 / 60.0;

/// Seconds the restart button must be held on the game-over screen.
pub const RESTART_HOLD: f64 = 2.0;

// ── Flavour text ──────────────────────────────────────────────────────────────

/// Nickname pool for enemies.  Live enemies prefer distinct names.
pub const KADOSH_NICKNAMES: &[&str] = &[
    "The Lob King",
    "Double Fault Dave",
    "Net Cord Ned",
    "Slice Master",
    "Deuce Bruce",
    "Ace Face",
    "Love-Forty Lou",
    "Break Point Pete",
];

/// Lines an enemy shouts at the player between serves.
pub const TAUNTS: &[&str] = &[
    "Your backhand is weak!",
    "Love–forty!",
    "Net cord!",
    "Nice try, rookie!",
    "That was out!",
    "Deuce!",
    "Game, set, match!",
    "Unforced error!",
    "Where's your follow-through?",
    "Too slow!",
];
