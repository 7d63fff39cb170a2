//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about:
//!
//! ```toml
//! magazine_size = 5
//! enemy_count = 6
//! rng_seed = 1234
//! ```
//!
//! The simulation never reads this resource directly: [`crate::game::Game`]
//! takes a copy at construction and hands the same copy to each subsystem, so
//! tests can build a game from any config without an `App`.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{
    ensure_non_negative, ensure_positive, ensure_unit_interval, GameError, GameResult,
};
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    // ── World ────────────────────────────────────────────────────────────────
    pub ground_size: f32,
    pub ground_y: f32,
    pub spawn_edge_margin: f32,

    // ── Movement ─────────────────────────────────────────────────────────────
    pub walk_speed: f32,
    pub crouch_speed: f32,
    pub jump_impulse: f32,
    pub gravity: f32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_max_hp: f32,
    pub teabag_heal_amount: f32,
    pub teabag_crouches_required: u32,
    pub teabag_crouch_interval: f64,
    pub teabag_distance: f32,

    // ── Camera ───────────────────────────────────────────────────────────────
    pub eye_height: f32,
    pub crouch_eye_height: f32,
    pub camera_lerp: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    pub mouse_sensitivity: f32,

    // ── Weapon ───────────────────────────────────────────────────────────────
    pub magazine_size: u32,
    pub reload_duration: f64,
    pub shoot_cooldown: f64,
    pub projectile_speed: f32,
    pub projectile_lifetime: f64,
    pub weapon_damage: f32,
    pub muzzle_height: f32,
    pub enemy_hit_radius: f32,
    pub enemy_hit_center_height: f32,

    // ── Enemy ────────────────────────────────────────────────────────────────
    pub enemy_count: usize,
    pub enemy_max_hp: f32,
    pub enemy_move_speed: f32,
    pub enemy_stop_distance: f32,
    pub enemy_attack_range: f32,
    pub enemy_attack_cooldown: f64,
    pub serve_duration: f64,
    pub serve_release_start: f64,
    pub serve_release_end: f64,
    pub enemy_damage: f32,
    pub enemy_projectile_speed: f32,
    pub enemy_projectile_lifetime: f64,
    pub enemy_projectile_hit_radius: f32,
    pub taunt_interval_min: f64,
    pub taunt_interval_max: f64,
    pub taunt_duration: f64,
    pub death_whisper_delay: f64,
    pub nicknames: Vec<String>,
    pub taunts: Vec<String>,

    // ── Corpses ──────────────────────────────────────────────────────────────
    pub max_corpses: usize,
    pub corpse_lifetime: f64,
    pub corpse_rest_height: f32,

    // ── Session ──────────────────────────────────────────────────────────────
    pub max_frame_delta: f32,
    pub first_frame_delta: f32,
    pub restart_hold: f64,
    /// Fixed seed for enemy names, taunts, and spawn points.  `None` seeds
    /// from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // World
            ground_size: GROUND_SIZE,
            ground_y: GROUND_Y,
            spawn_edge_margin: SPAWN_EDGE_MARGIN,
            // Movement
            walk_speed: WALK_SPEED,
            crouch_speed: CROUCH_SPEED,
            jump_impulse: JUMP_IMPULSE,
            gravity: GRAVITY,
            // Player
            player_max_hp: PLAYER_MAX_HP,
            teabag_heal_amount: TEABAG_HEAL_AMOUNT,
            teabag_crouches_required: TEABAG_CROUCHES_REQUIRED,
            teabag_crouch_interval: TEABAG_CROUCH_INTERVAL,
            teabag_distance: TEABAG_DISTANCE,
            // Camera
            eye_height: EYE_HEIGHT,
            crouch_eye_height: CROUCH_EYE_HEIGHT,
            camera_lerp: CAMERA_LERP,
            pitch_min: PITCH_MIN,
            pitch_max: PITCH_MAX,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            // Weapon
            magazine_size: MAGAZINE_SIZE,
            reload_duration: RELOAD_DURATION,
            shoot_cooldown: SHOOT_COOLDOWN,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME,
            weapon_damage: WEAPON_DAMAGE,
            muzzle_height: MUZZLE_HEIGHT,
            enemy_hit_radius: ENEMY_HIT_RADIUS,
            enemy_hit_center_height: ENEMY_HIT_CENTER_HEIGHT,
            // Enemy
            enemy_count: ENEMY_COUNT,
            enemy_max_hp: ENEMY_MAX_HP,
            enemy_move_speed: ENEMY_MOVE_SPEED,
            enemy_stop_distance: ENEMY_STOP_DISTANCE,
            enemy_attack_range: ENEMY_ATTACK_RANGE,
            enemy_attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            serve_duration: SERVE_DURATION,
            serve_release_start: SERVE_RELEASE_START,
            serve_release_end: SERVE_RELEASE_END,
            enemy_damage: ENEMY_DAMAGE,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            enemy_projectile_lifetime: ENEMY_PROJECTILE_LIFETIME,
            enemy_projectile_hit_radius: ENEMY_PROJECTILE_HIT_RADIUS,
            taunt_interval_min: TAUNT_INTERVAL_MIN,
            taunt_interval_max: TAUNT_INTERVAL_MAX,
            taunt_duration: TAUNT_DURATION,
            death_whisper_delay: DEATH_WHISPER_DELAY,
            nicknames: KADOSH_NICKNAMES.iter().map(|s| s.to_string()).collect(),
            taunts: TAUNTS.iter().map(|s| s.to_string()).collect(),
            // Corpses
            max_corpses: MAX_CORPSES,
            corpse_lifetime: CORPSE_LIFETIME,
            corpse_rest_height: CORPSE_REST_HEIGHT,
            // Session
            max_frame_delta: MAX_FRAME_DELTA,
            first_frame_delta: FIRST_FRAME_DELTA,
            restart_hold: RESTART_HOLD,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Half-width of the square area enemies spawn in, centred on the origin.
    #[inline]
    pub fn spawn_half_extent(&self) -> f32 {
        (self.ground_size / 2.0 - self.spawn_edge_margin).max(0.0)
    }

    /// Check every value whose misconfiguration would break a simulation
    /// invariant (empty magazine size, inverted ranges, zero corpse cap, …).
    pub fn validate(&self) -> GameResult<()> {
        ensure_positive("ground_size", self.ground_size as f64)?;
        ensure_positive("walk_speed", self.walk_speed as f64)?;
        ensure_non_negative("crouch_speed", self.crouch_speed as f64)?;
        ensure_non_negative("jump_impulse", self.jump_impulse as f64)?;
        ensure_non_negative("gravity", self.gravity as f64)?;

        ensure_positive("player_max_hp", self.player_max_hp as f64)?;
        ensure_non_negative("teabag_heal_amount", self.teabag_heal_amount as f64)?;
        ensure_positive(
            "teabag_crouches_required",
            self.teabag_crouches_required as f64,
        )?;
        ensure_non_negative("teabag_crouch_interval", self.teabag_crouch_interval)?;
        ensure_positive("teabag_distance", self.teabag_distance as f64)?;

        ensure_unit_interval("camera_lerp", self.camera_lerp as f64)?;
        if self.pitch_min > self.pitch_max {
            return Err(GameError::InvalidConfig {
                name: "pitch_min",
                value: self.pitch_min as f64,
                expected: "≤ pitch_max",
            });
        }

        ensure_positive("magazine_size", self.magazine_size as f64)?;
        ensure_positive("reload_duration", self.reload_duration)?;
        ensure_non_negative("shoot_cooldown", self.shoot_cooldown)?;
        ensure_positive("projectile_speed", self.projectile_speed as f64)?;
        ensure_positive("projectile_lifetime", self.projectile_lifetime)?;
        ensure_positive("enemy_hit_radius", self.enemy_hit_radius as f64)?;

        ensure_positive("enemy_count", self.enemy_count as f64)?;
        ensure_positive("enemy_max_hp", self.enemy_max_hp as f64)?;
        ensure_positive("serve_duration", self.serve_duration)?;
        if !(0.0 <= self.serve_release_start
            && self.serve_release_start <= self.serve_release_end
            && self.serve_release_end < self.serve_duration)
        {
            return Err(GameError::InvalidConfig {
                name: "serve_release_start",
                value: self.serve_release_start,
                expected: "0 ≤ start ≤ end < serve_duration",
            });
        }
        ensure_positive("enemy_projectile_lifetime", self.enemy_projectile_lifetime)?;
        ensure_non_negative("taunt_interval_min", self.taunt_interval_min)?;
        if self.taunt_interval_max < self.taunt_interval_min {
            return Err(GameError::InvalidConfig {
                name: "taunt_interval_max",
                value: self.taunt_interval_max,
                expected: "≥ taunt_interval_min",
            });
        }
        ensure_non_negative("death_whisper_delay", self.death_whisper_delay)?;
        ensure_positive("nicknames", self.nicknames.len() as f64)?;

        ensure_positive("max_corpses", self.max_corpses as f64)?;
        ensure_positive("corpse_lifetime", self.corpse_lifetime)?;

        ensure_positive("max_frame_delta", self.max_frame_delta as f64)?;
        ensure_positive("first_frame_delta", self.first_frame_delta as f64)?;
        ensure_non_negative("restart_hold", self.restart_hold)?;
        Ok(())
    }
}

/// Parse a TOML document into a validated [`GameConfig`].
///
/// `origin` is only used to label errors.
pub fn parse_game_config(contents: &str, origin: &str) -> GameResult<GameConfig> {
    let config: GameConfig = toml::from_str(contents).map_err(|e| GameError::ConfigParse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Read and parse a config file.  A missing file is reported as
/// [`GameError::ConfigRead`]; callers decide whether that is fatal.
pub fn load_game_config_from(path: impl AsRef<Path>) -> GameResult<GameConfig> {
    let path = path.as_ref();
    let label = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|e| GameError::ConfigRead {
        path: label.clone(),
        message: e.to_string(),
    })?;
    parse_game_config(&contents, &label)
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are printed to stderr but do not abort the game.  A missing file is
/// silently ignored (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    if !Path::new(CONFIG_PATH).exists() {
        println!("ℹ No {CONFIG_PATH} found; using compiled defaults");
        return;
    }
    match load_game_config_from(CONFIG_PATH) {
        Ok(loaded) => {
            *config = loaded;
            println!("✓ Loaded game config from {CONFIG_PATH}");
        }
        Err(e) => {
            eprintln!("⚠ {e}; using defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let cfg = parse_game_config("magazine_size = 5\nrng_seed = 7\n", "inline").unwrap();
        assert_eq!(cfg.magazine_size, 5);
        assert_eq!(cfg.rng_seed, Some(7));
        assert_eq!(cfg.enemy_count, ENEMY_COUNT);
        assert_eq!(cfg.nicknames.len(), KADOSH_NICKNAMES.len());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_game_config("magazine_size = \"lots\"", "inline").unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
    }

    #[test]
    fn serve_window_outside_serve_is_rejected() {
        let err = parse_game_config("serve_release_end = 0.5", "inline").unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidConfig {
                name: "serve_release_start",
                ..
            }
        ));
    }

    #[test]
    fn zero_corpse_cap_is_rejected() {
        let err = parse_game_config("max_corpses = 0", "inline").unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidConfig {
                name: "max_corpses",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_game_config_from("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, GameError::ConfigRead { .. }));
    }

    #[test]
    fn spawn_extent_matches_court_minus_margin() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.spawn_half_extent(), 35.0);
    }
}
