//! A single Kadosh: chase the player, stop to serve a ball, talk trash.
//!
//! | State   | Entered when                                   | Leaves when                     |
//! |---------|------------------------------------------------|---------------------------------|
//! | `Chase` | spawn, or a serve finishes                     | player in range and cooldown up |
//! | `Serve` | in range and `now - last_attack > cooldown`    | `serve_duration` elapsed        |
//!
//! Death is not a state: the manager removes dead enemies and stops
//! updating them.

use super::EnemyId;
use crate::config::GameConfig;
use crate::geometry::{flatten, yaw_basis, yaw_towards};
use crate::weapon::{Projectile, ProjectileOwner};
use bevy::prelude::*;
use rand::{Rng, RngCore};

/// Racket face offset from the enemy's feet: right, up, forward.
const RACKET_OFFSET: Vec3 = Vec3::new(0.5, 1.15, 0.3);
/// Minimum squared horizontal distance from racket to player for a launch.
const MIN_AIM_DISTANCE_SQ: f32 = 0.01;
/// Serve swing: racket pitch at full windup (halfway through the serve).
const SWING_WINDUP: f32 = -1.2;
/// Serve swing: forward travel per half-serve after the windup.
const SWING_FOLLOW_THROUGH: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyBehavior {
    Chase,
    Serve { started_at: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    /// Feet position, always on the court.
    pub position: Vec3,
    /// Facing, same convention as the player's yaw.
    pub yaw: f32,
    pub hp: f32,
    pub nickname: String,
    pub dead: bool,
    pub behavior: EnemyBehavior,
    pub last_attack_at: f64,
    /// Set once the current serve has launched its ball.
    pub serve_released: bool,
    pub taunt: Option<String>,
    pub taunt_ends_at: f64,
    pub next_taunt_at: f64,
}

impl Enemy {
    /// Fresh enemy at `position`.  The attack cooldown and the first taunt
    /// both count from `now`.
    pub fn new(
        id: EnemyId,
        nickname: String,
        position: Vec3,
        now: f64,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Self {
        Self {
            id,
            position,
            yaw: 0.0,
            hp: config.enemy_max_hp,
            nickname,
            dead: false,
            behavior: EnemyBehavior::Chase,
            last_attack_at: now,
            serve_released: false,
            taunt: None,
            taunt_ends_at: 0.0,
            next_taunt_at: now + roll_taunt_interval(config, rng),
        }
    }

    /// Subtract HP (clamped at zero).  Returns `true` if this call killed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.dead {
            return false;
        }
        self.hp = (self.hp - amount).max(0.0);
        if self.hp <= 0.0 {
            self.dead = true;
        }
        self.dead
    }

    #[inline]
    pub fn is_serving(&self) -> bool {
        matches!(self.behavior, EnemyBehavior::Serve { .. })
    }

    /// World-space launch point of the racket face.
    pub fn racket_point(&self) -> Vec3 {
        let (forward, right) = yaw_basis(self.yaw);
        self.position + right * RACKET_OFFSET.x + Vec3::Y * RACKET_OFFSET.y + forward * RACKET_OFFSET.z
    }

    /// Racket pitch for the renderer: winds back over the first half of the
    /// serve, then swings through.  Zero while chasing.
    pub fn swing_angle(&self, now: f64, config: &GameConfig) -> f32 {
        let EnemyBehavior::Serve { started_at } = self.behavior else {
            return 0.0;
        };
        let t = ((now - started_at) / config.serve_duration).clamp(0.0, 1.0) as f32;
        if t < 0.5 {
            SWING_WINDUP * (t * 2.0)
        } else {
            SWING_WINDUP + 2.0 * (t - 0.5) * SWING_FOLLOW_THROUGH
        }
    }

    /// Run one AI step.  Returns the ball this serve released, if any.
    ///
    /// During a serve the release window is checked before completion, and
    /// `serve_released` guarantees a single ball per serve.
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        player_position: Vec3,
        config: &GameConfig,
        rng: &mut dyn RngCore,
    ) -> Option<Projectile> {
        if self.dead {
            return None;
        }

        if let EnemyBehavior::Serve { started_at } = self.behavior {
            let elapsed = now - started_at;
            let mut launched = None;
            if !self.serve_released
                && elapsed >= config.serve_release_start
                && elapsed <= config.serve_release_end
            {
                self.serve_released = true;
                launched = self.launch_ball(player_position, now, config);
            }
            if elapsed >= config.serve_duration {
                self.behavior = EnemyBehavior::Chase;
                self.last_attack_at = now;
                self.serve_released = false;
            }
            return launched;
        }

        let to_player = flatten(player_position - self.position);
        let dist = to_player.length();

        if dist < config.enemy_attack_range
            && now - self.last_attack_at > config.enemy_attack_cooldown
        {
            self.behavior = EnemyBehavior::Serve { started_at: now };
            self.serve_released = false;
            self.yaw = yaw_towards(self.position, player_position);
        } else if dist > config.enemy_stop_distance {
            let dir = to_player / dist;
            self.position += dir * config.enemy_move_speed * dt;
            self.position.y = config.ground_y;
            self.yaw = yaw_towards(self.position, player_position);
        }

        self.update_taunt(now, config, rng);
        None
    }

    fn launch_ball(&self, target: Vec3, now: f64, config: &GameConfig) -> Option<Projectile> {
        let from = self.racket_point();
        let aim = flatten(target - from);
        if aim.length_squared() <= MIN_AIM_DISTANCE_SQ {
            return None;
        }
        Some(Projectile::new(
            from,
            aim.normalize() * config.enemy_projectile_speed,
            now,
            ProjectileOwner::Enemy,
        ))
    }

    fn update_taunt(&mut self, now: f64, config: &GameConfig, rng: &mut dyn RngCore) {
        if now >= self.next_taunt_at {
            if !config.taunts.is_empty() {
                let line = &config.taunts[rng.gen_range(0..config.taunts.len())];
                self.taunt = Some(line.clone());
                self.taunt_ends_at = now + config.taunt_duration;
            }
            self.next_taunt_at = now + roll_taunt_interval(config, rng);
        }
        if self.taunt.is_some() && now > self.taunt_ends_at {
            self.taunt = None;
        }
    }
}

fn roll_taunt_interval(config: &GameConfig, rng: &mut dyn RngCore) -> f64 {
    if config.taunt_interval_max > config.taunt_interval_min {
        rng.gen_range(config.taunt_interval_min..=config.taunt_interval_max)
    } else {
        config.taunt_interval_min
    }
}
