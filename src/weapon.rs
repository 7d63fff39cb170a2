//! The player's racket: magazine, reload, cooldown, and ball flight.
//!
//! [`WeaponSystem`] is plain data owned by [`crate::game::Game`].  Hit
//! detection is not its concern: [`WeaponSystem::update`] hands each ball's
//! swept segment to a caller-supplied test and drops the ball when the test
//! reports a hit.
//!
//! [`Projectile`] is shared with the enemy manager, which flies the enemies'
//! served balls with the same integration.

use crate::config::GameConfig;
use bevy::prelude::*;

/// Visual spin rate of a ball in flight, rad/s.
const BALL_SPIN_RATE: f32 = 12.0;

/// Who served a ball.  Decides what it can hurt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// A tennis ball in straight-line flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Simulated time the ball was launched.
    pub born_at: f64,
    pub owner: ProjectileOwner,
    /// Accumulated spin angle for rendering only.
    pub spin: f32,
}

impl Projectile {
    pub fn new(position: Vec3, velocity: Vec3, born_at: f64, owner: ProjectileOwner) -> Self {
        Self {
            position,
            velocity,
            born_at,
            owner,
            spin: 0.0,
        }
    }

    /// Move one step and return the position the ball started the step at.
    pub fn advance(&mut self, dt: f32) -> Vec3 {
        let prev = self.position;
        self.position += self.velocity * dt;
        self.spin += BALL_SPIN_RATE * dt;
        prev
    }

    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.born_at
    }
}

/// Magazine, reload, and cooldown state plus the player's balls in flight.
#[derive(Debug, Clone)]
pub struct WeaponSystem {
    magazine: u32,
    reloading: bool,
    reload_started_at: f64,
    /// `None` until the first shot, so the opening shot is never gated.
    last_shot_at: Option<f64>,
    projectiles: Vec<Projectile>,
    config: GameConfig,
}

impl WeaponSystem {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            magazine: config.magazine_size,
            reloading: false,
            reload_started_at: 0.0,
            last_shot_at: None,
            projectiles: Vec::new(),
            config: config.clone(),
        }
    }

    #[inline]
    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    #[inline]
    pub fn magazine_size(&self) -> u32 {
        self.config.magazine_size
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reloading
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Fraction of the current reload completed, in `[0, 1]`; `0` when idle.
    pub fn reload_progress(&self, now: f64) -> f32 {
        if !self.reloading {
            return 0.0;
        }
        ((now - self.reload_started_at) / self.config.reload_duration).clamp(0.0, 1.0) as f32
    }

    /// Launch a ball from `origin` along `direction`.
    ///
    /// Rejected (returns `false`, nothing changes) while reloading, with an
    /// empty magazine, or within `shoot_cooldown` of the previous shot.
    /// `direction` is normalized here; a zero direction is rejected.
    pub fn shoot(&mut self, origin: Vec3, direction: Vec3, now: f64) -> bool {
        if self.reloading || self.magazine == 0 {
            return false;
        }
        if let Some(last) = self.last_shot_at {
            if now - last < self.config.shoot_cooldown {
                return false;
            }
        }
        let Some(dir) = direction.try_normalize() else {
            return false;
        };
        self.magazine -= 1;
        self.last_shot_at = Some(now);
        self.projectiles.push(Projectile::new(
            origin,
            dir * self.config.projectile_speed,
            now,
            ProjectileOwner::Player,
        ));
        true
    }

    /// Begin reloading.  Refused while already reloading or when full.
    pub fn start_reload(&mut self, now: f64) -> bool {
        if self.reloading || self.magazine >= self.config.magazine_size {
            return false;
        }
        self.reloading = true;
        self.reload_started_at = now;
        true
    }

    /// Finish a due reload, then fly every ball one step.
    ///
    /// `hit_test(prev, current)` receives each ball's swept segment; a `true`
    /// result consumes the ball.  Balls older than `projectile_lifetime` are
    /// dropped after their final step.
    pub fn update(&mut self, now: f64, dt: f32, mut hit_test: impl FnMut(Vec3, Vec3) -> bool) {
        if self.reloading && now - self.reload_started_at >= self.config.reload_duration {
            self.magazine = self.config.magazine_size;
            self.reloading = false;
        }

        let lifetime = self.config.projectile_lifetime;
        self.projectiles.retain_mut(|p| {
            let prev = p.advance(dt);
            if hit_test(prev, p.position) {
                return false;
            }
            p.age(now) <= lifetime
        });
    }

    /// Full magazine, no balls, no cooldown history.
    pub fn reset(&mut self) {
        self.magazine = self.config.magazine_size;
        self.reloading = false;
        self.reload_started_at = 0.0;
        self.last_shot_at = None;
        self.projectiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon() -> WeaponSystem {
        WeaponSystem::new(&GameConfig::default())
    }

    fn fire(w: &mut WeaponSystem, now: f64) -> bool {
        w.shoot(Vec3::new(0.0, 1.2, 0.0), Vec3::NEG_Z, now)
    }

    #[test]
    fn empty_magazine_then_reload_refills() {
        let mut w = weapon();
        assert!(fire(&mut w, 0.0));
        assert!(fire(&mut w, 0.3));
        assert!(fire(&mut w, 0.6));
        assert_eq!(w.magazine(), 0);
        assert!(!fire(&mut w, 5.0));

        assert!(w.start_reload(5.0));
        assert!(!fire(&mut w, 5.5), "cannot shoot mid-reload");
        w.update(6.0, 0.016, |_, _| false);
        assert!(w.is_reloading());
        w.update(6.5, 0.016, |_, _| false);
        assert!(!w.is_reloading());
        assert_eq!(w.magazine(), 3);
    }

    #[test]
    fn cooldown_gates_rapid_fire() {
        let mut w = weapon();
        assert!(fire(&mut w, 10.0));
        assert!(!fire(&mut w, 10.1));
        assert!(!fire(&mut w, 10.29));
        assert!(fire(&mut w, 10.3));
        assert_eq!(w.magazine(), 1);
    }

    #[test]
    fn first_shot_is_never_gated() {
        let mut w = weapon();
        assert!(fire(&mut w, 0.0));
    }

    #[test]
    fn reload_refused_when_full_or_already_reloading() {
        let mut w = weapon();
        assert!(!w.start_reload(0.0));
        fire(&mut w, 0.0);
        assert!(w.start_reload(1.0));
        assert!(!w.start_reload(1.1));
        assert!((w.reload_progress(1.75) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ball_travels_at_projectile_speed() {
        let mut w = weapon();
        fire(&mut w, 0.0);
        w.update(0.1, 0.1, |_, _| false);
        let p = &w.projectiles()[0];
        assert!((p.position - Vec3::new(0.0, 1.2, -3.5)).length() < 1e-4);
        assert_eq!(p.owner, ProjectileOwner::Player);
    }

    #[test]
    fn hit_consumes_ball_with_swept_segment() {
        let mut w = weapon();
        fire(&mut w, 0.0);
        let mut segments = Vec::new();
        w.update(0.05, 0.05, |a, b| {
            segments.push((a, b));
            true
        });
        assert!(w.projectiles().is_empty());
        assert_eq!(segments.len(), 1);
        let (a, b) = segments[0];
        assert!((a - Vec3::new(0.0, 1.2, 0.0)).length() < 1e-5);
        assert!((b - a).length() > 1.7);
    }

    #[test]
    fn ball_expires_after_lifetime() {
        let mut w = weapon();
        fire(&mut w, 0.0);
        w.update(3.0, 0.05, |_, _| false);
        assert_eq!(w.projectiles().len(), 1);
        w.update(3.05, 0.05, |_, _| false);
        assert!(w.projectiles().is_empty());
    }

    #[test]
    fn reset_restores_full_magazine() {
        let mut w = weapon();
        fire(&mut w, 0.0);
        w.start_reload(0.1);
        w.reset();
        assert_eq!(w.magazine(), 3);
        assert!(!w.is_reloading());
        assert!(w.projectiles().is_empty());
        assert!(fire(&mut w, 0.0));
    }
}
