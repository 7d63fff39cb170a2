//! Player movement, look, and health.
//!
//! ## Frame pipeline
//!
//! 1. [`PlayerController::set_input`] / [`PlayerController::add_rotation`]:
//!    the orchestrator copies this frame's intents in.
//! 2. [`PlayerController::update`]: integrates velocity and position, lands
//!    on the court, and eases the camera rig toward the eye point.
//!
//! Damage and healing arrive from the enemy manager and the teabag flow via
//! [`PlayerController::take_damage`] and [`PlayerController::heal`].

use super::state::{CameraRig, InputAxis, PlayerState};
use crate::config::GameConfig;
use crate::geometry::{clamp_length, yaw_basis};
use bevy::prelude::*;

/// Owns the single [`PlayerState`] and every rule that changes it.
#[derive(Debug, Clone)]
pub struct PlayerController {
    pub(super) state: PlayerState,
    pub(super) config: GameConfig,
}

impl PlayerController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            state: PlayerState::new(config),
            config: config.clone(),
        }
    }

    /// Read-only view for the renderer, HUD, and tests.
    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    #[inline]
    pub fn hp(&self) -> f32 {
        self.state.hp
    }

    #[inline]
    pub fn max_hp(&self) -> f32 {
        self.config.player_max_hp
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state.dead
    }

    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.state.crouching
    }

    /// Store one intent channel.
    ///
    /// Crouch takes effect immediately (the stance flips before the next
    /// physics step) so a crouch press can be scored against a corpse in the
    /// same frame it happens.
    pub fn set_input(&mut self, axis: InputAxis) {
        let input = &mut self.state.input;
        match axis {
            InputAxis::Forward(v) => input.forward = v,
            InputAxis::Right(v) => input.right = v,
            InputAxis::Jump(v) => input.jump = v,
            InputAxis::Crouch(v) => {
                input.crouch = v;
                self.state.crouching = v;
            }
        }
    }

    /// Turn the view.  Yaw accumulates without bound; pitch is clamped so the
    /// view can never flip past vertical.
    pub fn add_rotation(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.state.yaw += delta_yaw;
        self.state.pitch = (self.state.pitch + delta_pitch)
            .clamp(self.config.pitch_min, self.config.pitch_max);
    }

    /// Horizontal facing direction (unit length).  Shots travel along this.
    pub fn forward_horizontal(&self) -> Vec3 {
        yaw_basis(self.state.yaw).0
    }

    /// Full look direction including pitch (unit length).
    pub fn forward(&self) -> Vec3 {
        let (fwd, right) = yaw_basis(self.state.yaw);
        Quat::from_axis_angle(right, self.state.pitch) * fwd
    }

    /// Launch point for the player's balls.
    pub fn muzzle_origin(&self) -> Vec3 {
        self.state.position + Vec3::Y * self.config.muzzle_height
    }

    /// Advance movement by `dt` seconds and ease `camera` toward the eye.
    ///
    /// | Phase       | Rule                                                      |
    /// |-------------|-----------------------------------------------------------|
    /// | Horizontal  | `forward·f + right·r`, scaled by walk/crouch speed, clamped to that speed |
    /// | Jump        | grounded + jump intent + standing → `vy = jump_impulse`   |
    /// | Airborne    | `vy -= gravity·dt`                                        |
    /// | Landing     | `y ≤ ground_y` → snap to ground, `vy = 0`, grounded       |
    /// | Camera      | `pos += (eye − pos)·camera_lerp`, orientation copied      |
    ///
    /// A dead player is frozen: nothing moves, including the camera.
    pub fn update(&mut self, dt: f32, camera: &mut CameraRig) {
        if self.state.dead {
            return;
        }
        let cfg = &self.config;
        let s = &mut self.state;

        let speed = if s.crouching {
            cfg.crouch_speed
        } else {
            cfg.walk_speed
        };
        let (forward, right) = yaw_basis(s.yaw);
        let wish = forward * (s.input.forward * speed) + right * (s.input.right * speed);
        let wish = clamp_length(wish, speed);
        s.velocity.x = wish.x;
        s.velocity.z = wish.z;

        if s.grounded {
            if s.input.jump && !s.crouching {
                s.velocity.y = cfg.jump_impulse;
                s.grounded = false;
            } else {
                s.velocity.y = 0.0;
            }
        } else {
            s.velocity.y -= cfg.gravity * dt;
        }

        s.position += s.velocity * dt;

        if s.position.y <= cfg.ground_y {
            s.position.y = cfg.ground_y;
            s.velocity.y = 0.0;
            s.grounded = true;
        }

        let eye_height = if s.crouching {
            cfg.crouch_eye_height
        } else {
            cfg.eye_height
        };
        let eye = s.position + Vec3::Y * eye_height;
        camera.position = camera.position.lerp(eye, cfg.camera_lerp);
        camera.yaw = s.yaw;
        camera.pitch = s.pitch;
    }

    /// Subtract HP, clamping at zero.  Reaching zero kills the player; once
    /// dead, further damage is ignored.  Returns `true` if this call killed.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.state.dead {
            return false;
        }
        self.state.hp = (self.state.hp - amount).clamp(0.0, self.config.player_max_hp);
        if self.state.hp <= 0.0 {
            self.state.hp = 0.0;
            self.state.dead = true;
            return true;
        }
        false
    }

    /// Add HP, clamping at max.  A dead player cannot be healed.
    pub fn heal(&mut self, amount: f32) {
        if self.state.dead {
            return;
        }
        self.state.hp = (self.state.hp + amount).clamp(0.0, self.config.player_max_hp);
    }

    /// Back to the spawn state: origin, full HP, no input, no teabag streak.
    pub fn reset(&mut self) {
        self.state = PlayerState::new(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> (PlayerController, CameraRig) {
        let cfg = GameConfig::default();
        (PlayerController::new(&cfg), CameraRig::new(&cfg))
    }

    #[test]
    fn forward_input_walks_along_negative_z() {
        let (mut p, mut cam) = controller();
        p.set_input(InputAxis::Forward(1.0));
        p.update(1.0, &mut cam);
        assert!((p.position() - Vec3::new(0.0, 0.0, -8.0)).length() < 1e-4);
    }

    #[test]
    fn diagonal_input_is_clamped_to_walk_speed() {
        let (mut p, mut cam) = controller();
        p.set_input(InputAxis::Forward(1.0));
        p.set_input(InputAxis::Right(1.0));
        p.update(DT, &mut cam);
        let horizontal = Vec2::new(p.state().velocity.x, p.state().velocity.z).length();
        assert!((horizontal - 8.0).abs() < 1e-4);
    }

    #[test]
    fn crouching_moves_slower_and_blocks_jump() {
        let (mut p, mut cam) = controller();
        p.set_input(InputAxis::Crouch(true));
        p.set_input(InputAxis::Forward(1.0));
        p.set_input(InputAxis::Jump(true));
        p.update(DT, &mut cam);
        let horizontal = Vec2::new(p.state().velocity.x, p.state().velocity.z).length();
        assert!((horizontal - 3.0).abs() < 1e-4);
        assert!(p.state().grounded);
        assert_eq!(p.position().y, 0.0);
    }

    #[test]
    fn jump_leaves_ground_and_lands_again() {
        let (mut p, mut cam) = controller();
        p.set_input(InputAxis::Jump(true));
        p.update(DT, &mut cam);
        assert!(!p.state().grounded);
        assert!(p.position().y > 0.0);

        p.set_input(InputAxis::Jump(false));
        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            p.update(DT, &mut cam);
            peak = peak.max(p.position().y);
        }
        assert!(p.state().grounded);
        assert_eq!(p.position().y, 0.0);
        assert_eq!(p.state().velocity.y, 0.0);
        // v²/2g = 144/56 ≈ 2.57
        assert!(peak > 2.3 && peak < 2.7, "peak {peak}");
    }

    #[test]
    fn pitch_is_clamped_yaw_is_not() {
        let (mut p, _) = controller();
        p.add_rotation(10.0, 5.0);
        assert_eq!(p.state().pitch, crate::constants::PITCH_MAX);
        p.add_rotation(10.0, -50.0);
        assert_eq!(p.state().pitch, crate::constants::PITCH_MIN);
        assert_eq!(p.state().yaw, 20.0);
    }

    #[test]
    fn camera_eases_toward_eye_height() {
        let (mut p, mut cam) = controller();
        cam.position = Vec3::ZERO;
        p.update(DT, &mut cam);
        // One step closes 15% of the 1.55 gap.
        assert!((cam.position.y - 1.55 * 0.15).abs() < 1e-4);

        for _ in 0..200 {
            p.update(DT, &mut cam);
        }
        assert!((cam.position.y - 1.55).abs() < 1e-3);

        p.set_input(InputAxis::Crouch(true));
        for _ in 0..200 {
            p.update(DT, &mut cam);
        }
        assert!((cam.position.y - 0.95).abs() < 1e-3);
    }

    #[test]
    fn hp_stays_in_range_and_death_is_sticky() {
        let (mut p, _) = controller();
        assert!(!p.take_damage(30.0));
        p.heal(500.0);
        assert_eq!(p.hp(), 100.0);
        assert!(p.take_damage(250.0));
        assert_eq!(p.hp(), 0.0);
        assert!(p.is_dead());

        assert!(!p.take_damage(10.0));
        p.heal(50.0);
        assert_eq!(p.hp(), 0.0);
        assert!(p.is_dead());
    }

    #[test]
    fn dead_player_does_not_move() {
        let (mut p, mut cam) = controller();
        p.take_damage(100.0);
        p.set_input(InputAxis::Forward(1.0));
        p.update(1.0, &mut cam);
        assert_eq!(p.position(), Vec3::ZERO);
    }

    #[test]
    fn reset_restores_spawn_state() {
        let (mut p, mut cam) = controller();
        p.set_input(InputAxis::Forward(1.0));
        p.add_rotation(1.0, 0.3);
        p.update(0.5, &mut cam);
        p.take_damage(100.0);
        p.reset();
        assert_eq!(*p.state(), PlayerState::new(&GameConfig::default()));
    }

    #[test]
    fn look_forward_tilts_with_pitch() {
        let (mut p, _) = controller();
        p.add_rotation(0.0, 0.4);
        let f = p.forward();
        assert!(f.y > 0.0);
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert_eq!(p.forward_horizontal().y, 0.0);
    }
}
