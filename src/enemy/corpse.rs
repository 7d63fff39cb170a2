//! Fallen enemies left on the court.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Tilt about X of a corpse lying flat.
pub const CORPSE_TILT: f32 = FRAC_PI_2;

#[derive(Debug, Clone, PartialEq)]
pub struct Corpse {
    /// Unique for the session, increasing with every death.
    pub id: u64,
    /// Ground point under the body.
    pub position: Vec3,
    pub spawned_at: f64,
    /// Set once the corpse has paid out a heal.
    pub used: bool,
    /// Facing the enemy had when it died.
    pub yaw: f32,
}

impl Corpse {
    pub fn new(id: u64, position: Vec3, spawned_at: f64, yaw: f32) -> Self {
        Self {
            id,
            position,
            spawned_at,
            used: false,
            yaw,
        }
    }

    #[inline]
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawned_at
    }

    /// Pose of the body for the renderer: on its back, raised by
    /// `rest_height` so it does not sink into the court.
    pub fn fallen_transform(&self, rest_height: f32) -> Transform {
        Transform::from_translation(self.position + Vec3::Y * rest_height)
            .with_rotation(Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(CORPSE_TILT))
    }
}
