//! Small vector helpers shared by the player, weapon, and enemy modules.
//!
//! The court is a flat plane at `y = ground_y`; most gameplay distances are
//! therefore measured in the horizontal (XZ) plane only.
//!
//! Yaw convention: yaw `0` looks down −Z, positive yaw turns left (counter-
//! clockwise seen from above), matching a right-handed Y-up camera.

use bevy::prelude::*;

/// Squared segment length below which a segment is treated as a point.
const DEGENERATE_SEGMENT_SQ: f32 = 1e-10;

/// Swept hit-test: does the segment `start → end` pass within `radius` of
/// `center`?
///
/// The closest point on the segment is found by projecting `center` onto the
/// segment and clamping to its ends, so a fast projectile that jumps clean
/// over a target in one step still registers the hit.  Touching the sphere
/// surface counts as a hit.
pub fn segment_intersects_sphere(start: Vec3, end: Vec3, center: Vec3, radius: f32) -> bool {
    let seg = end - start;
    let len_sq = seg.length_squared();
    if len_sq < DEGENERATE_SEGMENT_SQ {
        return start.distance_squared(center) <= radius * radius;
    }
    let t = ((center - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    let closest = start + seg * t;
    closest.distance_squared(center) <= radius * radius
}

/// Drop the vertical component.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Squared distance between two points in the XZ plane.
#[inline]
pub fn horizontal_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Unit forward (−Z rotated by `yaw`) and right (+X rotated by `yaw`) vectors,
/// both horizontal.
#[inline]
pub fn yaw_basis(yaw: f32) -> (Vec3, Vec3) {
    let rot = Quat::from_rotation_y(yaw);
    (rot * Vec3::NEG_Z, rot * Vec3::X)
}

/// Yaw that makes [`yaw_basis`]'s forward vector point from `from` toward `to`
/// in the horizontal plane.
#[inline]
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let d = to - from;
    (-d.x).atan2(-d.z)
}

/// Scale `v` down so its length does not exceed `max_len`.
#[inline]
pub fn clamp_length(v: Vec3, max_len: f32) -> Vec3 {
    v.clamp_length_max(max_len.max(0.0))
}
