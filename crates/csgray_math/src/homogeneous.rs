//! Homogeneous coordinates.
//!
//! Points and directions share one representation, `DVec4`, and are told
//! apart by the w coordinate: exactly 1 for points, exactly 0 for directions.
//! Affine matrices then treat both correctly (directions ignore translation),
//! and the ordinary vector operations keep the tag consistent:
//! point - point = direction, point + direction = point.

use glam::DVec4;

/// Tolerance for geometric comparisons.
///
/// Also the minimum distance for a root to count as a forward hit, so rays
/// spawned on a surface do not immediately re-hit it.
pub const EPSILON: f64 = 1e-8;

/// Create a point (w = 1).
#[inline]
pub fn point(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 1.0)
}

/// Create a direction (w = 0).
#[inline]
pub fn direction(x: f64, y: f64, z: f64) -> DVec4 {
    DVec4::new(x, y, z, 0.0)
}

/// Whether `v` carries the point tag.
#[inline]
pub fn is_point(v: DVec4) -> bool {
    v.w == 1.0
}

/// Whether `v` carries the direction tag.
#[inline]
pub fn is_direction(v: DVec4) -> bool {
    v.w == 0.0
}
