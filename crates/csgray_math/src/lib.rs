// Re-export glam for convenience
pub use glam::*;

// csgray math types
mod homogeneous;
mod ray;
mod transform;

pub use homogeneous::{direction, is_direction, is_point, point, EPSILON};
pub use ray::{LocalRay, Ray};
pub use transform::{Affine, Axis};
