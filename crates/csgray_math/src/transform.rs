// Affine transforms for scene nodes
//
// Stores a glam::DMat4 together with its inverse. The inverse is derived from
// the construction parameters rather than by general matrix inversion.

use glam::{DMat3, DMat4, DVec3, DVec4};

/// Principal axis for rotations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Map the scene-file axis number (0, 1, 2) to an axis.
    pub fn from_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }
}

/// A forward affine map with its precomputed inverse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    matrix: DMat4,
    inverse: DMat4,
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
    };

    /// Non-uniform scaling along the principal axes.
    ///
    /// # Panics
    ///
    /// If any factor is zero (the map would not be invertible).
    pub fn scaling(factors: DVec3) -> Self {
        assert!(
            factors.x != 0.0 && factors.y != 0.0 && factors.z != 0.0,
            "scaling factors must be non-zero, got {factors}"
        );
        Self {
            matrix: DMat4::from_scale(factors),
            inverse: DMat4::from_scale(factors.recip()),
        }
    }

    /// Rotation by `angle` radians about a principal axis.
    pub fn rotation(axis: Axis, angle: f64) -> Self {
        let rotate = |a: f64| match axis {
            Axis::X => DMat4::from_rotation_x(a),
            Axis::Y => DMat4::from_rotation_y(a),
            Axis::Z => DMat4::from_rotation_z(a),
        };
        Self {
            matrix: rotate(angle),
            inverse: rotate(-angle),
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: DVec3) -> Self {
        Self {
            matrix: DMat4::from_translation(offset),
            inverse: DMat4::from_translation(-offset),
        }
    }

    /// Forward (object to parent) matrix.
    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    /// Inverse (parent to object) matrix.
    #[inline]
    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    /// Map a point or direction forward.
    #[inline]
    pub fn apply(&self, v: DVec4) -> DVec4 {
        self.matrix * v
    }

    /// Map a surface normal forward.
    ///
    /// Normals transform with the inverse transpose of the linear part so they
    /// stay perpendicular to the surface under non-uniform scaling. The result
    /// is a unit direction.
    pub fn apply_normal(&self, normal: DVec4) -> DVec4 {
        let linear = DMat3::from_mat4(self.inverse).transpose();
        (linear * normal.truncate()).normalize().extend(0.0)
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}
