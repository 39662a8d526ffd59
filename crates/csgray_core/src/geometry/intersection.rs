//! Ray/solid intersection records.

use std::cmp::Ordering;

use csgray_math::{is_direction, is_point, Affine, DVec4};

use crate::light::Material;

/// Where a ray crosses the boundary of a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    /// Position of the hit (a homogeneous point)
    pub point: DVec4,
    /// Unit outward surface normal (a homogeneous direction)
    pub normal: DVec4,
    /// Material of the solid that was hit
    pub material: Material,
    /// Refractive index of the solid that was hit
    pub index: f64,
    /// Distance from the ray origin
    pub distance: f64,
    /// True if the ray travels from inside the solid across this boundary
    pub inside: bool,
}

impl IntersectionPoint {
    /// Create an intersection record, normalizing `normal`.
    ///
    /// # Panics
    ///
    /// If `point` or `normal` carry the wrong homogeneous tag.
    pub fn new(
        point: DVec4,
        normal: DVec4,
        material: Material,
        index: f64,
        distance: f64,
        inside: bool,
    ) -> Self {
        assert!(is_point(point), "intersection point must be a point, got {point}");
        assert!(is_direction(normal), "surface normal must be a direction, got {normal}");

        Self {
            point,
            normal: normal.normalize(),
            material,
            index,
            distance,
            inside,
        }
    }

    /// Map this record one level up the tree through `transform`.
    ///
    /// The distance is unchanged: local rays share the world parametrization.
    pub fn transformed(&self, transform: &Affine) -> Self {
        Self {
            point: transform.apply(self.point),
            normal: transform.apply_normal(self.normal),
            ..*self
        }
    }

    /// The same crossing seen from the complementary solid.
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            inside: !self.inside,
            ..*self
        }
    }

    /// Order by distance along the ray.
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

impl PartialOrd for IntersectionPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance.partial_cmp(&other.distance)
    }
}
