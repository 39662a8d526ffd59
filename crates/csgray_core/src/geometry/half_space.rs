//! Half-space primitive.

use csgray_math::{is_direction, DMat4, DVec4, Ray, EPSILON};

use super::IntersectionPoint;
use crate::light::Material;

/// All points on the negative side of a plane through the origin.
///
/// The normal points out of the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfSpace {
    material: Material,
    index: f64,
    normal: DVec4,
}

impl HalfSpace {
    /// Create a new half-space, normalizing `normal`.
    ///
    /// # Panics
    ///
    /// If `normal` is not a direction or has zero length.
    pub fn new(material: Material, index: f64, normal: DVec4) -> Self {
        assert!(is_direction(normal), "half-space normal must be a direction, got {normal}");
        assert!(normal.length() > 0.0, "half-space normal must not be zero");

        Self {
            material,
            index,
            normal: normal.normalize(),
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Refractive index of the solid.
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Unit outward normal.
    pub fn normal(&self) -> DVec4 {
        self.normal
    }

    /// Append the forward crossing of `ray` with the boundary plane, if any.
    ///
    /// Rays parallel to the plane never cross it.
    pub fn intersect(&self, ray: &Ray, inverse: &DMat4, out: &mut Vec<IntersectionPoint>) -> bool {
        let local = ray.to_local(inverse);

        let denom = self.normal.dot(local.direction);
        if denom == 0.0 {
            return false;
        }

        // normal.w == 0, so the origin's point tag drops out of the dot product
        let t = -self.normal.dot(local.origin) / denom;
        if t <= EPSILON {
            return false;
        }

        let inside = denom > 0.0;
        out.push(IntersectionPoint::new(
            local.at(t),
            self.normal,
            self.material,
            self.index,
            t,
            inside,
        ));
        true
    }

    /// Whether `point` lies strictly on the solid side of the plane.
    pub fn contains(&self, point: DVec4, inverse: &DMat4) -> bool {
        let local = (*inverse * point).truncate();
        self.normal.truncate().dot(local) < 0.0
    }
}
