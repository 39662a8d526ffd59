//! Unit sphere primitive.

use csgray_math::{DMat4, DVec4, Ray, EPSILON};

use super::IntersectionPoint;
use crate::light::Material;

/// The unit sphere centred at the origin of its object space.
///
/// Other radii and positions come from enclosing transformation nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    material: Material,
    index: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(material: Material, index: f64) -> Self {
        Self { material, index }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Refractive index of the solid.
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Append every forward crossing of `ray` with the sphere.
    ///
    /// Solves |O + t d|^2 = 1 in object space. A tangent ray yields a single
    /// root.
    pub fn intersect(&self, ray: &Ray, inverse: &DMat4, out: &mut Vec<IntersectionPoint>) -> bool {
        let local = ray.to_local(inverse);
        let o = local.origin.truncate();
        let d = local.direction.truncate();

        let a = d.length_squared();
        let h = o.dot(d);
        let c = o.length_squared() - 1.0;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let roots = if discriminant == 0.0 {
            [Some(-h / a), None]
        } else {
            let sqrtd = discriminant.sqrt();
            [Some((-h - sqrtd) / a), Some((-h + sqrtd) / a)]
        };

        let mut found = false;
        for t in roots.into_iter().flatten() {
            if t <= EPSILON {
                continue;
            }

            let p = local.at(t);
            let normal = (p - DVec4::W).normalize();
            let inside = normal.dot(local.direction) > 0.0;

            out.push(IntersectionPoint::new(p, normal, self.material, self.index, t, inside));
            found = true;
        }

        found
    }

    /// Whether `point` lies strictly inside the sphere.
    pub fn contains(&self, point: DVec4, inverse: &DMat4) -> bool {
        (*inverse * point).truncate().length_squared() < 1.0
    }
}
