//! Infinite cylinder primitive.

use csgray_math::{direction, DMat4, DVec2, DVec4, Ray, EPSILON};

use super::IntersectionPoint;
use crate::light::Material;

/// The infinite unit-radius cylinder around the local z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    material: Material,
    index: f64,
}

impl Cylinder {
    /// Create a new cylinder.
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

    /// Append every forward crossing of `ray` with the mantle.
    ///
    /// Only the x and y components matter; a ray parallel to the axis never
    /// crosses the mantle.
    pub fn intersect(&self, ray: &Ray, inverse: &DMat4, out: &mut Vec<IntersectionPoint>) -> bool {
        let local = ray.to_local(inverse);
        let o = DVec2::new(local.origin.x, local.origin.y);
        let d = DVec2::new(local.direction.x, local.direction.y);

        let a = d.length_squared();
        if a < EPSILON * EPSILON {
            return false;
        }

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
            let normal = direction(p.x, p.y, 0.0);
            let inside = normal.dot(local.direction) > 0.0;

            out.push(IntersectionPoint::new(p, normal, self.material, self.index, t, inside));
            found = true;
        }

        found
    }

    /// Whether `point` lies strictly inside the mantle.
    pub fn contains(&self, point: DVec4, inverse: &DMat4) -> bool {
        let local = *inverse * point;
        local.x * local.x + local.y * local.y < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csgray_math::point;

    fn hits(ray: &Ray) -> Vec<IntersectionPoint> {
        let mut out = Vec::new();
        Cylinder::new(Material::default(), 1.0).intersect(ray, &DMat4::IDENTITY, &mut out);
        out
    }

    #[test]
    fn test_cylinder_crossing() {
        let ray = Ray::new(point(-3.0, 0.0, 5.0), direction(1.0, 0.0, 0.0), 1.0);
        let out = hits(&ray);

        assert_eq!(out.len(), 2);
        assert!((out[0].point - point(-1.0, 0.0, 5.0)).length() < 1e-9);
        assert!((out[0].normal - direction(-1.0, 0.0, 0.0)).length() < 1e-9);
        assert!(!out[0].inside);
        assert!((out[1].point - point(1.0, 0.0, 5.0)).length() < 1e-9);
        assert!(out[1].inside);
    }

    #[test]
    fn test_cylinder_normal_is_radial() {
        let ray = Ray::new(point(-3.0, 0.0, -3.0), direction(1.0, 0.0, 1.0), 1.0);
        let out = hits(&ray);

        assert_eq!(out.len(), 2);
        for hit in out {
            assert_eq!(hit.normal.z, 0.0);
        }
    }

    #[test]
    fn test_parallel_to_axis_misses() {
        let ray = Ray::new(point(0.0, 0.0, -3.0), direction(0.0, 0.0, 1.0), 1.0);
        assert!(hits(&ray).is_empty());
    }

    #[test]
    fn test_cylinder_miss() {
        let ray = Ray::new(point(-3.0, 2.0, 0.0), direction(1.0, 0.0, 0.0), 1.0);
        assert!(hits(&ray).is_empty());
    }

    #[test]
    fn test_cylinder_contains() {
        let cylinder = Cylinder::new(Material::default(), 1.0);
        assert!(cylinder.contains(point(0.5, 0.0, 100.0), &DMat4::IDENTITY));
        assert!(!cylinder.contains(point(0.0, 1.5, 0.0), &DMat4::IDENTITY));
    }
}
