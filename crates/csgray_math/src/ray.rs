use std::ops::Neg;

use glam::{DMat4, DVec3, DVec4};

use crate::homogeneous::{is_direction, is_point};

/// A ray in world space.
///
/// Rays travel from `origin` along the unit-length `direction` through a
/// medium with refractive index `index`. They are immutable: reflection,
/// refraction and negation all produce new rays.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec4,
    direction: DVec4,
    index: f64,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// # Panics
    ///
    /// If `origin` is not a point, `direction` is not a direction, or the
    /// direction has zero length.
    pub fn new(origin: DVec4, direction: DVec4, index: f64) -> Self {
        assert!(is_point(origin), "ray origin must be a point, got {origin}");
        assert!(
            is_direction(direction),
            "ray direction must be a direction, got {direction}"
        );
        let length = direction.length();
        assert!(length > 0.0, "ray direction must not be zero");

        Self {
            origin,
            direction: direction / length,
            index,
        }
    }

    /// Create a ray from plain 3D vectors.
    pub fn from_vec3(origin: DVec3, direction: DVec3, index: f64) -> Self {
        Self::new(origin.extend(1.0), direction.extend(0.0), index)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec4 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> DVec4 {
        self.direction
    }

    /// Refractive index of the medium the ray travels through.
    #[inline]
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Get the point along the ray at distance t.
    pub fn at(&self, t: f64) -> DVec4 {
        self.origin + self.direction * t
    }

    /// Reflect the ray at point `p` on a surface with normal `normal`.
    ///
    /// d' = d - 2 (d . n) n, same medium.
    pub fn reflect(&self, p: DVec4, normal: DVec4) -> Ray {
        let n = normal.normalize();
        Ray::new(p, self.direction - 2.0 * self.direction.dot(n) * n, self.index)
    }

    /// Refract the ray at point `p` into a medium of index `n2`.
    ///
    /// The normal may point to either side of the surface; it is flipped to
    /// face the incoming ray before Snell's law is applied. Callers must check
    /// [`Ray::can_refract`] first: under total internal reflection the square
    /// root below has a negative argument.
    pub fn refract(&self, p: DVec4, normal: DVec4, n2: f64) -> Ray {
        let n = facing(self.direction, normal);
        let n1 = self.index;
        let cos = self.direction.dot(n);
        let ratio = n2 / n1;

        let bent = (n1 / n2) * (self.direction - (cos + (ratio * ratio + cos * cos - 1.0).sqrt()) * n);
        Ray::new(p, bent, n2)
    }

    /// Critical-angle test for refraction into a medium of index `n2`.
    ///
    /// Returns false when the ray would be totally internally reflected.
    pub fn can_refract(&self, normal: DVec4, n2: f64) -> bool {
        if self.index < n2 {
            return true;
        }

        let cos = self.direction.dot(normal.normalize()).abs().min(1.0);
        let incidence = cos.acos();
        incidence < (n2 / self.index).asin()
    }

    /// Express the ray in the space reached through `inverse`.
    ///
    /// The direction is not renormalised, so `t` keeps meaning world-space
    /// distance along this ray.
    pub fn to_local(&self, inverse: &DMat4) -> LocalRay {
        LocalRay {
            origin: *inverse * self.origin,
            direction: *inverse * self.direction,
        }
    }
}

impl Neg for Ray {
    type Output = Ray;

    /// Same origin and medium, opposite direction.
    fn neg(self) -> Ray {
        Ray {
            origin: self.origin,
            direction: -self.direction,
            index: self.index,
        }
    }
}

/// A ray mapped into an object's canonical space.
///
/// Unlike [`Ray`] the direction is generally not unit length: scaling
/// transforms stretch it so that `origin + t * direction` is the image of
/// the world-space point at the same `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocalRay {
    pub origin: DVec4,
    pub direction: DVec4,
}

impl LocalRay {
    /// Get the point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f64) -> DVec4 {
        self.origin + self.direction * t
    }
}

/// Orient `normal` (normalised) against `direction`.
fn facing(direction: DVec4, normal: DVec4) -> DVec4 {
    let n = normal.normalize();
    if direction.dot(n) > 0.0 {
        -n
    } else {
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{direction, point, EPSILON};

    const SQRT_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_ray_creation() {
        let ray = Ray::from_vec3(DVec3::new(1.0, 1.0, 1.0), DVec3::new(0.0, 1.0, 0.0), 1.0);

        assert!((ray.index() - 1.0).abs() < EPSILON);
        assert!((ray.origin() - point(1.0, 1.0, 1.0)).length() < EPSILON);
        assert!((ray.direction() - direction(0.0, 1.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_direction_is_normalized() {
        let ray = Ray::new(point(0.0, 0.0, 0.0), direction(3.0, 4.0, 0.0), 1.0);
        assert!((ray.direction().length() - 1.0).abs() < EPSILON);
        assert!((ray.at(5.0) - point(3.0, 4.0, 0.0)).length() < EPSILON);
    }

    #[test]
    #[should_panic]
    fn test_origin_must_be_point() {
        Ray::new(direction(0.0, 0.0, 0.0), direction(1.0, 0.0, 0.0), 1.0);
    }

    #[test]
    #[should_panic]
    fn test_zero_direction_panics() {
        Ray::new(point(0.0, 0.0, 0.0), direction(0.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn test_reflect() {
        let ray = Ray::new(point(1.0, 1.0, 1.0), direction(0.0, 1.0, 0.0), 1.0);
        let reflected = ray.reflect(point(1.0, 2.0, 1.0), direction(0.0, 1.0, 0.0));

        assert!((reflected.index() - 1.0).abs() < EPSILON);
        assert!((reflected.origin() - point(1.0, 2.0, 1.0)).length() < EPSILON);
        assert!((reflected.direction() - direction(0.0, -1.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_refract_same_index_passes_straight() {
        let ray = Ray::new(point(1.0, 1.0, 1.0), direction(0.0, 1.0, 0.0), 1.0);
        let refracted = ray.refract(point(1.0, 2.0, 1.0), direction(SQRT_HALF, SQRT_HALF, 0.0), 1.0);

        assert!((refracted.index() - 1.0).abs() < EPSILON);
        assert!((refracted.origin() - point(1.0, 2.0, 1.0)).length() < EPSILON);
        assert!((refracted.direction() - direction(0.0, 1.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_refract_snell() {
        // 45 degrees into glass: sin(theta2) = sin(45) / 1.5
        let ray = Ray::new(point(-1.0, 1.0, 0.0), direction(1.0, -1.0, 0.0), 1.0);
        let refracted = ray.refract(point(0.0, 0.0, 0.0), direction(0.0, 1.0, 0.0), 1.5);

        let sin_out = refracted.direction().x;
        assert!((sin_out - SQRT_HALF / 1.5).abs() < 1e-9);
        assert!(refracted.direction().y < 0.0);
        assert!((refracted.direction().length() - 1.0).abs() < 1e-9);
        assert_eq!(refracted.index(), 1.5);
    }

    #[test]
    fn test_refract_normal_orientation_irrelevant() {
        let ray = Ray::new(point(-1.0, 1.0, 0.0), direction(1.0, -1.0, 0.0), 1.0);
        let up = ray.refract(point(0.0, 0.0, 0.0), direction(0.0, 1.0, 0.0), 1.3);
        let down = ray.refract(point(0.0, 0.0, 0.0), direction(0.0, -1.0, 0.0), 1.3);
        assert!((up.direction() - down.direction()).length() < 1e-12);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Leaving glass at 60 degrees exceeds the ~41.8 degree critical angle.
        let dir = direction(60f64.to_radians().sin(), 60f64.to_radians().cos(), 0.0);
        let ray = Ray::new(point(0.0, -1.0, 0.0), dir, 1.5);
        assert!(!ray.can_refract(direction(0.0, 1.0, 0.0), 1.0));

        // Straight out is always possible.
        let ray = Ray::new(point(0.0, -1.0, 0.0), direction(0.0, 1.0, 0.0), 1.5);
        assert!(ray.can_refract(direction(0.0, 1.0, 0.0), 1.0));

        // Into a denser medium is always possible.
        let ray = Ray::new(point(0.0, 1.0, 0.0), dir, 1.0);
        assert!(ray.can_refract(direction(0.0, 1.0, 0.0), 1.5));
    }

    #[test]
    fn test_negate() {
        let ray = -Ray::new(point(0.0, 0.0, 0.0), direction(1.0, 0.0, 0.0), 2.0);

        assert!((ray.index() - 2.0).abs() < EPSILON);
        assert!((ray.origin() - point(0.0, 0.0, 0.0)).length() < EPSILON);
        assert!((ray.direction() - direction(-1.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_to_local_translation() {
        let inverse = DMat4::from_translation(DVec3::new(0.0, -2.0, 0.0));
        let local = Ray::new(point(1.0, 0.0, 0.0), direction(0.0, 1.0, 0.0), 1.5).to_local(&inverse);

        assert!((local.origin - point(1.0, -2.0, 0.0)).length() < EPSILON);
        assert!((local.direction - direction(0.0, 1.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_to_local_keeps_parametrization() {
        let forward = DMat4::from_scale(DVec3::splat(2.0));
        let ray = Ray::new(point(0.0, 0.0, -5.0), direction(0.0, 0.0, 1.0), 1.0);
        let local = ray.to_local(&forward.inverse());

        // The local point at t maps back onto the world point at t.
        let t = 3.0;
        assert!((forward * local.at(t) - ray.at(t)).length() < EPSILON);
    }
}
