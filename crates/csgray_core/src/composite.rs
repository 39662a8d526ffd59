//! Ready-made solids assembled from half-spaces.
//!
//! Each builder returns a plain [`Node`] tree; every half-space shares the
//! same material and refractive index.

use csgray_math::{direction, DVec3};

use crate::geometry::{HalfSpace, Node};
use crate::light::Material;

/// Half-space bounded by the plane through `normal * offset`, solid on the
/// side opposite to `normal`.
fn face(material: Material, index: f64, normal: DVec3, offset: f64) -> Node {
    Node::from(HalfSpace::new(material, index, direction(normal.x, normal.y, normal.z)))
        .translated(normal * offset)
}

/// Axis-aligned unit cube centered at the origin.
pub fn cube(material: Material, index: f64) -> Node {
    let faces = [DVec3::X, DVec3::Y, DVec3::Z, DVec3::NEG_X, DVec3::NEG_Y, DVec3::NEG_Z]
        .into_iter()
        .map(|normal| face(material, index, normal, 0.5))
        .collect();

    Node::Intersection(faces)
}

/// Right regular triangular prism with side 1, centered on its centroid.
///
/// The triangular faces are perpendicular to z and the apex points along +y.
pub fn prism(material: Material, index: f64) -> Node {
    let inradius = 1.0 / (2.0 * 3f64.sqrt());

    let mut faces: Vec<Node> = [-90f64, 30.0, 150.0]
        .into_iter()
        .map(|degrees| {
            let (sin, cos) = degrees.to_radians().sin_cos();
            face(material, index, DVec3::new(cos, sin, 0.0), inradius)
        })
        .collect();
    faces.push(face(material, index, DVec3::Z, 0.5));
    faces.push(face(material, index, DVec3::NEG_Z, 0.5));

    Node::Intersection(faces)
}

/// Three unit prisms at the corners of a side-2 triangle centered at the origin.
pub fn triforce(material: Material, index: f64) -> Node {
    let sqrt3 = 3f64.sqrt();
    let corners = [
        DVec3::new(0.0, 1.0 / sqrt3, 0.0),
        DVec3::new(-0.5, -0.5 / sqrt3, 0.0),
        DVec3::new(0.5, -0.5 / sqrt3, 0.0),
    ];

    Node::Union(
        corners
            .into_iter()
            .map(|offset| prism(material, index).translated(offset))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{IntersectionPoint, RootObject};
    use crate::light::LightIntensity;
    use csgray_math::{point, Ray};

    fn material() -> Material {
        Material::matte(LightIntensity::GOLD)
    }

    #[test]
    fn test_cube_contains() {
        let cube = RootObject::new(cube(material(), 1.0));

        assert!(cube.contains(point(0.0, 0.0, 0.0)));
        assert!(cube.contains(point(0.4, -0.4, 0.4)));
        assert!(!cube.contains(point(0.5, 0.0, 0.0)));
        assert!(!cube.contains(point(0.6, 0.0, 0.0)));
        assert!(!cube.contains(point(0.0, 0.0, -0.6)));
    }

    #[test]
    fn test_cube_faces() {
        let cube = RootObject::new(cube(material(), 1.5));
        let ray = Ray::new(point(0.1, 0.2, 5.0), direction(0.0, 0.0, -1.0), 1.0);

        let hit = cube.intersect(&ray).expect("ray hits the front face");
        assert!((hit.point - point(0.1, 0.2, 0.5)).length() < 1e-9);
        assert!((hit.normal - direction(0.0, 0.0, 1.0)).length() < 1e-9);
        assert!((hit.distance - 4.5).abs() < 1e-9);
        assert_eq!(hit.index, 1.5);
        assert!(!hit.inside);
    }

    #[test]
    fn test_cube_from_inside() {
        let cube = cube(material(), 1.0);
        let ray = Ray::new(point(0.0, 0.0, 0.0), direction(1.0, 0.0, 0.0), 1.0);

        let mut hits = Vec::new();
        cube.intersect(&ray, &csgray_math::DMat4::IDENTITY, &mut hits);
        hits.sort_by(IntersectionPoint::cmp_distance);

        assert_eq!(hits.len(), 1);
        assert!(hits[0].inside);
        assert!((hits[0].point.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_prism_shape() {
        let prism = RootObject::new(prism(material(), 1.0));
        let sqrt3 = 3f64.sqrt();

        // Centroid, and just inside each vertex.
        assert!(prism.contains(point(0.0, 0.0, 0.0)));
        assert!(prism.contains(point(0.0, 1.0 / sqrt3 - 0.01, 0.0)));
        assert!(prism.contains(point(-0.49, -0.5 / sqrt3 + 0.001, 0.0)));
        assert!(prism.contains(point(0.49, -0.5 / sqrt3 + 0.001, 0.4)));

        assert!(!prism.contains(point(0.0, 1.0 / sqrt3 + 0.01, 0.0)));
        assert!(!prism.contains(point(0.0, -0.5 / sqrt3 - 0.01, 0.0)));
        assert!(!prism.contains(point(0.0, 0.0, 0.6)));
        // Outside the upper right face.
        assert!(!prism.contains(point(0.3, 0.2, 0.0)));
    }

    #[test]
    fn test_prism_bottom_face() {
        let prism = RootObject::new(prism(material(), 1.0));
        let ray = Ray::new(point(0.0, -3.0, 0.0), direction(0.0, 1.0, 0.0), 1.0);

        let hit = prism.intersect(&ray).expect("ray hits the bottom face");
        assert!((hit.point.y + 0.5 / 3f64.sqrt()).abs() < 1e-9);
        assert!((hit.normal - direction(0.0, -1.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_triforce_has_hole() {
        let triforce = RootObject::new(triforce(material(), 1.0));
        let sqrt3 = 3f64.sqrt();

        // The inverted middle triangle is empty.
        assert!(!triforce.contains(point(0.0, 0.0, 0.0)));
        assert!(triforce.contains(point(0.0, 1.0 / sqrt3, 0.0)));
        assert!(triforce.contains(point(-0.5, -0.5 / sqrt3, 0.0)));
        assert!(triforce.contains(point(0.5, -0.5 / sqrt3, 0.0)));
        assert_eq!(triforce.child().primitive_count(), 15);
    }
}
