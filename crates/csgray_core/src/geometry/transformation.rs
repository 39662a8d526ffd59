//! Transformation node: one child seen through an affine map.

use csgray_math::{Affine, Axis, DMat4, DVec3, DVec4, Ray};

use super::{IntersectionPoint, Node};

/// Places its child in the parent's space through `transform`.
///
/// Queries arrive in parent space. The accumulated inverse is extended with
/// this node's inverse on the way down, so primitives always test in their
/// canonical space; results are mapped forward through this node's matrix on
/// the way back up, one level per node.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    child: Box<Node>,
    transform: Affine,
}

impl Transformation {
    pub fn new(child: Node, transform: Affine) -> Self {
        Self {
            child: Box::new(child),
            transform,
        }
    }

    /// Scale the child along the principal axes.
    pub fn scaling(child: Node, factors: DVec3) -> Self {
        Self::new(child, Affine::scaling(factors))
    }

    /// Rotate the child by `angle` radians about `axis`.
    pub fn rotation(child: Node, axis: Axis, angle: f64) -> Self {
        Self::new(child, Affine::rotation(axis, angle))
    }

    /// Move the child by `offset`.
    pub fn translation(child: Node, offset: DVec3) -> Self {
        Self::new(child, Affine::translation(offset))
    }

    pub fn child(&self) -> &Node {
        &self.child
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    pub fn intersect(&self, ray: &Ray, inverse: &DMat4, out: &mut Vec<IntersectionPoint>) -> bool {
        let accumulated = *self.transform.inverse() * *inverse;

        let mut points = Vec::new();
        let found = self.child.intersect(ray, &accumulated, &mut points);

        out.extend(points.iter().map(|p| p.transformed(&self.transform)));
        found
    }

    pub fn contains(&self, point: DVec4, inverse: &DMat4) -> bool {
        let accumulated = *self.transform.inverse() * *inverse;
        self.child.contains(point, &accumulated)
    }
}
