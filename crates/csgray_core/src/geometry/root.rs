//! Entry point into the geometry tree.

use csgray_math::{DMat4, DVec4, Ray};

use super::{IntersectionPoint, Node};

/// Owns the whole geometry tree and answers world-space queries.
#[derive(Debug, Clone, PartialEq)]
pub struct RootObject {
    child: Node,
}

impl RootObject {
    pub fn new(child: Node) -> Self {
        log::debug!(
            "Created root object: {} nodes, {} primitives",
            child.node_count(),
            child.primitive_count()
        );
        Self { child }
    }

    pub fn child(&self) -> &Node {
        &self.child
    }

    /// Nearest forward hit of `ray` against the whole tree.
    pub fn intersect(&self, ray: &Ray) -> Option<IntersectionPoint> {
        let mut points = Vec::new();
        self.child.intersect(ray, &DMat4::IDENTITY, &mut points);

        points.into_iter().min_by(IntersectionPoint::cmp_distance)
    }

    /// Whether the world-space `point` lies inside the scene's solid matter.
    pub fn contains(&self, point: DVec4) -> bool {
        self.child.contains(point, &DMat4::IDENTITY)
    }
}
