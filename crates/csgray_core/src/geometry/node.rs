//! The geometry tree.

use csgray_math::{Axis, DMat4, DVec3, DVec4, Ray};

use super::csg::{self, Operation};
use super::{Cylinder, HalfSpace, IntersectionPoint, Sphere, Transformation};

/// A node of the solid-geometry tree.
///
/// Every node exclusively owns its children, so the tree has no sharing and
/// no cycles; dropping a node drops its whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Sphere(Sphere),
    HalfSpace(HalfSpace),
    Cylinder(Cylinder),
    Transformation(Transformation),
    Union(Vec<Node>),
    Intersection(Vec<Node>),
    Exclusion(Vec<Node>),
    Subtraction(Vec<Node>),
}

impl Node {
    /// Build a combination node.
    pub fn combination(operation: Operation, children: Vec<Node>) -> Node {
        match operation {
            Operation::Union => Node::Union(children),
            Operation::Intersection => Node::Intersection(children),
            Operation::Exclusion => Node::Exclusion(children),
            Operation::Subtraction => Node::Subtraction(children),
        }
    }

    /// Wrap this node in a scaling.
    pub fn scaled(self, factors: DVec3) -> Node {
        Node::Transformation(Transformation::scaling(self, factors))
    }

    /// Wrap this node in a rotation by `angle` radians.
    pub fn rotated(self, axis: Axis, angle: f64) -> Node {
        Node::Transformation(Transformation::rotation(self, axis, angle))
    }

    /// Wrap this node in a translation.
    pub fn translated(self, offset: DVec3) -> Node {
        Node::Transformation(Transformation::translation(self, offset))
    }

    /// Append every candidate crossing of `ray` with this solid.
    ///
    /// `inverse` maps world space into this node's frame. Returned points are
    /// in this node's parent frame (world space at the root). Returns whether
    /// anything was appended.
    pub fn intersect(&self, ray: &Ray, inverse: &DMat4, out: &mut Vec<IntersectionPoint>) -> bool {
        match self {
            Node::Sphere(sphere) => sphere.intersect(ray, inverse, out),
            Node::HalfSpace(half_space) => half_space.intersect(ray, inverse, out),
            Node::Cylinder(cylinder) => cylinder.intersect(ray, inverse, out),
            Node::Transformation(transformation) => transformation.intersect(ray, inverse, out),
            Node::Union(children) => csg::union_intersect(children, ray, inverse, out),
            Node::Intersection(children) => csg::intersection_intersect(children, ray, inverse, out),
            Node::Exclusion(children) => csg::exclusion_intersect(children, ray, inverse, out),
            Node::Subtraction(children) => csg::subtraction_intersect(children, ray, inverse, out),
        }
    }

    /// Whether `point` lies in the solid's interior.
    pub fn contains(&self, point: DVec4, inverse: &DMat4) -> bool {
        match self {
            Node::Sphere(sphere) => sphere.contains(point, inverse),
            Node::HalfSpace(half_space) => half_space.contains(point, inverse),
            Node::Cylinder(cylinder) => cylinder.contains(point, inverse),
            Node::Transformation(transformation) => transformation.contains(point, inverse),
            Node::Union(children) => csg::union_contains(children, point, inverse),
            Node::Intersection(children) => csg::intersection_contains(children, point, inverse),
            Node::Exclusion(children) => csg::exclusion_contains(children, point, inverse),
            Node::Subtraction(children) => csg::subtraction_contains(children, point, inverse),
        }
    }

    /// Short name of the node kind, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Sphere(_) => "sphere",
            Node::HalfSpace(_) => "half-space",
            Node::Cylinder(_) => "cylinder",
            Node::Transformation(_) => "transformation",
            Node::Union(_) => Operation::Union.name(),
            Node::Intersection(_) => Operation::Intersection.name(),
            Node::Exclusion(_) => Operation::Exclusion.name(),
            Node::Subtraction(_) => Operation::Subtraction.name(),
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + match self {
            Node::Sphere(_) | Node::HalfSpace(_) | Node::Cylinder(_) => 0,
            Node::Transformation(transformation) => transformation.child().node_count(),
            Node::Union(children)
            | Node::Intersection(children)
            | Node::Exclusion(children)
            | Node::Subtraction(children) => children.iter().map(Node::node_count).sum(),
        }
    }

    /// Number of primitives (leaves) in this subtree.
    pub fn primitive_count(&self) -> usize {
        match self {
            Node::Sphere(_) | Node::HalfSpace(_) | Node::Cylinder(_) => 1,
            Node::Transformation(transformation) => transformation.child().primitive_count(),
            Node::Union(children)
            | Node::Intersection(children)
            | Node::Exclusion(children)
            | Node::Subtraction(children) => children.iter().map(Node::primitive_count).sum(),
        }
    }
}

impl From<Sphere> for Node {
    fn from(sphere: Sphere) -> Self {
        Node::Sphere(sphere)
    }
}

impl From<HalfSpace> for Node {
    fn from(half_space: HalfSpace) -> Self {
        Node::HalfSpace(half_space)
    }
}

impl From<Cylinder> for Node {
    fn from(cylinder: Cylinder) -> Self {
        Node::Cylinder(cylinder)
    }
}

impl From<Transformation> for Node {
    fn from(transformation: Transformation) -> Self {
        Node::Transformation(transformation)
    }
}
