//! Solid geometry: primitives, transformations and boolean combinations.
//!
//! Every solid answers two queries: where a ray crosses its boundary and
//! whether a point lies in its interior. Queries carry the accumulated
//! inverse transform from world space down to the node being asked.

mod csg;
mod cylinder;
mod half_space;
mod intersection;
mod node;
mod root;
mod sphere;
mod transformation;

pub use csg::Operation;
pub use cylinder::Cylinder;
pub use half_space::HalfSpace;
pub use intersection::IntersectionPoint;
pub use node::Node;
pub use root::RootObject;
pub use sphere::Sphere;
pub use transformation::Transformation;
