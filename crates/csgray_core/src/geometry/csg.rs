//! Boolean combination of child solids.
//!
//! Every operation gathers the candidate boundary points of each child and
//! keeps those that lie on the boundary of the combined solid, judged by
//! asking the *other* children whether they contain the point. Candidates
//! come back in the combination's own frame, so siblings are asked with the
//! identity transform.

use csgray_math::{DMat4, DVec4, Ray};

use super::{IntersectionPoint, Node};

/// Which boolean operation a combination node performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Union,
    Intersection,
    Exclusion,
    Subtraction,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Union => "union",
            Operation::Intersection => "intersection",
            Operation::Exclusion => "exclusion",
            Operation::Subtraction => "subtraction",
        }
    }
}

/// Candidate points of one child, tagged with its position.
fn candidates(children: &[Node], ray: &Ray, inverse: &DMat4) -> Vec<(usize, IntersectionPoint)> {
    let mut tagged = Vec::new();
    let mut points = Vec::new();

    for (i, child) in children.iter().enumerate() {
        points.clear();
        child.intersect(ray, inverse, &mut points);
        tagged.extend(points.iter().map(|p| (i, *p)));
    }

    tagged
}

/// How many children other than `skip` contain `point`.
fn containing_others(children: &[Node], skip: usize, point: DVec4) -> usize {
    children
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != skip && other.contains(point, &DMat4::IDENTITY))
        .count()
}

/// Union: every candidate of every child.
///
/// Candidates hidden inside a sibling are kept. The nearest hit is unaffected
/// for opaque solids; see DESIGN.md for the trade-off.
pub fn union_intersect(children: &[Node], ray: &Ray, inverse: &DMat4, out: &mut Vec<IntersectionPoint>) -> bool {
    let mut found = false;
    for child in children {
        found |= child.intersect(ray, inverse, out);
    }
    found
}

pub fn union_contains(children: &[Node], point: DVec4, inverse: &DMat4) -> bool {
    children.iter().any(|child| child.contains(point, inverse))
}

/// Intersection: candidates of child i that every other child contains.
pub fn intersection_intersect(
    children: &[Node],
    ray: &Ray,
    inverse: &DMat4,
    out: &mut Vec<IntersectionPoint>,
) -> bool {
    let others = children.len().saturating_sub(1);
    let before = out.len();

    out.extend(
        candidates(children, ray, inverse)
            .into_iter()
            .filter(|(i, p)| containing_others(children, *i, p.point) == others)
            .map(|(_, p)| p),
    );

    out.len() > before
}

/// An empty intersection contains nothing.
pub fn intersection_contains(children: &[Node], point: DVec4, inverse: &DMat4) -> bool {
    !children.is_empty() && children.iter().all(|child| child.contains(point, inverse))
}

/// Exclusion: candidates of child i contained in at most one other child.
///
/// Exact symmetric difference for two operands. With three or more this is
/// the "at most one other operand" rule, not the parity rule: a boundary
/// between regions covered twice and three times is dropped.
pub fn exclusion_intersect(
    children: &[Node],
    ray: &Ray,
    inverse: &DMat4,
    out: &mut Vec<IntersectionPoint>,
) -> bool {
    let before = out.len();

    for (i, p) in candidates(children, ray, inverse) {
        match containing_others(children, i, p.point) {
            0 => out.push(p),
            // Inside one sibling the solid lies on the other side of this boundary.
            1 => out.push(p.flipped()),
            _ => {}
        }
    }

    out.len() > before
}

/// Contained in exactly one child.
pub fn exclusion_contains(children: &[Node], point: DVec4, inverse: &DMat4) -> bool {
    children
        .iter()
        .filter(|child| child.contains(point, inverse))
        .take(2)
        .count()
        == 1
}

/// Subtraction: the first child minus all the others.
///
/// Boundary of the result: the base's boundary outside every subtrahend, plus
/// each subtrahend's boundary inside the base.
pub fn subtraction_intersect(
    children: &[Node],
    ray: &Ray,
    inverse: &DMat4,
    out: &mut Vec<IntersectionPoint>,
) -> bool {
    let Some(base) = children.first() else {
        return false;
    };
    let before = out.len();

    for (i, p) in candidates(children, ray, inverse) {
        if i == 0 {
            if containing_others(children, 0, p.point) == 0 {
                out.push(p);
            }
        } else if base.contains(p.point, &DMat4::IDENTITY) {
            // A subtrahend's boundary faces into the cavity it carves.
            out.push(p.flipped());
        }
    }

    out.len() > before
}

pub fn subtraction_contains(children: &[Node], point: DVec4, inverse: &DMat4) -> bool {
    match children.split_first() {
        Some((base, rest)) => {
            base.contains(point, inverse) && !rest.iter().any(|child| child.contains(point, inverse))
        }
        None => false,
    }
}
