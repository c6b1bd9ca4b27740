//! Decomposition of simple polygons into convex pieces.

use super::vertex_ring::VertexRing;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::utils::{self, Orientation};
use ordered_float::OrderedFloat;

/// Error raised by [`convex_decomposition`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecompositionError {
    /// An outline needs at least three vertices.
    #[error("an outline needs at least 3 vertices, got {0}.")]
    TooFewPoints(usize),
    /// The outline has a zero area.
    #[error("the outline is degenerate (zero area).")]
    DegenerateOutline,
    /// No diagonal nor edge split could resolve a reflex vertex. This happens with
    /// self-intersecting outlines. Indices past the outline length designate vertices
    /// created by earlier splits.
    #[error("could not find a split for the reflex vertex {0}; is the outline simple?")]
    NoSplitFound(usize),
    /// The decomposition did not converge within its iteration budget.
    #[error("the decomposition exceeded its iteration budget.")]
    IterationLimit,
}

/// Decomposes a simple polygon into convex pieces.
///
/// The outline is a closed loop of vertices without repeating the first one. It may be
/// given in either orientation. Each output piece is a counter-clockwise convex loop
/// without collinear vertices, and the pieces exactly tile the input polygon.
///
/// Reflex vertices are eliminated one at a time. A reflex vertex is connected to the
/// nearest vertex it can see inside of the polygon (vertices that are reflex
/// themselves are preferred, since one diagonal then fixes two of them). If no vertex
/// qualifies, the polygon is cut along the bisector of the reflex angle up to the
/// first edge it hits.
pub fn convex_decomposition(
    outline: &[Point<Real>],
) -> Result<Vec<Vec<Point<Real>>>, DecompositionError> {
    if outline.len() < 3 {
        return Err(DecompositionError::TooFewPoints(outline.len()));
    }

    let aabb = Aabb::from_points(outline);
    let scale = aabb.extents().max();
    let area = utils::signed_area(outline);

    if scale <= 0.0 || area.abs() <= DEFAULT_EPSILON * scale * scale {
        return Err(DecompositionError::DegenerateOutline);
    }

    // Tolerance on cross products, which scale with the squared polygon size.
    let eps = DEFAULT_EPSILON * 100.0 * scale * scale;

    let mut points = outline.to_vec();
    if area < 0.0 {
        points.reverse();
    }

    let input_len = points.len();
    let mut ring = VertexRing::from_loop(&points);
    let mut pending = vec![0u32];
    let mut pieces = vec![];
    let max_iterations = input_len * 8 + 64;
    let mut niter = 0;

    while let Some(start) = pending.pop() {
        niter += 1;
        if niter > max_iterations {
            log::debug!(
                "Convex decomposition of a {}-vertex outline exceeded {} iterations.",
                input_len,
                max_iterations
            );
            return Err(DecompositionError::IterationLimit);
        }

        let nodes: Vec<u32> = ring.walk(start).collect();
        let reflex = nodes.iter().copied().find(|id| is_reflex(&ring, *id, eps));

        let Some(reflex) = reflex else {
            push_convex_piece(&ring, &nodes, eps, &mut pieces);
            continue;
        };

        let other = match find_diagonal(&ring, &nodes, reflex, eps) {
            Some(other) => other,
            None => split_edge_along_bisector(&mut ring, &nodes, reflex, eps)
                .ok_or(DecompositionError::NoSplitFound(reflex as usize))?,
        };

        let second = ring.split(reflex, other);
        pending.push(reflex);
        pending.push(second);
    }

    Ok(pieces)
}

fn corner(ring: &VertexRing, id: u32, eps: Real) -> Orientation {
    utils::orientation(
        ring.point(ring.prev(id)),
        ring.point(id),
        ring.point(ring.next(id)),
        eps,
    )
}

fn is_reflex(ring: &VertexRing, id: u32, eps: Real) -> bool {
    corner(ring, id, eps) == Orientation::Cw
}

fn push_convex_piece(
    ring: &VertexRing,
    nodes: &[u32],
    eps: Real,
    pieces: &mut Vec<Vec<Point<Real>>>,
) {
    let piece: Vec<_> = nodes
        .iter()
        .filter(|id| corner(ring, **id, eps) != Orientation::None)
        .map(|id| *ring.point(*id))
        .collect();

    if piece.len() >= 3 {
        pieces.push(piece);
    } else {
        log::debug!("Dropping a degenerate piece with {} vertices.", piece.len());
    }
}

/// `c` is strictly on the left of the line `a -> b`.
fn left(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, eps: Real) -> bool {
    utils::orientation(a, b, c, eps) == Orientation::Ccw
}

/// `c` is on the left of, or on, the line `a -> b`.
fn left_on(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>, eps: Real) -> bool {
    utils::orientation(a, b, c, eps) != Orientation::Cw
}

/// Is the segment `[id, target]` inside of the interior angle of the polygon at `id`?
fn in_cone(ring: &VertexRing, id: u32, target: &Point<Real>, eps: Real) -> bool {
    let a = ring.point(id);
    let a0 = ring.point(ring.prev(id));
    let a1 = ring.point(ring.next(id));

    if left_on(a0, a, a1, eps) {
        // Convex corner.
        left(a, target, a0, eps) && left(target, a, a1, eps)
    } else {
        // Reflex corner.
        !(left_on(a, target, a1, eps) && left_on(target, a, a0, eps))
    }
}

fn on_segment(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

/// Do the segments `[a, b]` and `[c, d]` intersect, including touching?
fn segments_intersect(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    d: &Point<Real>,
    eps: Real,
) -> bool {
    let o1 = utils::orientation(a, b, c, eps);
    let o2 = utils::orientation(a, b, d, eps);
    let o3 = utils::orientation(c, d, a, eps);
    let o4 = utils::orientation(c, d, b, eps);

    let none = Orientation::None;
    if o1 != o2 && o3 != o4 && o1 != none && o2 != none && o3 != none && o4 != none {
        return true;
    }

    (o1 == Orientation::None && on_segment(a, b, c))
        || (o2 == Orientation::None && on_segment(a, b, d))
        || (o3 == Orientation::None && on_segment(c, d, a))
        || (o4 == Orientation::None && on_segment(c, d, b))
}

/// Is `[i, j]` a diagonal of the loop `nodes` that lies inside of the polygon?
fn is_diagonal(ring: &VertexRing, nodes: &[u32], i: u32, j: u32, eps: Real) -> bool {
    let (pi, pj) = (ring.point(i), ring.point(j));

    if pi == pj || !in_cone(ring, i, pj, eps) || !in_cone(ring, j, pi, eps) {
        return false;
    }

    nodes.iter().all(|k| {
        let k2 = ring.next(*k);
        let (pk, pk2) = (ring.point(*k), ring.point(k2));

        // Edges incident to the diagonal endpoints can only touch it at these endpoints.
        let incident = *k == i || *k == j || k2 == i || k2 == j;
        let touching = pk == pi || pk == pj || pk2 == pi || pk2 == pj;
        incident || touching || !segments_intersect(pi, pj, pk, pk2, eps)
    })
}

fn find_diagonal(ring: &VertexRing, nodes: &[u32], reflex: u32, eps: Real) -> Option<u32> {
    let origin = ring.point(reflex);

    nodes
        .iter()
        .copied()
        .filter(|j| *j != reflex && *j != ring.prev(reflex) && *j != ring.next(reflex))
        .filter(|j| is_diagonal(ring, nodes, reflex, *j, eps))
        // Reflex candidates first, then the nearest one. `min_by_key` keeps the first
        // of equal candidates.
        .min_by_key(|j| {
            (
                !is_reflex(ring, *j, eps),
                OrderedFloat(na::distance_squared(origin, ring.point(*j))),
            )
        })
}

/// Casts a ray from `reflex` along the bisector of its interior angle, inserts a new
/// node where it first hits the loop, and returns that node.
fn split_edge_along_bisector(
    ring: &mut VertexRing,
    nodes: &[u32],
    reflex: u32,
    eps: Real,
) -> Option<u32> {
    let origin = *ring.point(reflex);
    let to_prev = (ring.point(ring.prev(reflex)) - origin).try_normalize(DEFAULT_EPSILON)?;
    let to_next = (ring.point(ring.next(reflex)) - origin).try_normalize(DEFAULT_EPSILON)?;
    // At a reflex corner the interior lies opposite to the two adjacent edges.
    let dir = (-(to_prev + to_next)).try_normalize(DEFAULT_EPSILON)?;

    let mut best: Option<(Real, u32, Real)> = None;

    for k in nodes {
        let k2 = ring.next(*k);
        if *k == reflex || k2 == reflex {
            continue;
        }

        let hit = ray_segment_intersection(&origin, &dir, ring.point(*k), ring.point(k2));
        if let Some((t, u)) = hit {
            if t > eps.sqrt() && best.map(|b| t < b.0).unwrap_or(true) {
                best = Some((t, *k, u));
            }
        }
    }

    let (_, edge, u) = best?;
    let edge_next = ring.next(edge);
    let (a, b) = (*ring.point(edge), *ring.point(edge_next));
    let length = (b - a).norm();

    // Reuse an endpoint rather than creating a sliver next to it.
    if u * length <= eps.sqrt() {
        Some(edge)
    } else if (1.0 - u) * length <= eps.sqrt() {
        Some(edge_next)
    } else {
        Some(ring.insert_after(edge, a + (b - a) * u))
    }
}

/// Intersection of the ray `origin + t * dir` with the segment `[a, b]`, as the ray
/// parameter and the segment barycentric coordinate of `b`.
fn ray_segment_intersection(
    origin: &Point<Real>,
    dir: &Vector<Real>,
    a: &Point<Real>,
    b: &Point<Real>,
) -> Option<(Real, Real)> {
    let ab = b - a;
    let denom = dir.perp(&ab);

    if denom.abs() <= DEFAULT_EPSILON {
        return None;
    }

    let ao = a - origin;
    let t = ao.perp(&ab) / denom;
    let u = ao.perp(dir) / denom;

    if t >= 0.0 && (0.0..=1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}
