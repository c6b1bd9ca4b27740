//! Two-dimensional penetration depth queries using the Expanding Polytope Algorithm.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, CsoPoint, Simplex};
use crate::shape::SupportMap;
use crate::utils;

const MAX_ITERATIONS: usize = 100;

/// An edge of the expanding polygon waiting to be expanded, closest to the origin first.
#[derive(Copy, Clone, PartialEq)]
struct QueuedEdge {
    edge: usize,
    dist: Real,
}

impl Eq for QueuedEdge {}

impl PartialOrd for QueuedEdge {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEdge {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: `BinaryHeap` is a max-heap.
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
    }
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    vertices: [usize; 2],
    normal: UnitVector<Real>,
    /// Signed distance from the origin to the line supporting this edge.
    dist: Real,
    /// Barycentric coordinates of the projection of the origin on this edge.
    bcoords: [Real; 2],
    origin_projects_inside: bool,
    degenerate: bool,
}

impl Edge {
    fn new(vertices: &[CsoPoint], ids: [usize; 2]) -> Self {
        let a = vertices[ids[0]].point;
        let b = vertices[ids[1]].point;
        let (normal, degenerate) = match utils::ccw_face_normal([&a, &b]) {
            Some(n) => (n, false),
            None => (Vector::x_axis(), true),
        };
        let (bcoords, origin_projects_inside) = match project_origin_on_edge(&a, &b) {
            Some(bcoords) => (bcoords, true),
            None => ([1.0, 0.0], false),
        };

        Edge {
            vertices: ids,
            normal,
            dist: normal.dot(&a.coords),
            bcoords,
            origin_projects_inside,
            degenerate,
        }
    }

    /// The points of each shape matching the projection of the origin on this edge.
    fn witness_points(
        &self,
        vertices: &[CsoPoint],
    ) -> (Point<Real>, Point<Real>, UnitVector<Real>) {
        let [a, b] = self.vertices.map(|i| vertices[i]);
        let [wa, wb] = self.bcoords;

        (
            Point::from(a.orig1.coords * wa + b.orig1.coords * wb),
            Point::from(a.orig2.coords * wa + b.orig2.coords * wb),
            self.normal,
        )
    }
}

/// The Expanding Polytope Algorithm in 2D.
///
/// Computes the penetration depth and direction of two overlapping convex shapes, starting
/// from the simplex left by a GJK query that detected the overlap. The buffers are kept
/// between calls so that an `Epa` owned by a contact generator does not reallocate.
#[derive(Default)]
pub struct Epa {
    vertices: Vec<CsoPoint>,
    edges: Vec<Edge>,
    queue: BinaryHeap<QueuedEdge>,
}

impl Epa {
    /// Creates a new instance of the 2D Expanding Polytope Algorithm.
    pub fn new() -> Self {
        Epa::default()
    }

    /// Records `edge`, and queues it for expansion if `queued` is set.
    ///
    /// Fails if the edge lies on the far side of the origin, meaning that the polygon does
    /// not enclose it.
    fn push_edge(&mut self, edge: Edge, queued: bool) -> Option<()> {
        if queued {
            if edge.dist < -gjk::eps_tol() {
                return None;
            }

            self.queue.push(QueuedEdge {
                edge: self.edges.len(),
                dist: edge.dist,
            });
        }

        self.edges.push(edge);
        Some(())
    }

    /// Computes the closest points between two penetrating shapes and their penetration direction.
    ///
    /// `pos12` is the pose of `g2` in the local frame of `g1`. Returns the deepest point of
    /// each shape, both in the local frame of `g1`, together with the normal of `g1` at the
    /// contact: translating `g2` along this normal by the penetration depth separates the shapes.
    ///
    /// Returns `None` if the simplex does not enclose the origin.
    pub fn closest_points<G1, G2>(
        &mut self,
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        simplex: &Simplex,
    ) -> Option<(Point<Real>, Point<Real>, UnitVector<Real>)>
    where
        G1: ?Sized + SupportMap,
        G2: ?Sized + SupportMap,
    {
        let tolerance = DEFAULT_EPSILON * 100.0;

        self.vertices.clear();
        self.edges.clear();
        self.queue.clear();

        if simplex.is_empty() {
            return None;
        }

        self.vertices.extend_from_slice(simplex.points());

        match simplex.dimension() {
            0 => {
                let vertex = self.vertices[0];
                let n = vertex_contact_normal(pos12, g1, g2, &vertex, tolerance);
                return Some((vertex.orig1, vertex.orig2, n));
            }
            1 => {
                // The origin lies on the segment: expand it toward both of its sides.
                self.push_edge(Edge::new(&self.vertices, [0, 1]), true)?;
                self.push_edge(Edge::new(&self.vertices, [1, 0]), true)?;
            }
            _ => {
                let ab = self.vertices[1] - self.vertices[0];
                let ac = self.vertices[2] - self.vertices[0];

                if ab.perp(&ac) < 0.0 {
                    self.vertices.swap(1, 2)
                }

                for ids in [[0, 1], [1, 2], [2, 0]] {
                    let edge = Edge::new(&self.vertices, ids);
                    self.push_edge(edge, edge.origin_projects_inside)?;
                }

                if self.queue.is_empty() {
                    log::debug!("EPA: failed to project the origin on the initial simplex.");
                    return None;
                }
            }
        }

        let mut best = self.queue.peek()?.edge;
        let mut upper_bound = Real::MAX;

        for niter in 0.. {
            let Some(entry) = self.queue.pop() else {
                break;
            };
            let edge = self.edges[entry.edge];

            if edge.degenerate {
                continue;
            }

            let support = CsoPoint::from_shapes(pos12, g1, g2, &edge.normal);
            let support_id = self.vertices.len();
            self.vertices.push(support);

            let support_dist = support.point.coords.dot(&edge.normal);
            if support_dist < upper_bound {
                upper_bound = support_dist;
                best = entry.edge;
            }

            if upper_bound - entry.dist < tolerance {
                return Some(self.edges[best].witness_points(&self.vertices));
            }

            for ids in [
                [edge.vertices[0], support_id],
                [support_id, edge.vertices[1]],
            ] {
                let new_edge = Edge::new(&self.vertices, ids);

                if new_edge.origin_projects_inside && new_edge.dist < entry.dist {
                    // Rounding errors made the polygon shrink.
                    return Some(new_edge.witness_points(&self.vertices));
                }

                self.push_edge(
                    new_edge,
                    new_edge.origin_projects_inside && !new_edge.degenerate,
                )?;
            }

            if niter >= MAX_ITERATIONS {
                log::debug!(
                    "EPA did not converge after {} iterations, returning the current estimate.",
                    MAX_ITERATIONS
                );
                break;
            }
        }

        Some(self.edges[best].witness_points(&self.vertices))
    }
}

/// Finds a contact normal for two shapes touching at a single CSO vertex.
///
/// The normal is rotated until it lies in the normal cone of `g1` at `vertex.orig1`,
/// then until its opposite lies in the normal cone of `g2` at `vertex.orig2`.
fn vertex_contact_normal<G1, G2>(
    pos12: &Isometry<Real>,
    g1: &G1,
    g2: &G2,
    vertex: &CsoPoint,
    tolerance: Real,
) -> UnitVector<Real>
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let perp = |t: UnitVector<Real>| UnitVector::new_unchecked(Vector::new(-t.y, t.x));
    let mut n = Vector::y_axis();

    for _ in 0..MAX_ITERATIONS {
        let supp1 = g1.local_support_point(&n);
        match UnitVector::try_new(supp1 - vertex.orig1, tolerance) {
            Some(t) if n.dot(&t) >= tolerance => n = perp(t),
            _ => break,
        }
    }

    for _ in 0..MAX_ITERATIONS {
        let supp2 = g2.support_point(pos12, &-n.into_inner());
        match UnitVector::try_new(supp2 - vertex.orig2, tolerance) {
            Some(t) if n.dot(&t) <= -tolerance => n = perp(t),
            _ => break,
        }
    }

    n
}

/// Barycentric coordinates of the projection of the origin on the segment `[a, b]`, if it
/// falls inside of the segment.
fn project_origin_on_edge(a: &Point<Real>, b: &Point<Real>) -> Option<[Real; 2]> {
    let ab = b - a;
    let sqnab = ab.norm_squared();

    if sqnab == 0.0 {
        return None;
    }

    let eps = gjk::eps_tol();
    let t = -a.coords.dot(&ab);

    if t < -eps || t > sqnab + eps {
        None
    } else {
        let u = t / sqnab;
        Some([1.0 - u, u])
    }
}

#[cfg(test)]
mod test {
    use super::Epa;
    use crate::math::{Isometry, Vector};
    use crate::query::gjk::{self, GjkOptions, Simplex};
    use crate::query::SpaceMapping;
    use crate::shape::{Ball, ConvexPolygon};

    #[test]
    fn penetrating_boxes() {
        let b = ConvexPolygon::cuboid(Vector::new(1.0, 1.0));
        let mapping = SpaceMapping::new(&Isometry::identity(), &Isometry::translation(1.5, 0.2));
        let mut simplex = Simplex::new();
        let dist = gjk::distance(
            &b,
            &b,
            &mapping,
            &Vector::zeros(),
            &GjkOptions::default(),
            &mut simplex,
        );
        assert_eq!(dist, 0.0);

        let (p1, p2, n) = Epa::new()
            .closest_points(mapping.pos12(), &b, &b, &simplex)
            .unwrap();
        assert_relative_eq!(n.into_inner(), Vector::x(), epsilon = 1.0e-4);
        assert_relative_eq!((p1 - p2).dot(&n), 0.5, epsilon = 1.0e-4);
    }

    #[test]
    fn penetrating_balls() {
        let ball = Ball::new(1.0);
        let mapping = SpaceMapping::new(&Isometry::identity(), &Isometry::translation(0.0, 1.0));
        let mut simplex = Simplex::new();
        let opts = GjkOptions::default();
        let dist = gjk::distance(&ball, &ball, &mapping, &Vector::zeros(), &opts, &mut simplex);
        assert_eq!(dist, 0.0);

        let (p1, p2, n) = Epa::new()
            .closest_points(mapping.pos12(), &ball, &ball, &simplex)
            .unwrap();
        assert_relative_eq!(n.into_inner(), Vector::y(), epsilon = 1.0e-2);
        assert_relative_eq!((p1 - p2).dot(&n), 1.0, epsilon = 1.0e-2);
    }
}
