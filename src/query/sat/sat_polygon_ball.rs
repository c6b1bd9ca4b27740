use crate::math::{Point, Real};
use crate::shape::ConvexPolygon;

/// Computes the separation between a polygon and a point along the edge normals of the polygon.
///
/// Returns the largest signed distance from the point to the supporting line of an edge,
/// and the id of that edge. The point is expressed in the local frame of the polygon and is
/// inside of it if, and only if, the result is negative.
pub fn polygon_ball_compute_separation(poly: &ConvexPolygon, center: &Point<Real>) -> (Real, usize) {
    let mut max_separation = -Real::MAX;
    let mut best_edge = 0;

    for (i, (pt, n)) in poly.points().iter().zip(poly.normals().iter()).enumerate() {
        let separation = n.dot(&(center - pt));

        if separation > max_separation {
            max_separation = separation;
            best_edge = i;
        }
    }

    (max_separation, best_edge)
}
