use crate::math::{Isometry, Point, Real, UnitVector, DEFAULT_EPSILON};
use crate::query::contact_manifolds::ContactBuffer;
use crate::query::{sat, Contact};
use crate::shape::{Ball, ConvexPolygon};
use crate::utils;

/// Computes the contact between a (possibly rounded) convex polygon and a ball.
///
/// `border_radius1` is the rounding radius of the polygon, zero for sharp polygons. The
/// edge of least penetration is found first; the ball center is then projected on that
/// edge and one contact is emitted if it is closer than the sum of the radii. Segment cores
/// are always handled through that projection.
pub fn contact_manifold_polygon_ball(
    pos12: &Isometry<Real>,
    poly1: &ConvexPolygon,
    border_radius1: Real,
    ball2: &Ball,
    out: &mut ContactBuffer,
) {
    let center2_1 = Point::from(pos12.translation.vector);
    let radius_sum = border_radius1 + ball2.radius;
    let (separation, edge) = sat::polygon_ball_compute_separation(poly1, &center2_1);

    if separation > radius_sum {
        return;
    }

    let (a, b) = poly1.edge(edge);

    // A two-vertex core has no interior: a center on its line may still lie past an end.
    let is_segment = poly1.points().len() == 2;

    let (normal1, dist) = if separation <= 0.0 && !is_segment {
        // The center is inside of the polygon: push it out through the closest edge.
        (poly1.normals()[edge], separation)
    } else {
        let (proj, _) = utils::project_point_on_segment(&a, &b, &center2_1);
        match UnitVector::try_new_and_get(center2_1 - proj, DEFAULT_EPSILON) {
            Some((n, dist)) => (n, dist),
            None => (poly1.normals()[edge], 0.0),
        }
    };

    if dist >= radius_sum {
        return;
    }

    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);
    let point1 = center2_1 - *normal1 * (dist - border_radius1);
    let point2 = Point::from(*normal2 * ball2.radius);

    out.push(Contact::new(
        point1,
        point2,
        normal1,
        normal2,
        dist - radius_sum,
    ));
}

/// Computes the contact between a ball and a (possibly rounded) convex polygon.
pub fn contact_manifold_ball_polygon(
    pos12: &Isometry<Real>,
    ball1: &Ball,
    poly2: &ConvexPolygon,
    border_radius2: Real,
    out: &mut ContactBuffer,
) {
    let start = out.len();
    contact_manifold_polygon_ball(&pos12.inverse(), poly2, border_radius2, ball1, out);

    for contact in &mut out[start..] {
        contact.flip();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vector;

    #[test]
    fn ball_against_box_face_and_corner() {
        let poly = ConvexPolygon::cuboid(Vector::new(1.0, 1.0));
        let ball = Ball::new(0.5);
        let mut out = ContactBuffer::new();

        contact_manifold_polygon_ball(&Isometry::translation(1.25, 0.0), &poly, 0.0, &ball, &mut out);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].dist, -0.25, epsilon = 1.0e-5);
        assert_relative_eq!(out[0].point1, Point::new(1.0, 0.0), epsilon = 1.0e-5);

        out.clear();
        contact_manifold_polygon_ball(&Isometry::translation(1.3, 1.3), &poly, 0.0, &ball, &mut out);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].point1, Point::new(1.0, 1.0), epsilon = 1.0e-5);

        out.clear();
        contact_manifold_polygon_ball(&Isometry::translation(1.4, 1.4), &poly, 0.0, &ball, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn ball_center_inside_of_polygon() {
        let poly = ConvexPolygon::cuboid(Vector::new(1.0, 1.0));
        let ball = Ball::new(0.5);
        let mut out = ContactBuffer::new();

        contact_manifold_polygon_ball(&Isometry::translation(0.0, 0.75), &poly, 0.0, &ball, &mut out);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].normal1.into_inner(), Vector::y(), epsilon = 1.0e-5);
        assert_relative_eq!(out[0].dist, -0.75, epsilon = 1.0e-5);
    }

    #[test]
    fn ball_against_capsule_end() {
        let core = ConvexPolygon::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let ball = Ball::new(0.5);

        for y in [0.0, 1.0e-3] {
            let mut out = ContactBuffer::new();
            contact_manifold_polygon_ball(&Isometry::translation(1.5, y), &core, 0.2, &ball, &mut out);

            assert_eq!(out.len(), 1);
            assert_relative_eq!(out[0].depth(), 0.2, epsilon = 1.0e-4);
            assert_relative_eq!(out[0].normal1.into_inner(), Vector::x(), epsilon = 1.0e-2);
            assert_relative_eq!(out[0].point1, Point::new(1.2, 0.0), epsilon = 1.0e-2);
        }
    }

    #[test]
    fn ball_centered_on_capsule_core() {
        let core = ConvexPolygon::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let mut out = ContactBuffer::new();
        contact_manifold_polygon_ball(&Isometry::translation(0.3, 0.0), &core, 0.2, &Ball::new(0.5), &mut out);

        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].depth(), 0.7, epsilon = 1.0e-5);
    }

    #[test]
    fn flipped_roles() {
        let poly = ConvexPolygon::cuboid(Vector::new(1.0, 1.0));
        let ball = Ball::new(0.5);
        let mut out = ContactBuffer::new();

        contact_manifold_ball_polygon(&Isometry::translation(1.25, 0.0), &ball, &poly, 0.0, &mut out);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].normal1.into_inner(), Vector::x(), epsilon = 1.0e-5);
        assert_relative_eq!(out[0].point2, Point::new(-1.0, 0.0), epsilon = 1.0e-5);
    }
}
