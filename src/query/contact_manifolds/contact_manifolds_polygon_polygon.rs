use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::contact_manifolds::ContactBuffer;
use crate::query::gjk::{self, GjkOptions, Simplex};
use crate::query::{sat, Contact, SpaceMapping};
use crate::shape::ConvexPolygon;

/// Cosine of the largest angle between the normal of the closest points of two rounded cores
/// and an edge normal for the edges to be considered facing each other.
const FACE_ALIGNMENT_COS: Real = 0.999;

/// Computes the contacts between two (possibly rounded) convex polygons.
///
/// The reference polygon is the one whose edge of least penetration is the shallowest. The
/// incident edge of the other polygon is clipped against the side planes of the reference
/// edge and every clipped point that penetrates, or touches, the reference edge yields a
/// contact. Up to two contacts are emitted.
///
/// Rounded polygons (capsules) are handled through their core and radius. When the cores do
/// not overlap and no pair of edges faces the direction joining their closest points, the
/// single contact between the closest points is emitted instead.
pub fn contact_manifold_polygon_polygon(
    pos12: &Isometry<Real>,
    poly1: &ConvexPolygon,
    border_radius1: Real,
    poly2: &ConvexPolygon,
    border_radius2: Real,
    gjk_options: &GjkOptions,
    simplex: &mut Simplex,
    out: &mut ContactBuffer,
) {
    let radius_sum = border_radius1 + border_radius2;
    let pos21 = pos12.inverse();

    let (sep1, edge1, vertex2) =
        sat::polygon_polygon_compute_separation_features(poly1, poly2, pos12);
    if sep1 > radius_sum {
        return;
    }

    let (sep2, edge2, vertex1) =
        sat::polygon_polygon_compute_separation_features(poly2, poly1, &pos21);
    if sep2 > radius_sum {
        return;
    }

    if radius_sum > 0.0 {
        // Segment cores only expose their side normals, so disjoint cores may report a
        // non-positive separation along every edge normal.
        let mapping = SpaceMapping::new(&Isometry::identity(), pos12);
        let core_dist = gjk::distance(
            poly1,
            poly2,
            &mapping,
            &pos12.translation.vector,
            gjk_options,
            simplex,
        );

        if core_dist >= radius_sum {
            return;
        }

        if core_dist > 0.0 {
            let Some(dir) =
                UnitVector::try_new(gjk::separation_vector(simplex), DEFAULT_EPSILON)
            else {
                log::debug!("Degenerate separation between polygon cores, no contact.");
                return;
            };

            let faces1 = poly1.normals()[edge1].dot(&dir) >= FACE_ALIGNMENT_COS;
            let faces2 = (pos12 * poly2.normals()[edge2]).dot(&-dir.into_inner())
                >= FACE_ALIGNMENT_COS;

            if !faces1 && !faces2 {
                let (pt1, pt2) = gjk::closest_points(simplex);
                let normal2 = pos12.inverse_transform_unit_vector(&-dir);
                out.push(Contact::new(
                    pt1 + *dir * border_radius1,
                    pos12.inverse_transform_point(&(pt2 - *dir * border_radius2)),
                    dir,
                    normal2,
                    core_dist - radius_sum,
                ));
                return;
            }
        }
    }

    if sep2 > sep1 {
        let start = out.len();
        clip_incident_edge(
            &pos21,
            poly2,
            border_radius2,
            edge2,
            poly1,
            border_radius1,
            vertex1,
            out,
        );

        for contact in &mut out[start..] {
            contact.flip();
        }
    } else {
        clip_incident_edge(
            pos12,
            poly1,
            border_radius1,
            edge1,
            poly2,
            border_radius2,
            vertex2,
            out,
        );
    }
}

/// Clips the incident edge of `inc` against the side planes of the edge `ref_edge` of `reference`.
///
/// `pos_ri` is the pose of `inc` in the local frame of `reference` and `inc_vertex` is the
/// vertex of `inc` deepest along the reference normal. Contacts are expressed with
/// `reference` as the first shape.
fn clip_incident_edge(
    pos_ri: &Isometry<Real>,
    reference: &ConvexPolygon,
    ref_radius: Real,
    ref_edge: usize,
    inc: &ConvexPolygon,
    inc_radius: Real,
    inc_vertex: usize,
    out: &mut ContactBuffer,
) {
    let normal1 = reference.normals()[ref_edge];
    let (a, b) = reference.edge(ref_edge);

    // Of the two edges adjacent to the deepest vertex, pick the most anti-parallel one.
    let num_inc = inc.points().len();
    let prev = (inc_vertex + num_inc - 1) % num_inc;
    let next_dot = (pos_ri * inc.normals()[inc_vertex]).dot(&normal1);
    let prev_dot = (pos_ri * inc.normals()[prev]).dot(&normal1);
    let inc_edge = if prev_dot < next_dot { prev } else { inc_vertex };

    let (c, d) = inc.edge(inc_edge);
    let (c, d) = (pos_ri * c, pos_ri * d);

    let Some(tangent) = UnitVector::try_new(b - a, DEFAULT_EPSILON) else {
        log::debug!("Degenerate reference edge, no contact.");
        return;
    };

    let Some((c, d)) = clip_segment(c, d, &tangent, tangent.dot(&a.coords)) else {
        return;
    };
    let Some((c, d)) = clip_segment(c, d, &-tangent.into_inner(), -tangent.dot(&b.coords)) else {
        return;
    };

    let normal2 = pos_ri.inverse_transform_unit_vector(&-normal1);
    let radius_sum = ref_radius + inc_radius;

    for pt in [c, d] {
        let core_dist = normal1.dot(&(pt - a));

        if core_dist <= radius_sum {
            let point1 = pt - *normal1 * (core_dist - ref_radius);
            let point2 = pos_ri.inverse_transform_point(&(pt - *normal1 * inc_radius));
            out.push(Contact::new(
                point1,
                point2,
                normal1,
                normal2,
                core_dist - radius_sum,
            ));
        }
    }
}

/// Keeps the part of the segment `[c, d]` lying on the half-plane `axis.dot(x) >= offset`.
fn clip_segment(
    c: Point<Real>,
    d: Point<Real>,
    axis: &Vector<Real>,
    offset: Real,
) -> Option<(Point<Real>, Point<Real>)> {
    let dc = axis.dot(&c.coords) - offset;
    let dd = axis.dot(&d.coords) - offset;

    match (dc < 0.0, dd < 0.0) {
        (true, true) => None,
        (false, false) => Some((c, d)),
        (true, false) => Some((c + (d - c) * (dc / (dc - dd)), d)),
        (false, true) => Some((c, d + (c - d) * (dd / (dd - dc)))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn generate(pos12: &Isometry<Real>, p1: &ConvexPolygon, p2: &ConvexPolygon) -> ContactBuffer {
        let mut out = ContactBuffer::new();
        contact_manifold_polygon_polygon(
            pos12,
            p1,
            0.0,
            p2,
            0.0,
            &GjkOptions::default(),
            &mut Simplex::new(),
            &mut out,
        );
        out
    }

    #[test]
    fn touching_unit_boxes_have_two_contacts() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        let out = generate(&Isometry::translation(1.0, 0.0), &b, &b);

        assert_eq!(out.len(), 2);
        for c in &out {
            assert_relative_eq!(c.dist, 0.0, epsilon = 1.0e-6);
            assert_relative_eq!(c.normal1.into_inner(), Vector::x(), epsilon = 1.0e-6);
        }
    }

    #[test]
    fn separated_boxes_have_no_contact() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        assert!(generate(&Isometry::translation(1.01, 0.0), &b, &b).is_empty());
    }

    #[test]
    fn box_corner_on_a_face() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        let tilted = Isometry::new(Vector::new(0.0, 1.1), core::f32::consts::FRAC_PI_4 as Real);
        let out = generate(&tilted, &b, &b);

        assert_eq!(out.len(), 1);
        let depth = 0.5 * (2.0 as Real).sqrt() + 0.5 - 1.1;
        assert_relative_eq!(out[0].depth(), depth, epsilon = 1.0e-5);
        assert_relative_eq!(out[0].normal1.into_inner(), Vector::y(), epsilon = 1.0e-5);
    }

    #[test]
    fn parallel_capsules() {
        let core = ConvexPolygon::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let mut out = ContactBuffer::new();
        contact_manifold_polygon_polygon(
            &Isometry::translation(0.5, 0.3),
            &core,
            0.2,
            &core,
            0.2,
            &GjkOptions::default(),
            &mut Simplex::new(),
            &mut out,
        );

        assert_eq!(out.len(), 2);
        for c in &out {
            assert_relative_eq!(c.dist, -0.1, epsilon = 1.0e-5);
        }
    }

    #[test]
    fn collinear_capsules_end_to_end() {
        let core = ConvexPolygon::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));

        for y in [0.0, 1.0e-3] {
            let mut out = ContactBuffer::new();
            contact_manifold_polygon_polygon(
                &Isometry::translation(2.3, y),
                &core,
                0.2,
                &core,
                0.2,
                &GjkOptions::default(),
                &mut Simplex::new(),
                &mut out,
            );

            assert_eq!(out.len(), 1);
            assert_relative_eq!(out[0].depth(), 0.1, epsilon = 1.0e-4);
            assert_relative_eq!(out[0].normal1.into_inner(), Vector::x(), epsilon = 1.0e-2);
            assert_relative_eq!(out[0].point1, Point::new(1.2, 0.0), epsilon = 1.0e-2);
            assert_relative_eq!(out[0].point2, Point::new(-1.2, 0.0), epsilon = 1.0e-2);
        }
    }

    #[test]
    fn capsule_ends_meeting_diagonally() {
        let core = ConvexPolygon::segment(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let mut out = ContactBuffer::new();
        contact_manifold_polygon_polygon(
            &Isometry::translation(2.25, 0.25),
            &core,
            0.2,
            &core,
            0.2,
            &GjkOptions::default(),
            &mut Simplex::new(),
            &mut out,
        );

        assert_eq!(out.len(), 1);
        let expected = (0.25 as Real) * (2.0 as Real).sqrt() - 0.4;
        assert_relative_eq!(out[0].dist, expected, epsilon = 1.0e-4);
    }
}
