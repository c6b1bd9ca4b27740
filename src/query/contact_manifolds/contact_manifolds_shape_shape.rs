use crate::math::{Isometry, Real};
use crate::query::contact_manifolds::{
    contact_manifold_ball_ball, contact_manifold_ball_polygon, contact_manifold_polygon_ball,
    contact_manifold_polygon_polygon, contact_manifold_support_map_support_map, ContactBuffer,
};
use crate::query::epa::Epa;
use crate::query::gjk::{GjkOptions, Simplex};
use crate::query::SpaceMapping;
use crate::shape::{Ball, ColliderShape, ConvexPolygon, MeshShape, Shape};

/// A convex shape, as seen by the contact generators.
#[derive(Copy, Clone)]
enum ConvexRef<'a> {
    Ball(&'a Ball),
    Polygon(&'a ConvexPolygon, Real),
    SupportMap(&'a dyn Shape),
}

impl<'a> ConvexRef<'a> {
    fn from_shape(shape: &'a ColliderShape) -> Option<Self> {
        match shape {
            ColliderShape::Ball(b) => Some(ConvexRef::Ball(b)),
            ColliderShape::ConvexPolygon(p) => Some(ConvexRef::Polygon(p, 0.0)),
            ColliderShape::Capsule(c) => Some(ConvexRef::Polygon(c.core(), c.radius)),
            ColliderShape::Ellipse(e) => Some(ConvexRef::SupportMap(e)),
            ColliderShape::Mesh(_) => None,
        }
    }

    fn as_shape(&self) -> &'a dyn Shape {
        match *self {
            ConvexRef::Ball(b) => b,
            ConvexRef::Polygon(p, _) => p,
            ConvexRef::SupportMap(s) => s,
        }
    }
}

/// Scratch space reused by the contact generators of one query.
struct Workspace<'a> {
    gjk_options: &'a GjkOptions,
    simplex: &'a mut Simplex,
    epa: &'a mut Epa,
}

/// Computes every contact between two collider shapes.
///
/// Contacts are appended to `out`, in the local frames of the shapes. Contacts involving a
/// [`MeshShape`] carry the index of the convex piece involved in `subshape1` or `subshape2`.
/// Only the pieces whose oriented box overlaps the bounding box of the other shape are
/// tested.
///
/// Capsules go through the polygon generators with their rounding radius; any pair involving
/// an ellipse goes through GJK and EPA.
pub fn contacts_shape_shape(
    mapping: &SpaceMapping,
    shape1: &ColliderShape,
    shape2: &ColliderShape,
    gjk_options: &GjkOptions,
    simplex: &mut Simplex,
    epa: &mut Epa,
    out: &mut ContactBuffer,
) {
    let mut ws = Workspace {
        gjk_options,
        simplex,
        epa,
    };
    let pos12 = mapping.pos12();

    match (
        ConvexRef::from_shape(shape1),
        ConvexRef::from_shape(shape2),
        shape1.as_mesh(),
        shape2.as_mesh(),
    ) {
        (Some(c1), Some(c2), _, _) => contacts_convex_convex(pos12, c1, c2, &mut ws, out),
        (None, Some(c2), Some(mesh1), _) => {
            contacts_mesh_convex(pos12, mesh1, c2, &mut ws, out)
        }
        (Some(c1), None, _, Some(mesh2)) => {
            let start = out.len();
            contacts_mesh_convex(mapping.pos21(), mesh2, c1, &mut ws, out);
            for contact in &mut out[start..] {
                contact.flip();
            }
        }
        (None, None, Some(mesh1), Some(mesh2)) => {
            contacts_mesh_mesh(pos12, mesh1, mesh2, &mut ws, out)
        }
        _ => {}
    }
}

fn contacts_convex_convex(
    pos12: &Isometry<Real>,
    shape1: ConvexRef,
    shape2: ConvexRef,
    ws: &mut Workspace,
    out: &mut ContactBuffer,
) {
    match (shape1, shape2) {
        (ConvexRef::Ball(b1), ConvexRef::Ball(b2)) => {
            contact_manifold_ball_ball(pos12, b1, b2, out)
        }
        (ConvexRef::Polygon(p1, r1), ConvexRef::Ball(b2)) => {
            contact_manifold_polygon_ball(pos12, p1, r1, b2, out)
        }
        (ConvexRef::Ball(b1), ConvexRef::Polygon(p2, r2)) => {
            contact_manifold_ball_polygon(pos12, b1, p2, r2, out)
        }
        (ConvexRef::Polygon(p1, r1), ConvexRef::Polygon(p2, r2)) => {
            contact_manifold_polygon_polygon(
                pos12,
                p1,
                r1,
                p2,
                r2,
                ws.gjk_options,
                ws.simplex,
                out,
            )
        }
        _ => contact_manifold_support_map_support_map(
            pos12,
            shape1.as_shape(),
            shape2.as_shape(),
            ws.gjk_options,
            ws.simplex,
            ws.epa,
            out,
        ),
    }
}

/// Contacts between the pieces of `mesh1` and the convex `shape2`.
fn contacts_mesh_convex(
    pos12: &Isometry<Real>,
    mesh1: &MeshShape,
    shape2: ConvexRef,
    ws: &mut Workspace,
    out: &mut ContactBuffer,
) {
    let aabb2_1 = shape2.as_shape().compute_aabb(pos12);

    mesh1.tree().visit_leaves_intersecting(&aabb2_1, |piece| {
        let start = out.len();
        let piece1 = ConvexRef::Polygon(mesh1.piece(piece), 0.0);
        contacts_convex_convex(pos12, piece1, shape2, ws, out);

        for contact in &mut out[start..] {
            contact.subshape1 = piece;
        }
    });
}

fn contacts_mesh_mesh(
    pos12: &Isometry<Real>,
    mesh1: &MeshShape,
    mesh2: &MeshShape,
    ws: &mut Workspace,
    out: &mut ContactBuffer,
) {
    let pos21 = pos12.inverse();
    let aabb2_1 = mesh2.compute_aabb(pos12);

    mesh1.tree().visit_leaves_intersecting(&aabb2_1, |piece1| {
        let poly1 = mesh1.piece(piece1);
        let aabb1_2 = poly1.compute_aabb(&pos21);

        mesh2.tree().visit_leaves_intersecting(&aabb1_2, |piece2| {
            let start = out.len();
            contacts_convex_convex(
                pos12,
                ConvexRef::Polygon(poly1, 0.0),
                ConvexRef::Polygon(mesh2.piece(piece2), 0.0),
                ws,
                out,
            );

            for contact in &mut out[start..] {
                contact.subshape1 = piece1;
                contact.subshape2 = piece2;
            }
        });
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Point, Vector};

    fn contacts(
        pos1: &Isometry<Real>,
        shape1: &ColliderShape,
        pos2: &Isometry<Real>,
        shape2: &ColliderShape,
    ) -> ContactBuffer {
        let mut out = ContactBuffer::new();
        contacts_shape_shape(
            &SpaceMapping::new(pos1, pos2),
            shape1,
            shape2,
            &GjkOptions::default(),
            &mut Simplex::new(),
            &mut Epa::new(),
            &mut out,
        );
        out
    }

    #[test]
    fn mesh_contacts_carry_piece_ids() {
        let mesh = MeshShape::new(&[
            [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 1.0)],
            [Point::new(0.0, 0.0), Point::new(4.0, 1.0), Point::new(0.0, 1.0)],
            [Point::new(10.0, 0.0), Point::new(11.0, 0.0), Point::new(10.0, 1.0)],
        ])
        .unwrap();
        let mesh = ColliderShape::Mesh(mesh);
        let ball = ColliderShape::ball(0.5);
        let ball_pos = Isometry::translation(10.2, 1.3);

        let out = contacts(&Isometry::identity(), &mesh, &ball_pos, &ball);
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.subshape1 == 2 && c.subshape2 == 0));

        let out = contacts(&ball_pos, &ball, &Isometry::identity(), &mesh);
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.subshape1 == 0 && c.subshape2 == 2));
    }

    #[test]
    fn capsule_resting_on_a_box() {
        let ground = ColliderShape::cuboid(5.0, 0.5);
        let capsule = ColliderShape::capsule_x(1.0, 0.25);
        let out = contacts(
            &Isometry::identity(),
            &ground,
            &Isometry::translation(0.0, 0.7),
            &capsule,
        );

        assert_eq!(out.len(), 2);
        for c in &out {
            assert_relative_eq!(c.depth(), 0.05, epsilon = 1.0e-5);
            assert_relative_eq!(c.normal1.into_inner(), Vector::y(), epsilon = 1.0e-5);
        }
    }
}
