use crate::math::{Isometry, Real};
use crate::shape::ConvexPolygon;

/// Computes the separation of two polygons along the edge normals of `poly1`.
///
/// For each edge of `poly1`, the vertex of `poly2` deepest along the opposite of the edge
/// normal is projected on that normal. Returns the largest of these projections together
/// with the id of the corresponding edge of `poly1` and the id of the vertex of `poly2`.
/// `pos12` is the pose of `poly2` in the local frame of `poly1`.
///
/// A positive result means the polygons are separated along that edge normal.
pub fn polygon_polygon_compute_separation_features(
    poly1: &ConvexPolygon,
    poly2: &ConvexPolygon,
    pos12: &Isometry<Real>,
) -> (Real, usize, usize) {
    let mut max_separation = -Real::MAX;
    let mut separation_features = (0, 0);

    for (i, (pt1, n1)) in poly1.points().iter().zip(poly1.normals().iter()).enumerate() {
        let j = poly2.support_point_id(&pos12.inverse_transform_vector(&-n1.into_inner()));
        let dpt = pos12 * poly2.points()[j] - pt1;
        let separation = dpt.dot(n1);

        if separation > max_separation {
            max_separation = separation;
            separation_features = (i, j);
        }
    }

    (max_separation, separation_features.0, separation_features.1)
}

#[cfg(test)]
mod test {
    use super::polygon_polygon_compute_separation_features;
    use crate::math::{Isometry, Vector};
    use crate::shape::ConvexPolygon;

    #[test]
    fn touching_boxes_have_zero_separation() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        let (sep, edge, _) =
            polygon_polygon_compute_separation_features(&b, &b, &Isometry::translation(1.0, 0.0));
        assert_relative_eq!(sep, 0.0, epsilon = 1.0e-6);
        assert_relative_eq!(b.normals()[edge].into_inner(), Vector::x(), epsilon = 1.0e-6);
    }
}
