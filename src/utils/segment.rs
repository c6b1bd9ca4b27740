use crate::math::{Point, Real};

/// Where the projection of a point on a segment lies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentProjection {
    /// The projection is the first endpoint.
    OnA,
    /// The projection is the second endpoint.
    OnB,
    /// The projection lies strictly inside of the segment, with the given barycentric
    /// coordinates wrt. the first and second endpoints.
    OnEdge([Real; 2]),
}

/// Projects `pt` on the segment `[a, b]`.
///
/// A degenerate segment projects everything on `a`.
pub fn project_point_on_segment(
    a: &Point<Real>,
    b: &Point<Real>,
    pt: &Point<Real>,
) -> (Point<Real>, SegmentProjection) {
    let ab = b - a;
    let ap = pt - a;
    let ab_ap = ab.dot(&ap);
    let sqnab = ab.norm_squared();

    if ab_ap <= 0.0 || sqnab == 0.0 {
        (*a, SegmentProjection::OnA)
    } else if ab_ap >= sqnab {
        (*b, SegmentProjection::OnB)
    } else {
        let u = ab_ap / sqnab;
        (a + ab * u, SegmentProjection::OnEdge([1.0 - u, u]))
    }
}
