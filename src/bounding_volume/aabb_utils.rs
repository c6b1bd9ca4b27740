use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, Vector, DIM};
use crate::shape::SupportMap;

/// Computes the AABB of a support-mapped shape transformed by `m`.
pub fn support_map_aabb<G>(m: &Isometry<Real>, i: &G) -> Aabb
where
    G: SupportMap + ?Sized,
{
    let mut min = Vector::zeros();
    let mut max = Vector::zeros();
    let mut basis = Vector::zeros();

    for d in 0..DIM {
        basis[d] = 1.0;
        max[d] = i.support_point(m, &basis)[d];

        basis[d] = -1.0;
        min[d] = i.support_point(m, &basis)[d];

        basis[d] = 0.0;
    }

    Aabb::new(Point::from(min), Point::from(max))
}

/// Computes the AABB of a set of points transformed by `m`.
///
/// An empty set yields an invalid AABB.
pub fn point_cloud_aabb<'a, I>(m: &Isometry<Real>, pts: I) -> Aabb
where
    I: IntoIterator<Item = &'a Point<Real>>,
{
    let mut result = Aabb::new_invalid();

    for pt in pts {
        result.take_point(m * pt);
    }

    result
}

/// Computes the AABB of a set of points.
pub fn local_point_cloud_aabb<'a, I>(pts: I) -> Aabb
where
    I: IntoIterator<Item = &'a Point<Real>>,
{
    Aabb::from_points(pts)
}
