use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::SupportMap;
use core::ops::Sub;

/// A point of the Minkowski difference of two shapes, also called the Configuration-Space
/// Obstacle (CSO).
///
/// Keeps track of the two support points it was computed from so that witness points on
/// each shape can be recovered from barycentric weights.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CsoPoint {
    /// The point on the CSO, equal to `self.orig1 - self.orig2`.
    pub point: Point<Real>,
    /// The support point of the first shape.
    pub orig1: Point<Real>,
    /// The support point of the second shape, in the local frame of the first shape.
    pub orig2: Point<Real>,
}

impl CsoPoint {
    /// Initializes a CSO point with `orig1 - orig2`.
    pub fn new(orig1: Point<Real>, orig2: Point<Real>) -> Self {
        CsoPoint {
            point: Point::from(orig1 - orig2),
            orig1,
            orig2,
        }
    }

    /// CSO point where both shape points are the origin.
    pub fn origin() -> Self {
        CsoPoint::new(Point::origin(), Point::origin())
    }

    /// Computes the support point of the CSO of `g1` and `g2` toward the direction `dir`.
    ///
    /// `pos12` is the pose of `g2` in the local frame of `g1`, and `dir` is expressed in the
    /// local frame of `g1` too.
    pub fn from_shapes<G1: ?Sized, G2: ?Sized>(
        pos12: &Isometry<Real>,
        g1: &G1,
        g2: &G2,
        dir: &Vector<Real>,
    ) -> Self
    where
        G1: SupportMap,
        G2: SupportMap,
    {
        let sp1 = g1.local_support_point(dir);
        let sp2 = g2.support_point(pos12, &-*dir);

        CsoPoint::new(sp1, sp2)
    }
}

impl Sub<CsoPoint> for CsoPoint {
    type Output = Vector<Real>;

    #[inline]
    fn sub(self, rhs: CsoPoint) -> Vector<Real> {
        self.point - rhs.point
    }
}
