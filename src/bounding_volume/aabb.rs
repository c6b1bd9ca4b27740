//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Isometry, Point, Real, Vector, DIM};
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corners, with `mins <= maxs` component-wise
/// for any valid box. Its edges are always parallel to the coordinate axes, which
/// makes overlap tests a handful of comparisons.
///
/// # Example
///
/// ```
/// use impact2d::bounding_volume::{Aabb, BoundingVolume};
/// use impact2d::math::Point;
///
/// let a = Aabb::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));
/// let b = Aabb::new(Point::new(0.5, 0.5), Point::new(2.0, 2.0));
/// assert!(a.intersects(&b));
/// assert_eq!(a.merged(&b).maxs, Point::new(2.0, 2.0));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` components set to `Real::max_values`
    /// and `maxs` components set to `-Real::max_values`.
    ///
    /// This is often used as the initial value of an AABB computed by successive
    /// merges or calls to [`Aabb::take_point`].
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Creates a new AABB bounding all the given points.
    ///
    /// An empty iterator yields an invalid box (see [`Aabb::new_invalid`]).
    pub fn from_points<'a, I>(pts: I) -> Self
    where
        I: IntoIterator<Item = &'a Point<Real>>,
    {
        let mut result = Self::new_invalid();

        for pt in pts {
            result.take_point(*pt);
        }

        result
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        (self.maxs - self.mins) * 0.5
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Computes the AABB bounding `self` transformed by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        let center = m * self.center();
        let abs_rot = m.rotation.to_rotation_matrix().into_inner().abs();
        let ws_half_extents = abs_rot * self.half_extents();

        Aabb::new(center - ws_half_extents, center + ws_half_extents)
    }

    /// Does this AABB contain the given point?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        (0..DIM).all(|i| point[i] >= self.mins[i] && point[i] <= self.maxs[i])
    }

    /// Computes the intersection of this AABB and another one.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let result = Aabb {
            mins: self.mins.sup(&other.mins),
            maxs: self.maxs.inf(&other.maxs),
        };

        if (0..DIM).any(|i| result.mins[i] > result.maxs[i]) {
            None
        } else {
            Some(result)
        }
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn contains(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.mins) && na::partial_ge(&self.maxs, &other.maxs)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vector;

    #[test]
    fn rotated_aabb_grows() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::new(1.0, 1.0));
        let rot = Isometry::rotation(core::f32::consts::FRAC_PI_4 as Real);
        let transformed = aabb.transform_by(&rot);

        assert_relative_eq!(
            transformed.half_extents(),
            Vector::repeat((2.0 as Real).sqrt()),
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn disjoint_aabbs_have_no_intersection() {
        let a = Aabb::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        let b = Aabb::new(Point::new(2.0, 0.0), Point::new(3.0, 1.0));

        assert!(!a.intersects(&b));
        assert!(a.intersection(&b).is_none());
        assert!(a.merged(&b).contains(&b));
    }
}
