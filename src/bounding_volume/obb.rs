//! Oriented Bounding Box.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Isometry, Point, Real, Rotation, Translation, Vector, DIM};

/// An oriented bounding box.
///
/// The box is centered at `pose.translation` and its axes are the columns of
/// `pose.rotation`. Unlike an [`Aabb`], it keeps tight around elongated point sets
/// whose principal directions are not aligned with the coordinate axes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Obb {
    /// The position of the box center and the orientation of its axes.
    pub pose: Isometry<Real>,
    /// The half-lengths of the box along each of its axes.
    pub half_extents: Vector<Real>,
}

impl Obb {
    /// Creates a new oriented box.
    pub fn new(pose: Isometry<Real>, half_extents: Vector<Real>) -> Self {
        Self { pose, half_extents }
    }

    /// Computes an oriented bounding box for the given set of points.
    ///
    /// The box axes are the eigenvectors of the points' covariance matrix. The result
    /// is not guaranteed to be the smallest enclosing box.
    ///
    /// Panics if `pts` is empty.
    pub fn from_points(pts: &[Point<Real>]) -> Self {
        let cov = crate::utils::cov(pts);
        let mut eigv = cov.symmetric_eigen().eigenvectors;

        if eigv.determinant() < 0.0 {
            let flipped = -eigv.column(1);
            eigv.set_column(1, &flipped);
        }

        let mut mins = Vector::repeat(Real::MAX);
        let mut maxs = Vector::repeat(-Real::MAX);

        for pt in pts {
            for i in 0..DIM {
                let dot = eigv.column(i).dot(&pt.coords);
                mins[i] = mins[i].min(dot);
                maxs[i] = maxs[i].max(dot);
            }
        }

        let rot = Rotation::from_rotation_matrix(&na::Rotation2::from_matrix_unchecked(eigv));

        Self {
            pose: rot * Translation::from((maxs + mins) / 2.0),
            half_extents: (maxs - mins) / 2.0,
        }
    }

    /// The center of this box.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from(self.pose.translation.vector)
    }

    /// The unit direction of the `i`-th axis of this box.
    #[inline]
    pub fn axis(&self, i: usize) -> Vector<Real> {
        self.pose.rotation * Vector::ith(i, 1.0)
    }

    /// Index of the axis along which this box is the longest.
    #[inline]
    pub fn longest_axis(&self) -> usize {
        self.half_extents.imax()
    }

    /// Does this box contain the given point?
    pub fn contains_point(&self, pt: &Point<Real>) -> bool {
        let local = self.pose.inverse_transform_point(pt);
        (0..DIM).all(|i| local[i].abs() <= self.half_extents[i])
    }

    /// The AABB bounding this box.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), self.half_extents).transform_by(&self.pose)
    }

    /// Tests if this box intersects the given AABB.
    ///
    /// This is an exact separating-axis test over the two axes of each box.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        // Axes of the AABB.
        if !self.aabb().intersects(aabb) {
            return false;
        }

        let delta = aabb.center() - self.center();
        let aabb_he = aabb.half_extents();
        let axes = [self.axis(0), self.axis(1)];

        // Axes of the OBB.
        for (i, axis) in axes.iter().enumerate() {
            let r_aabb = axis.x.abs() * aabb_he.x + axis.y.abs() * aabb_he.y;
            if delta.dot(axis).abs() > self.half_extents[i] + r_aabb {
                return false;
            }
        }

        true
    }
}
