//! Traits for support mapping based shapes.

use crate::math::{Isometry, Point, Real, Vector};

/// Trait implemented by convex shapes representable by a support mapping function.
///
/// # What is a support map?
///
/// A support function associates a direction `dir` to the point of the shape which
/// maximizes its dot product with `dir`. Distance (GJK) and penetration (EPA) queries
/// only ever look at shapes through this function.
///
/// Implementors must be side-effect free: two calls with the same direction return
/// the same point. The direction is not required to be normalized and may be zero,
/// in which case any point of the shape is a valid answer.
pub trait SupportMap {
    /// Evaluates the support function of this shape, in its local frame.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// Evaluates the support function of this shape transformed by `transform`.
    fn support_point(&self, transform: &Isometry<Real>, dir: &Vector<Real>) -> Point<Real> {
        let local_dir = transform.inverse_transform_vector(dir);
        transform * self.local_support_point(&local_dir)
    }
}
