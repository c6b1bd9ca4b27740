use crate::math::{Matrix, Point, Real};
use num::FromPrimitive;

/// Computes the center of a set of points.
///
/// Panics if `pts` is empty.
#[inline]
pub fn center(pts: &[Point<Real>]) -> Point<Real> {
    assert!(
        !pts.is_empty(),
        "Cannot compute the center of less than 1 point."
    );

    let denom = Real::from_usize(pts.len()).map(|n| 1.0 / n).unwrap_or(0.0);
    let sum = pts
        .iter()
        .fold(na::Vector2::zeros(), |acc, pt| acc + pt.coords);

    Point::from(sum * denom)
}

/// Computes the covariance matrix of a set of points.
pub fn cov(pts: &[Point<Real>]) -> Matrix<Real> {
    center_cov(pts).1
}

/// Computes the center and the covariance matrix of a set of points.
pub fn center_cov(pts: &[Point<Real>]) -> (Point<Real>, Matrix<Real>) {
    let center = center(pts);
    let mut cov: Matrix<Real> = na::zero();
    let normalizer = Real::from_usize(pts.len()).map(|n| 1.0 / n).unwrap_or(0.0);

    for p in pts.iter() {
        let cp = *p - center;
        // NOTE: summing outer products keeps the matrix exactly symmetric.
        cov += cp * (cp * normalizer).transpose();
    }

    (center, cov)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cov_of_points_on_the_x_axis_has_no_y_spread() {
        let pts = [
            Point::new(-2.0, 1.0),
            Point::new(0.0, 1.0),
            Point::new(2.0, 1.0),
        ];
        let (c, m) = center_cov(&pts);

        assert_relative_eq!(c, Point::new(0.0, 1.0));
        assert!(m[(0, 0)] > 0.0);
        assert_relative_eq!(m[(1, 1)], 0.0);
        assert_relative_eq!(m[(0, 1)], m[(1, 0)]);
    }
}
