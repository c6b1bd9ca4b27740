use crate::math::{Point, Real};

/// The orientation of three consecutive points.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
pub enum Orientation {
    /// The points turn counter-clockwise (left).
    Ccw,
    /// The points turn clockwise (right).
    Cw,
    /// The points are collinear.
    None,
}

/// Orientation of the turn `p1 -> p2 -> p3`, with `eps` as the collinearity tolerance
/// on the cross product.
pub fn orientation(p1: &Point<Real>, p2: &Point<Real>, p3: &Point<Real>, eps: Real) -> Orientation {
    let cross = (p2 - p1).perp(&(p3 - p2));

    if cross > eps {
        Orientation::Ccw
    } else if cross < -eps {
        Orientation::Cw
    } else {
        Orientation::None
    }
}

/// Signed area of a closed polygon loop (positive if counter-clockwise).
pub fn signed_area(points: &[Point<Real>]) -> Real {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].coords.perp(&points[j].coords);
    }

    area * 0.5
}

/// Checks that `points` describe a counter-clockwise convex loop.
///
/// Collinear consecutive points (within `eps`) are accepted.
pub fn is_convex_ccw(points: &[Point<Real>], eps: Real) -> bool {
    if points.len() < 3 {
        return false;
    }

    for i in 0..points.len() {
        let p1 = &points[i];
        let p2 = &points[(i + 1) % points.len()];
        let p3 = &points[(i + 2) % points.len()];

        if orientation(p1, p2, p3, eps) == Orientation::Cw {
            return false;
        }
    }

    signed_area(points) > 0.0
}
