use crate::math::{Point, Real};
use ordered_float::OrderedFloat;

/// Computes the convex hull of a set of 2D points.
///
/// Uses Andrew's monotone chain. The hull vertices are returned in counter-clockwise
/// order, without duplicates nor collinear vertices. Fewer than three distinct input
/// points yield these distinct points unchanged.
pub fn convex_hull(points: &[Point<Real>]) -> Vec<Point<Real>> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| (OrderedFloat(p.x), OrderedFloat(p.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let turn = |a: &Point<Real>, b: &Point<Real>, c: &Point<Real>| (b - a).perp(&(c - a));
    let mut hull: Vec<Point<Real>> = Vec::with_capacity(sorted.len() * 2);

    // Lower hull.
    for p in &sorted {
        while hull.len() >= 2 && turn(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            let _ = hull.pop();
        }
        hull.push(*p);
    }

    // Upper hull.
    let lower_len = hull.len() + 1;
    for p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len
            && turn(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0
        {
            let _ = hull.pop();
        }
        hull.push(*p);
    }

    // The last point is the first one.
    let _ = hull.pop();
    hull
}
