//! The Gilbert-Johnson-Keerthi distance algorithm.

use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{CsoPoint, Simplex};
use crate::query::SpaceMapping;
use crate::shape::SupportMap;

/// The absolute tolerance used by the GJK algorithm.
pub fn eps_tol() -> Real {
    DEFAULT_EPSILON * 10.0
}

/// Tuning parameters of the GJK distance algorithm.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GjkOptions {
    /// Shapes closer than this distance are reported as overlapping, with a distance of 0.
    pub margin: Real,
    /// The algorithm stops once the gap between the upper and lower bounds of the distance
    /// is smaller than `rel_tolerance` times the upper bound.
    pub rel_tolerance: Real,
    /// The maximum number of support points computed before giving up.
    pub max_iterations: usize,
    /// Two CSO points closer than `same_point_eps` times the largest squared vertex norm of
    /// the simplex are considered identical, which stops the algorithm.
    pub same_point_eps: Real,
    /// Simplex vertices with a barycentric weight smaller than this are removed.
    pub zero_weight_eps: Real,
}

impl Default for GjkOptions {
    fn default() -> Self {
        let eps_tol = eps_tol();
        Self {
            margin: 0.0,
            rel_tolerance: eps_tol.sqrt(),
            max_iterations: 100,
            same_point_eps: eps_tol,
            zero_weight_eps: DEFAULT_EPSILON * 10.0,
        }
    }
}

/// Computes the distance between two convex shapes.
///
/// The simplex is reset by this function; after it returns it holds the final working set
/// from which [`separation_vector`] and [`closest_points`] recover the closest points.
/// `init_dir` is an initial guess of the direction from the first shape toward the second
/// one, in the local frame of the first shape; it may be zero.
///
/// Returns exactly `0.0` if the shapes overlap or are closer than `options.margin`.
/// If the iteration budget is exhausted, the distance from the origin to the current
/// simplex is returned.
pub fn distance<G1, G2>(
    g1: &G1,
    g2: &G2,
    mapping: &SpaceMapping,
    init_dir: &Vector<Real>,
    options: &GjkOptions,
    simplex: &mut Simplex,
) -> Real
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let pos12 = mapping.pos12();
    let init_dir = if init_dir.norm_squared() > DEFAULT_EPSILON {
        *init_dir
    } else if pos12.translation.vector.norm_squared() > DEFAULT_EPSILON {
        pos12.translation.vector
    } else {
        Vector::x()
    };

    simplex.reset(CsoPoint::from_shapes(pos12, g1, g2, &init_dir));

    let eps_tol = eps_tol();
    let mut old_max_bound = Real::MAX;
    let mut niter = 0;

    loop {
        let proj = simplex.project_origin_and_reduce(options.zero_weight_eps);
        let max_bound = proj.coords.norm();

        if max_bound <= options.margin || max_bound <= eps_tol {
            // The origin is on, or close enough to, the simplex.
            return 0.0;
        }

        if max_bound >= old_max_bound {
            // No progress: upper bound inconsistencies caused by rounding errors.
            return old_max_bound;
        }

        if niter >= options.max_iterations {
            log::debug!(
                "GJK did not converge after {} iterations, returning the current estimate.",
                niter
            );
            return max_bound;
        }

        old_max_bound = max_bound;
        let dir = -proj.coords / max_bound;
        let support = CsoPoint::from_shapes(pos12, g1, g2, &dir);
        let min_bound = -dir.dot(&support.point.coords);

        if max_bound - min_bound <= options.rel_tolerance * max_bound {
            return max_bound;
        }

        if !simplex.add_point(support, options.same_point_eps) {
            // Cycling: the new support point is already part of the simplex.
            return max_bound;
        }

        niter += 1;
    }
}

/// The vector from the first shape toward the second one, in the local frame of the first shape.
///
/// Its norm is the distance between the shapes computed by the last call to [`distance`]
/// that used this simplex.
pub fn separation_vector(simplex: &Simplex) -> Vector<Real> {
    -simplex.projection().coords
}

/// The closest points of the two shapes, both in the local frame of the first shape.
///
/// They are only meaningful if the last call to [`distance`] that used this simplex returned a
/// nonzero distance.
pub fn closest_points(simplex: &Simplex) -> (Point<Real>, Point<Real>) {
    let mut res = (Point::origin(), Point::origin());

    for i in 0..simplex.len() {
        let w = simplex.weight(i);
        let pt = simplex.point(i);
        res.0.coords += pt.orig1.coords * w;
        res.1.coords += pt.orig2.coords * w;
    }

    res
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Isometry;
    use crate::shape::{Ball, ConvexPolygon};

    #[test]
    fn distance_between_separated_boxes() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        let pos1 = Isometry::identity();
        let pos2 = Isometry::translation(3.0, 0.25);
        let mapping = SpaceMapping::new(&pos1, &pos2);
        let mut simplex = Simplex::new();

        let dist = distance(
            &b,
            &b,
            &mapping,
            &Vector::zeros(),
            &GjkOptions::default(),
            &mut simplex,
        );
        assert_relative_eq!(dist, 2.0, epsilon = 1.0e-4);
        assert_relative_eq!(
            separation_vector(&simplex),
            Vector::new(2.0, 0.0),
            epsilon = 1.0e-4
        );

        let (p1, p2) = closest_points(&simplex);
        assert_relative_eq!(p1.x, 0.5, epsilon = 1.0e-4);
        assert_relative_eq!(p2.x, 2.5, epsilon = 1.0e-4);
    }

    #[test]
    fn overlapping_and_margin_return_zero() {
        let ball = Ball::new(1.0);
        let mut simplex = Simplex::new();
        let pos1 = Isometry::identity();

        let overlapping = SpaceMapping::new(&pos1, &Isometry::translation(1.0, 0.5));
        let opts = GjkOptions::default();
        let d = distance(&ball, &ball, &overlapping, &Vector::zeros(), &opts, &mut simplex);
        assert_eq!(d, 0.0);

        let near = SpaceMapping::new(&pos1, &Isometry::translation(2.05, 0.0));
        let with_margin = GjkOptions {
            margin: 0.1,
            ..opts
        };
        let d = distance(&ball, &ball, &near, &Vector::zeros(), &with_margin, &mut simplex);
        assert_eq!(d, 0.0);
        let d = distance(&ball, &ball, &near, &Vector::zeros(), &opts, &mut simplex);
        assert_relative_eq!(d, 0.05, epsilon = 1.0e-3);
    }

    #[test]
    fn exhausted_budget_returns_an_upper_bound() {
        let ball = Ball::new(1.0);
        let mapping = SpaceMapping::new(&Isometry::identity(), &Isometry::translation(4.0, 1.0));
        let opts = GjkOptions {
            max_iterations: 0,
            ..GjkOptions::default()
        };
        let mut simplex = Simplex::new();
        let d = distance(&ball, &ball, &mapping, &Vector::y(), &opts, &mut simplex);
        let exact = Vector::<Real>::new(4.0, 1.0).norm() - 2.0;
        assert!(d >= exact - 1.0e-4);
    }
}
