use approx::assert_relative_eq;
use impact2d::math::{Isometry, Point, Real, Vector};
use impact2d::query::gjk::{self, GjkOptions, Simplex};
use impact2d::query::SpaceMapping;
use impact2d::shape::{Ball, Capsule, ConvexPolygon, Shape};

fn random_pose(rng: &mut oorandom::Rand32, extent: Real) -> Isometry<Real> {
    let x = (rng.rand_float() as Real - 0.5) * extent;
    let y = (rng.rand_float() as Real - 0.5) * extent;
    let angle = rng.rand_float() as Real * std::f64::consts::TAU as Real;
    Isometry::new(Vector::new(x, y), angle)
}

fn random_polygon(rng: &mut oorandom::Rand32) -> ConvexPolygon {
    let pts: Vec<_> = (0..8)
        .map(|_| {
            Point::new(
                rng.rand_float() as Real * 2.0 - 1.0,
                rng.rand_float() as Real * 2.0 - 1.0,
            )
        })
        .collect();
    ConvexPolygon::from_convex_hull(&pts)
        .unwrap_or_else(|_| ConvexPolygon::cuboid(Vector::repeat(0.5)))
}

fn distance(
    g1: &dyn Shape,
    pos1: &Isometry<Real>,
    g2: &dyn Shape,
    pos2: &Isometry<Real>,
) -> Real {
    gjk::distance(
        g1,
        g2,
        &SpaceMapping::new(pos1, pos2),
        &Vector::zeros(),
        &GjkOptions::default(),
        &mut Simplex::new(),
    )
}

#[test]
fn ball_ball_distance_is_exact() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..500 {
        let b1 = Ball::new(rng.rand_float() as Real + 0.1);
        let b2 = Ball::new(rng.rand_float() as Real + 0.1);
        let pos1 = random_pose(&mut rng, 10.0);
        let pos2 = random_pose(&mut rng, 10.0);

        let center_dist = (pos2.translation.vector - pos1.translation.vector).norm();
        let expected = (center_dist - b1.radius - b2.radius).max(0.0);
        let dist = distance(&b1, &pos1, &b2, &pos2);

        assert_relative_eq!(dist, expected, epsilon = 1.0e-3 * (1.0 + center_dist));
    }
}

#[test]
fn box_box_distance() {
    let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
    let dist = distance(&b, &Isometry::identity(), &b, &Isometry::translation(3.0, 0.0));
    assert_relative_eq!(dist, 2.0, epsilon = 1.0e-5);

    let dist = distance(&b, &Isometry::identity(), &b, &Isometry::translation(0.9, 0.3));
    assert_eq!(dist, 0.0);

    let dist = distance(&b, &Isometry::identity(), &b, &Isometry::translation(3.0, 4.0));
    assert_relative_eq!(dist, (2.0 as Real * 2.0 + 3.0 * 3.0).sqrt(), epsilon = 1.0e-4);
}

#[test]
fn distance_is_symmetric() {
    let mut rng = oorandom::Rand32::new(7);

    for _ in 0..300 {
        let poly = random_polygon(&mut rng);
        let capsule = Capsule::new_x(rng.rand_float() as Real + 0.1, 0.2);
        let pos1 = random_pose(&mut rng, 8.0);
        let pos2 = random_pose(&mut rng, 8.0);

        let d12 = distance(&poly, &pos1, &capsule, &pos2);
        let d21 = distance(&capsule, &pos2, &poly, &pos1);
        assert!(d12 >= 0.0);
        assert_relative_eq!(d12, d21, epsilon = 1.0e-3 * (1.0 + d12));
    }
}

#[test]
fn closest_points_are_at_the_reported_distance() {
    let mut rng = oorandom::Rand32::new(1234);
    let mut simplex = Simplex::new();

    for _ in 0..300 {
        let poly1 = random_polygon(&mut rng);
        let poly2 = random_polygon(&mut rng);
        let pos1 = random_pose(&mut rng, 12.0);
        let pos2 = random_pose(&mut rng, 12.0);
        let mapping = SpaceMapping::new(&pos1, &pos2);

        let dist = gjk::distance(
            &poly1,
            &poly2,
            &mapping,
            &Vector::zeros(),
            &GjkOptions::default(),
            &mut simplex,
        );

        if dist > 0.0 {
            let (pt1, pt2) = gjk::closest_points(&simplex);
            assert_relative_eq!(point_distance(&pt1, &pt2), dist, epsilon = 1.0e-3);
            assert_relative_eq!(gjk::separation_vector(&simplex).norm(), dist, epsilon = 1.0e-3);
        }
    }
}

fn point_distance(a: &Point<Real>, b: &Point<Real>) -> Real {
    (b - a).norm()
}

#[test]
fn margin_reports_near_shapes_as_touching() {
    let b = Ball::new(1.0);
    let options = GjkOptions {
        margin: 0.1,
        ..GjkOptions::default()
    };
    let dist = gjk::distance(
        &b,
        &b,
        &SpaceMapping::new(&Isometry::identity(), &Isometry::translation(2.05, 0.0)),
        &Vector::zeros(),
        &options,
        &mut Simplex::new(),
    );
    assert_eq!(dist, 0.0);
}
