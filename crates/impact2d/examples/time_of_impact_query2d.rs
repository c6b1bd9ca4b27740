use impact2d::math::{Isometry, Vector};
use impact2d::query::{time_of_impact, RigidMotion, TimeOfImpactOptions};
use impact2d::shape::{Ball, ConvexPolygon, Shape};

fn main() {
    let cuboid = ConvexPolygon::cuboid(Vector::new(1.0, 1.0));
    let ball = Ball::new(1.0);
    let cuboid_radius = cuboid.max_radius();

    // A spinning cuboid, and balls thrown at it.
    let cuboid_motion = RigidMotion::new(Isometry::identity(), Vector::zeros(), 2.0);
    let ball_intersecting =
        RigidMotion::new(Isometry::translation(1.0, 1.0), Vector::new(2.0, 2.0), 0.0);
    let ball_will_touch =
        RigidMotion::new(Isometry::translation(4.0, 4.0), Vector::new(-3.0, -3.0), 0.0);
    let ball_wont_touch =
        RigidMotion::new(Isometry::translation(4.0, 4.0), Vector::new(3.0, 3.0), 0.0);

    let options = TimeOfImpactOptions::default();
    let toi = |ball_motion: &RigidMotion| {
        time_of_impact(
            ball_motion,
            &ball,
            ball.radius,
            &cuboid_motion,
            &cuboid,
            cuboid_radius,
            &options,
        )
    };

    let toi_intersecting = toi(&ball_intersecting);
    let toi_will_touch = toi(&ball_will_touch);
    let toi_wont_touch = toi(&ball_wont_touch);

    println!("Toi: {}", toi_will_touch);
    assert_eq!(toi_intersecting, 0.0);
    assert!(toi_will_touch > 0.0 && toi_will_touch < 1.0);
    assert_eq!(toi_wont_touch, 1.0);
}
