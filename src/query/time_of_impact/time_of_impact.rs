use crate::math::{Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::query::gjk::{self, GjkOptions, Simplex};
use crate::query::{RigidMotion, SpaceMapping};
use crate::shape::SupportMap;

/// Parameters of a time-of-impact query.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfImpactOptions {
    /// The duration of the time interval searched, starting at time 0.
    pub interval: Real,
    /// The shapes are considered touching once their distance falls below
    /// `epsilon + allowed_penetration`.
    pub epsilon: Real,
    /// The maximum number of advancement steps.
    pub max_iterations: usize,
    /// Distance, on top of `epsilon`, under which the shapes are considered touching.
    pub allowed_penetration: Real,
    /// Parameters of the distance queries run at each step.
    pub gjk: GjkOptions,
}

impl Default for TimeOfImpactOptions {
    fn default() -> Self {
        Self {
            interval: 1.0,
            epsilon: 1.0e-4,
            max_iterations: 32,
            allowed_penetration: 0.0,
            gjk: GjkOptions::default(),
        }
    }
}

/// Computes the first time, as a fraction of `options.interval`, at which two moving shapes touch.
///
/// Uses conservative advancement: at each step the distance between the shapes is divided
/// by an upper bound of their closing speed along the separation direction, which is the
/// relative linear velocity along that direction plus `|angvel| * radius` for each body.
/// `radius1` and `radius2` must bound the distance between every point of the corresponding
/// shape and its center of rotation.
///
/// Returns `0.0` if the shapes already touch at time 0 and `1.0` if they do not touch during
/// the interval, including when they move apart. If the iteration budget is exhausted, the
/// time reached so far is returned.
pub fn time_of_impact<G1, G2>(
    motion1: &RigidMotion,
    g1: &G1,
    radius1: Real,
    motion2: &RigidMotion,
    g2: &G2,
    radius2: Real,
    options: &TimeOfImpactOptions,
) -> Real
where
    G1: ?Sized + SupportMap,
    G2: ?Sized + SupportMap,
{
    let fraction = |t: Real| {
        if options.interval > 0.0 {
            (t / options.interval).clamp(0.0, 1.0)
        } else {
            0.0
        }
    };

    let threshold = options.epsilon + options.allowed_penetration;
    let angular_bound = motion1.angvel.abs() * radius1 + motion2.angvel.abs() * radius2;
    let mut simplex = Simplex::new();
    let mut mapping = SpaceMapping::new(&motion1.start, &motion2.start);
    let mut dir = Vector::zeros();
    let mut t = 0.0;

    for _ in 0..options.max_iterations {
        mapping.update(&motion1.position_at_time(t), &motion2.position_at_time(t));
        let dist = gjk::distance(g1, g2, &mapping, &dir, &options.gjk, &mut simplex);

        if dist < threshold {
            return fraction(t);
        }

        dir = gjk::separation_vector(&simplex);
        let Some(normal) = UnitVector::try_new(mapping.pos1() * dir, DEFAULT_EPSILON) else {
            return fraction(t);
        };

        let closing_speed = (motion1.linvel - motion2.linvel).dot(&normal) + angular_bound;
        if closing_speed <= 0.0 {
            return 1.0;
        }

        t += dist / closing_speed;
        if t >= options.interval {
            return 1.0;
        }
    }

    log::debug!(
        "Time of impact did not converge after {} iterations, returning the time reached.",
        options.max_iterations
    );
    fraction(t)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Isometry;
    use crate::shape::{Ball, ConvexPolygon};

    #[test]
    fn head_on_balls() {
        let ball = Ball::new(0.5);
        let m1 = RigidMotion::new(Isometry::identity(), Vector::new(2.0, 0.0), 0.0);
        let m2 = RigidMotion::constant_position(Isometry::translation(5.0, 0.0));
        let options = TimeOfImpactOptions {
            interval: 4.0,
            ..TimeOfImpactOptions::default()
        };

        let toi = time_of_impact(&m1, &ball, 0.5, &m2, &ball, 0.5, &options);
        assert_relative_eq!(toi, 4.0 / (2.0 * 4.0), epsilon = 1.0e-3);
    }

    #[test]
    fn receding_boxes_never_touch() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        let m1 = RigidMotion::new(Isometry::identity(), Vector::new(-1.0, 0.0), 0.0);
        let m2 = RigidMotion::new(Isometry::translation(2.0, 0.0), Vector::new(1.0, 0.0), 0.0);
        let options = TimeOfImpactOptions {
            max_iterations: 1,
            ..TimeOfImpactOptions::default()
        };

        assert_eq!(time_of_impact(&m1, &b, 1.0, &m2, &b, 1.0, &options), 1.0);
    }

    #[test]
    fn overlapping_at_start() {
        let b = ConvexPolygon::cuboid(Vector::new(0.5, 0.5));
        let m1 = RigidMotion::new(Isometry::identity(), Vector::new(-1.0, 0.0), 0.0);
        let m2 = RigidMotion::constant_position(Isometry::translation(0.5, 0.0));

        let toi = time_of_impact(&m1, &b, 1.0, &m2, &b, 1.0, &TimeOfImpactOptions::default());
        assert_eq!(toi, 0.0);
    }

    #[test]
    fn spinning_box_hits_a_wall() {
        let b = ConvexPolygon::cuboid(Vector::new(1.0, 0.1));
        let wall = ConvexPolygon::cuboid(Vector::new(0.1, 5.0));
        let upright = Isometry::rotation(core::f32::consts::FRAC_PI_2 as Real);
        let m1 = RigidMotion::new(upright, Vector::zeros(), 3.0);
        let m2 = RigidMotion::constant_position(Isometry::translation(1.5, 0.0));
        let options = TimeOfImpactOptions {
            max_iterations: 100,
            ..TimeOfImpactOptions::default()
        };

        let radius = (1.0 as Real + 0.01).sqrt();
        let toi = time_of_impact(&m1, &b, radius, &m2, &wall, 0.0, &options);
        assert_eq!(toi, 1.0);

        let m2 = RigidMotion::constant_position(Isometry::translation(1.05, 0.0));
        let toi = time_of_impact(&m1, &b, radius, &m2, &wall, 0.0, &options);
        assert!(toi > 0.0 && toi < 1.0);
        let pos1 = m1.position_at_time(toi);
        let mapping = SpaceMapping::new(&pos1, &m2.start);
        let dist = gjk::distance(
            &b,
            &wall,
            &mapping,
            &Vector::zeros(),
            &GjkOptions::default(),
            &mut Simplex::new(),
        );
        assert!(dist < 1.0e-2);
    }
}
