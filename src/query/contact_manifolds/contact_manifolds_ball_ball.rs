use crate::math::{Isometry, Point, Real, UnitVector};
use crate::query::contact_manifolds::ContactBuffer;
use crate::query::Contact;
use crate::shape::Ball;

/// Computes the contact between two balls.
///
/// Emits one contact if the balls strictly overlap. Coincident centers do not define a
/// normal and produce no contact.
pub fn contact_manifold_ball_ball(
    pos12: &Isometry<Real>,
    ball1: &Ball,
    ball2: &Ball,
    out: &mut ContactBuffer,
) {
    let center2_1 = pos12.translation.vector;
    let radius_sum = ball1.radius + ball2.radius;
    let dist = center2_1.norm();

    if dist >= radius_sum {
        return;
    }

    let Some(normal1) = UnitVector::try_new(center2_1, crate::math::DEFAULT_EPSILON) else {
        log::debug!("Coincident ball centers, no contact normal can be computed.");
        return;
    };

    let normal2 = pos12.inverse_transform_unit_vector(&-normal1);
    let point1 = Point::from(*normal1 * ball1.radius);
    let point2 = Point::from(*normal2 * ball2.radius);

    out.push(Contact::new(
        point1,
        point2,
        normal1,
        normal2,
        dist - radius_sum,
    ));
}

#[cfg(test)]
mod test {
    use super::contact_manifold_ball_ball;
    use crate::math::{Isometry, Vector};
    use crate::query::ContactBuffer;
    use crate::shape::Ball;

    #[test]
    fn overlapping_balls() {
        let ball = Ball::new(1.0);
        let mut out = ContactBuffer::new();
        contact_manifold_ball_ball(&Isometry::translation(1.5, 0.0), &ball, &ball, &mut out);

        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].dist, -0.5, epsilon = 1.0e-6);
        assert_relative_eq!(out[0].normal1.into_inner(), Vector::x(), epsilon = 1.0e-6);
        assert_relative_eq!(out[0].point2.coords, -Vector::x(), epsilon = 1.0e-6);
    }

    #[test]
    fn touching_or_coincident_balls_have_no_contact() {
        let ball = Ball::new(1.0);
        let mut out = ContactBuffer::new();
        contact_manifold_ball_ball(&Isometry::translation(2.0, 0.0), &ball, &ball, &mut out);
        contact_manifold_ball_ball(&Isometry::identity(), &ball, &ball, &mut out);
        assert!(out.is_empty());
    }
}
