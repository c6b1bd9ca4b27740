use crate::math::{Isometry, Point, Real, Translation, Vector};

/// A rigid body motion with constant linear and angular velocities.
///
/// The body rotates around its local center of mass `local_center` while that center
/// translates at `linvel`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidMotion {
    /// The pose of the body at time 0.
    pub start: Isometry<Real>,
    /// The center of rotation, in the local frame of the body.
    pub local_center: Point<Real>,
    /// The linear velocity of the center of rotation.
    pub linvel: Vector<Real>,
    /// The angular velocity, in radians per unit of time.
    pub angvel: Real,
}

impl RigidMotion {
    /// A motion starting at `start`, rotating around the local origin.
    pub fn new(start: Isometry<Real>, linvel: Vector<Real>, angvel: Real) -> Self {
        RigidMotion {
            start,
            local_center: Point::origin(),
            linvel,
            angvel,
        }
    }

    /// A motion that stays at `pos` forever.
    pub fn constant_position(pos: Isometry<Real>) -> Self {
        Self::new(pos, Vector::zeros(), 0.0)
    }

    /// This motion with a different center of rotation.
    #[must_use]
    pub fn with_local_center(mut self, local_center: Point<Real>) -> Self {
        self.local_center = local_center;
        self
    }

    /// The pose of the body at time `t`.
    pub fn position_at_time(&self, t: Real) -> Isometry<Real> {
        let center = self.start * self.local_center;
        let shift = Translation::from(center.coords);
        (shift * Isometry::new(self.linvel * t, self.angvel * t)) * (shift.inverse() * self.start)
    }
}

#[cfg(test)]
mod test {
    use super::RigidMotion;
    use crate::math::{Isometry, Point, Real, Vector};

    #[test]
    fn rotation_around_the_local_center() {
        let pi = core::f32::consts::PI as Real;
        let motion = RigidMotion::new(Isometry::translation(1.0, 0.0), Vector::new(0.0, 2.0), 1.0)
            .with_local_center(Point::new(1.0, 0.0));
        let pos = motion.position_at_time(pi);

        // The center only follows the linear velocity.
        let center = pos * Point::new(1.0, 0.0);
        assert_relative_eq!(center, Point::new(2.0, 2.0 * pi), epsilon = 1.0e-4);
        assert_relative_eq!(pos * Point::origin(), Point::new(3.0, 2.0 * pi), epsilon = 1.0e-4);
    }
}
