use crate::math::{Point, Real, Vector};
use core::iter::Sum;
use core::ops::Add;

/// The mass properties of a rigid body.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassProperties {
    /// The center of mass, in the shape-local frame.
    pub local_com: Point<Real>,
    /// The mass.
    pub mass: Real,
    /// The angular inertia about the center of mass.
    pub principal_inertia: Real,
}

impl MassProperties {
    /// Initializes the mass properties with the given center-of-mass, mass, and
    /// angular inertia about that center of mass.
    pub fn new(local_com: Point<Real>, mass: Real, principal_inertia: Real) -> Self {
        Self {
            local_com,
            mass,
            principal_inertia,
        }
    }

    /// Mass properties of a massless body.
    pub fn zero() -> Self {
        Self::new(Point::origin(), 0.0, 0.0)
    }

    /// The angular inertia about a point shifted by `shift` from the center of mass
    /// (parallel axis theorem).
    pub fn shifted_inertia(&self, shift: Vector<Real>) -> Real {
        self.principal_inertia + shift.norm_squared() * self.mass
    }

    /// The angular inertia about the local-space origin.
    pub fn angular_inertia_about_origin(&self) -> Real {
        self.shifted_inertia(self.local_com.coords)
    }

    /// These mass properties with the mass rescaled to `mass`, keeping the shape of the
    /// mass distribution.
    pub fn with_mass(&self, mass: Real) -> Self {
        let ratio = crate::utils::inv(self.mass) * mass;
        Self::new(self.local_com, mass, self.principal_inertia * ratio)
    }
}

impl Add<MassProperties> for MassProperties {
    type Output = Self;

    fn add(self, other: MassProperties) -> Self {
        if self.mass == 0.0 {
            return other;
        } else if other.mass == 0.0 {
            return self;
        }

        let mass = self.mass + other.mass;
        let local_com = (self.local_com * self.mass + other.local_com.coords * other.mass) / mass;
        let i1 = self.shifted_inertia(local_com - self.local_com);
        let i2 = other.shifted_inertia(local_com - other.local_com);

        Self::new(local_com, mass, i1 + i2)
    }
}

impl Sum<MassProperties> for MassProperties {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::zero(), |acc, props| acc + props)
    }
}
