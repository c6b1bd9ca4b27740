use crate::mass_properties::MassProperties;
use crate::math::{Point, Real, Vector};
use na::RealField;

impl MassProperties {
    /// Computes the mass properties of an axis-aligned ellipse centered at the origin.
    pub fn from_ellipse(density: Real, half_axes: Vector<Real>) -> Self {
        let area = Real::pi() * half_axes.x * half_axes.y;
        let mass = area * density;
        let i = mass * half_axes.norm_squared() / 4.0;
        Self::new(Point::origin(), mass, i)
    }
}
