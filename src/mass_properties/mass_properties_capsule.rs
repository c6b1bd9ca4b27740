use crate::mass_properties::MassProperties;
use crate::math::{Point, Real};
use na::RealField;

impl MassProperties {
    /// Computes the mass properties of a capsule with segment `[a, b]` and radius `radius`.
    ///
    /// The capsule is a rectangle of length `|b - a|` and width `2 * radius` closed by two
    /// half-discs, which together form one full disc.
    pub fn from_capsule(density: Real, a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        let h = (b - a).norm();
        let rect_area = h * radius * 2.0;
        let rect_unit_i = (h * h / 4.0 + radius * radius) / 3.0;
        let (ball_area, ball_unit_i) = Self::ball_area_unit_angular_inertia(radius);

        let mass = (rect_area + ball_area) * density;
        let mut i = (rect_unit_i * rect_area + ball_unit_i * ball_area) * density;
        // Shift of the two half-discs away from the capsule center.
        i += (h * h * 0.25 + h * radius * 4.0 / (3.0 * Real::pi())) * ball_area * density;

        Self::new(na::center(&a, &b), mass, i)
    }
}
