use crate::bounding_volume::Aabb;
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{Shape, ShapeError, ShapeType, SupportMap};

/// An axis-aligned ellipse centered at the origin of its local frame.
///
/// Ellipses have no polygonal features: their contacts are computed with GJK and EPA.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Ellipse {
    /// The half-lengths of the ellipse along the local `x` and `y` axes.
    pub half_axes: Vector<Real>,
}

impl Ellipse {
    /// Creates a new ellipse from its half-axes.
    #[inline]
    pub fn new(half_axes: Vector<Real>) -> Self {
        Self { half_axes }
    }

    /// Creates a new ellipse, checking that both half-axes are strictly positive.
    pub fn try_new(half_axes: Vector<Real>) -> Result<Self, ShapeError> {
        if half_axes.x > 0.0 && half_axes.y > 0.0 {
            Ok(Self { half_axes })
        } else {
            Err(ShapeError::NonPositiveHalfAxes(half_axes.x, half_axes.y))
        }
    }
}

impl SupportMap for Ellipse {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let sq_axes = self.half_axes.component_mul(&self.half_axes);
        let scaled = sq_axes.component_mul(dir);
        let denom = scaled.dot(dir).sqrt();

        if denom <= DEFAULT_EPSILON {
            Point::new(self.half_axes.x, 0.0)
        } else {
            Point::from(scaled / denom)
        }
    }
}

impl Shape for Ellipse {
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        let u = pt.x / self.half_axes.x;
        let v = pt.y / self.half_axes.y;
        u * u + v * v <= 1.0
    }

    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), self.half_axes)
    }

    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let (s, c) = (pos.rotation.im, pos.rotation.re);
        let (a, b) = (self.half_axes.x, self.half_axes.y);
        let hx = (a * a * c * c + b * b * s * s).sqrt();
        let hy = (a * a * s * s + b * b * c * c).sqrt();

        Aabb::from_half_extents(Point::from(pos.translation.vector), Vector::new(hx, hy))
    }

    fn mass_properties(&self, density: Real) -> MassProperties {
        MassProperties::from_ellipse(density, self.half_axes)
    }

    fn max_radius(&self) -> Real {
        self.half_axes.max()
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Ellipse
    }
}
