use crate::bounding_volume::Aabb;
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{Shape, ShapeError, ShapeType, SupportMap};

/// A disc centered at the origin of its local frame.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Ball {
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball from its radius.
    ///
    /// The radius is not validated, see [`Ball::try_new`].
    #[inline]
    pub fn new(radius: Real) -> Ball {
        Ball { radius }
    }

    /// Creates a new ball, checking that its radius is strictly positive.
    pub fn try_new(radius: Real) -> Result<Ball, ShapeError> {
        if radius > 0.0 {
            Ok(Ball { radius })
        } else {
            Err(ShapeError::NonPositiveRadius(radius))
        }
    }
}

impl SupportMap for Ball {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let dir = dir
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(Vector::x);
        Point::from(dir * self.radius)
    }
}

impl Shape for Ball {
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        pt.coords.norm_squared() <= self.radius * self.radius
    }

    fn compute_local_aabb(&self) -> Aabb {
        Aabb::from_half_extents(Point::origin(), Vector::repeat(self.radius))
    }

    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        Aabb::from_half_extents(
            Point::from(pos.translation.vector),
            Vector::repeat(self.radius),
        )
    }

    fn mass_properties(&self, density: Real) -> MassProperties {
        MassProperties::from_ball(density, self.radius)
    }

    fn max_radius(&self) -> Real {
        self.radius
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Ball
    }
}
