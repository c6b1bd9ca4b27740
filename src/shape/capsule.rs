use crate::bounding_volume::Aabb;
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Point, Real, Vector, DEFAULT_EPSILON};
use crate::shape::{ConvexPolygon, Shape, ShapeError, ShapeType, SupportMap};
use crate::utils;

/// A capsule: the set of points at distance at most `radius` from the segment `[a, b]`.
///
/// Internally the segment is stored as a two-sided polygon, so contact generation
/// treats the capsule as a rounded polygon.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct Capsule {
    core: ConvexPolygon,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule from its segment and radius.
    ///
    /// The radius is not validated, see [`Capsule::try_new`].
    pub fn new(a: Point<Real>, b: Point<Real>, radius: Real) -> Self {
        Self {
            core: ConvexPolygon::segment(a, b),
            radius,
        }
    }

    /// Creates a new capsule aligned with the local `x` axis, centered at the origin.
    pub fn new_x(half_length: Real, radius: Real) -> Self {
        Self::new(
            Point::new(-half_length, 0.0),
            Point::new(half_length, 0.0),
            radius,
        )
    }

    /// Creates a new capsule, checking that its radius is strictly positive.
    pub fn try_new(a: Point<Real>, b: Point<Real>, radius: Real) -> Result<Self, ShapeError> {
        if radius > 0.0 {
            Ok(Self::new(a, b, radius))
        } else {
            Err(ShapeError::NonPositiveRadius(radius))
        }
    }

    /// The first endpoint of the capsule segment.
    #[inline]
    pub fn a(&self) -> Point<Real> {
        self.core.points()[0]
    }

    /// The second endpoint of the capsule segment.
    #[inline]
    pub fn b(&self) -> Point<Real> {
        self.core.points()[1]
    }

    /// The segment of this capsule, as a two-vertex polygon.
    #[inline]
    pub fn core(&self) -> &ConvexPolygon {
        &self.core
    }
}

impl SupportMap for Capsule {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let dir = dir
            .try_normalize(DEFAULT_EPSILON)
            .unwrap_or_else(Vector::x);
        self.core.local_support_point(&dir) + dir * self.radius
    }
}

impl Shape for Capsule {
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        let (proj, _) = utils::project_point_on_segment(&self.a(), &self.b(), pt);
        na::distance_squared(&proj, pt) <= self.radius * self.radius
    }

    fn compute_local_aabb(&self) -> Aabb {
        let mut aabb = Aabb::new(self.a().inf(&self.b()), self.a().sup(&self.b()));
        aabb.mins -= Vector::repeat(self.radius);
        aabb.maxs += Vector::repeat(self.radius);
        aabb
    }

    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let (a, b) = (pos * self.a(), pos * self.b());
        Aabb::new(
            a.inf(&b) - Vector::repeat(self.radius),
            a.sup(&b) + Vector::repeat(self.radius),
        )
    }

    fn mass_properties(&self, density: Real) -> MassProperties {
        MassProperties::from_capsule(density, self.a(), self.b(), self.radius)
    }

    fn max_radius(&self) -> Real {
        self.a().coords.norm().max(self.b().coords.norm()) + self.radius
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Capsule
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn capsule_support_and_containment() {
        let capsule = Capsule::new_x(1.0, 0.5);

        assert_relative_eq!(
            capsule.local_support_point(&Vector::x()),
            Point::new(1.5, 0.0)
        );
        assert_relative_eq!(
            capsule.local_support_point(&Vector::y()),
            Point::new(-1.0, 0.5)
        );
        assert!(capsule.contains_local_point(&Point::new(1.4, 0.0)));
        assert!(!capsule.contains_local_point(&Point::new(1.4, 0.4)));
        assert_relative_eq!(capsule.max_radius(), 1.5);
    }
}
