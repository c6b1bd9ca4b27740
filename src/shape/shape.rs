use crate::bounding_volume::{self, Aabb};
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Point, Real, Vector};
use crate::shape::{Ball, Capsule, ConvexPolygon, Ellipse, MeshShape, SupportMap};

/// Enum representing the type of a shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeType {
    /// A ball shape.
    Ball,
    /// A convex polygon shape.
    ConvexPolygon,
    /// A capsule shape.
    Capsule,
    /// An ellipse shape.
    Ellipse,
    /// A mesh made of convex pieces.
    Mesh,
}

/// Trait implemented by all the shapes of this crate.
///
/// Every method is a pure function of the shape and its arguments, so shapes can be
/// shared freely between threads and queries.
pub trait Shape: SupportMap + Send + Sync {
    /// Tests if the given point, expressed in the shape-local frame, is inside of this shape.
    fn contains_local_point(&self, pt: &Point<Real>) -> bool;

    /// Tests if the given world-space point is inside of this shape positioned at `pos`.
    fn contains_point(&self, pos: &Isometry<Real>, pt: &Point<Real>) -> bool {
        self.contains_local_point(&pos.inverse_transform_point(pt))
    }

    /// Computes the AABB of this shape in its local frame.
    fn compute_local_aabb(&self) -> Aabb;

    /// Computes the AABB of this shape positioned at `pos`.
    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        bounding_volume::support_map_aabb(pos, self)
    }

    /// Computes the mass properties of this shape given its density.
    fn mass_properties(&self, density: Real) -> MassProperties;

    /// The moment of inertia of this shape about its local origin, for the given total mass.
    fn angular_inertia(&self, mass: Real) -> Real {
        self.mass_properties(1.0)
            .with_mass(mass)
            .angular_inertia_about_origin()
    }

    /// The area of this shape.
    fn area(&self) -> Real {
        self.mass_properties(1.0).mass
    }

    /// The distance from the local origin to the farthest point of this shape.
    fn max_radius(&self) -> Real;

    /// The type of this shape.
    fn shape_type(&self) -> ShapeType;
}

/// The shape of a collider.
///
/// This closed set of shapes is what the contact generator dispatches on.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColliderShape {
    /// A ball.
    Ball(Ball),
    /// A convex polygon (including boxes).
    ConvexPolygon(ConvexPolygon),
    /// A capsule.
    Capsule(Capsule),
    /// An ellipse.
    Ellipse(Ellipse),
    /// A mesh made of convex pieces.
    Mesh(MeshShape),
}

impl ColliderShape {
    /// A ball shape.
    pub fn ball(radius: Real) -> Self {
        ColliderShape::Ball(Ball::new(radius))
    }

    /// An axis-aligned box shape with the given half-extents.
    pub fn cuboid(hx: Real, hy: Real) -> Self {
        ColliderShape::ConvexPolygon(ConvexPolygon::cuboid(Vector::new(hx, hy)))
    }

    /// A capsule shape aligned with the local `x` axis.
    pub fn capsule_x(half_length: Real, radius: Real) -> Self {
        ColliderShape::Capsule(Capsule::new_x(half_length, radius))
    }

    /// An ellipse shape.
    pub fn ellipse(a: Real, b: Real) -> Self {
        ColliderShape::Ellipse(Ellipse::new(Vector::new(a, b)))
    }

    /// This shape as a trait-object.
    pub fn as_shape(&self) -> &dyn Shape {
        match self {
            ColliderShape::Ball(s) => s,
            ColliderShape::ConvexPolygon(s) => s,
            ColliderShape::Capsule(s) => s,
            ColliderShape::Ellipse(s) => s,
            ColliderShape::Mesh(s) => s,
        }
    }

    /// Converts this shape into a ball, if it is one.
    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            ColliderShape::Ball(b) => Some(b),
            _ => None,
        }
    }

    /// Converts this shape into a mesh, if it is one.
    pub fn as_mesh(&self) -> Option<&MeshShape> {
        match self {
            ColliderShape::Mesh(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Ball> for ColliderShape {
    fn from(s: Ball) -> Self {
        ColliderShape::Ball(s)
    }
}

impl From<ConvexPolygon> for ColliderShape {
    fn from(s: ConvexPolygon) -> Self {
        ColliderShape::ConvexPolygon(s)
    }
}

impl From<Capsule> for ColliderShape {
    fn from(s: Capsule) -> Self {
        ColliderShape::Capsule(s)
    }
}

impl From<Ellipse> for ColliderShape {
    fn from(s: Ellipse) -> Self {
        ColliderShape::Ellipse(s)
    }
}

impl From<MeshShape> for ColliderShape {
    fn from(s: MeshShape) -> Self {
        ColliderShape::Mesh(s)
    }
}

impl SupportMap for ColliderShape {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.as_shape().local_support_point(dir)
    }
}

impl Shape for ColliderShape {
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.as_shape().contains_local_point(pt)
    }

    fn compute_local_aabb(&self) -> Aabb {
        self.as_shape().compute_local_aabb()
    }

    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        self.as_shape().compute_aabb(pos)
    }

    fn mass_properties(&self, density: Real) -> MassProperties {
        self.as_shape().mass_properties(density)
    }

    fn max_radius(&self) -> Real {
        self.as_shape().max_radius()
    }

    fn shape_type(&self) -> ShapeType {
        self.as_shape().shape_type()
    }
}
