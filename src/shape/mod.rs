//! Shapes supported by impact2d.

pub use self::ball::Ball;
pub use self::capsule::Capsule;
pub use self::convex_polygon::ConvexPolygon;
pub use self::ellipse::Ellipse;
pub use self::error::{MeshError, ShapeError};
pub use self::mesh_shape::MeshShape;
#[doc(inline)]
pub use self::shape::{ColliderShape, Shape, ShapeType};
#[doc(inline)]
pub use self::support_map::SupportMap;

mod ball;
mod capsule;
mod convex_polygon;
mod ellipse;
mod error;
mod mesh_shape;
mod shape;
mod support_map;
