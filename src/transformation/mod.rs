//! Transformation, simplification and decomposition of polygons.

pub use self::convex_decomposition::{convex_decomposition, DecompositionError};
pub use self::convex_hull2::convex_hull;

mod convex_decomposition;
mod convex_hull2;
mod vertex_ring;
