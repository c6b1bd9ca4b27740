//! Contact generation between pairs of shapes.

pub use self::contact_manifolds_ball_ball::contact_manifold_ball_ball;
pub use self::contact_manifolds_polygon_ball::{
    contact_manifold_ball_polygon, contact_manifold_polygon_ball,
};
pub use self::contact_manifolds_polygon_polygon::contact_manifold_polygon_polygon;
pub use self::contact_manifolds_shape_shape::contacts_shape_shape;
pub use self::contact_manifolds_support_map_support_map::contact_manifold_support_map_support_map;

use crate::query::Contact;
use smallvec::SmallVec;

/// Buffer receiving the contacts computed for one pair of shapes.
///
/// Convex pairs produce at most two contacts; mesh pairs may spill to the heap.
pub type ContactBuffer = SmallVec<[Contact; 4]>;

mod contact_manifolds_ball_ball;
mod contact_manifolds_polygon_ball;
mod contact_manifolds_polygon_polygon;
mod contact_manifolds_shape_shape;
mod contact_manifolds_support_map_support_map;
