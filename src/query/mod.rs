//! Non-persistent geometric queries.
//!
//! The most general functions provided by this module are:
//!
//! * [`contacts_shape_shape()`] to compute every contact point between two colliders shapes,
//!   including penetrating contacts, by dispatching to the specialized generators below.
//! * [`gjk::distance()`] to compute the distance between two convex shapes.
//! * [`time_of_impact()`] to determine when two shapes undergoing rigid motions first touch.
//!
//! All the queries work on pairs of shapes placed in space through a [`SpaceMapping`]
//! and express their results in the local frames of the shapes.
//!
//! # Specific cases
//! The functions exported by the `details` submodule are the specialized contact generators
//! the dispatcher relies on. They have the form `contact_manifold_[shape1]_[shape2]()`.

pub use self::contact::Contact;
pub use self::contact_manifolds::{contacts_shape_shape, ContactBuffer};
pub use self::space_mapping::SpaceMapping;
pub use self::time_of_impact::{time_of_impact, RigidMotion, TimeOfImpactOptions};

mod contact;
mod contact_manifolds;
pub mod epa;
pub mod gjk;
pub mod sat;
mod space_mapping;
mod time_of_impact;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::contact_manifolds::{
        contact_manifold_ball_ball, contact_manifold_ball_polygon, contact_manifold_polygon_ball,
        contact_manifold_polygon_polygon, contact_manifold_support_map_support_map,
    };
}
