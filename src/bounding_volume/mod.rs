//! Bounding volumes.

#[doc(inline)]
pub use crate::bounding_volume::aabb::Aabb;
#[doc(inline)]
pub use crate::bounding_volume::bounding_volume::BoundingVolume;
#[doc(inline)]
pub use crate::bounding_volume::obb::Obb;

pub use crate::bounding_volume::aabb_utils::{
    local_point_cloud_aabb, point_cloud_aabb, support_map_aabb,
};

#[doc(hidden)]
pub mod aabb;
mod aabb_utils;
#[doc(hidden)]
pub mod bounding_volume;
#[doc(hidden)]
pub mod obb;
