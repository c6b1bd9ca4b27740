//! Various unsorted geometrical and logical operators.

pub use self::ccw_face_normal::ccw_face_normal;
pub use self::cov::{center, center_cov, cov};
pub(crate) use self::inv::inv;
pub use self::point_cloud_support_point::{
    point_cloud_support_point, point_cloud_support_point_id,
};
pub use self::polygon::{is_convex_ccw, orientation, signed_area, Orientation};
pub use self::segment::{project_point_on_segment, SegmentProjection};
pub use self::sorted_pair::SortedPair;

mod ccw_face_normal;
mod cov;
mod inv;
mod point_cloud_support_point;
mod polygon;
mod segment;
mod sorted_pair;
