//! Application of the Separating-Axis-Theorem (SAT).

pub use self::sat_polygon_ball::polygon_ball_compute_separation;
pub use self::sat_polygon_polygon::polygon_polygon_compute_separation_features;

mod sat_polygon_ball;
mod sat_polygon_polygon;
