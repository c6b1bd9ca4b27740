//! Mass properties (area, center of mass, angular inertia) of shapes.

pub use self::mass_properties::MassProperties;

mod mass_properties;
mod mass_properties_ball;
mod mass_properties_capsule;
mod mass_properties_convex_polygon;
mod mass_properties_ellipse;
