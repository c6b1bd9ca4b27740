//! Time of impact of shapes undergoing rigid motions.

pub use self::rigid_motion::RigidMotion;
pub use self::time_of_impact::{time_of_impact, TimeOfImpactOptions};

mod rigid_motion;
mod time_of_impact;
