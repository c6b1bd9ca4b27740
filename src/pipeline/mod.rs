//! Contact pipeline: colliders, narrow-phase contact generation and manifold persistence.

pub use self::collider::{Collider, ColliderHandle, ColliderSet, CollisionGroups, Group};
pub use self::contact_info::ContactInfo;
pub use self::manifold_registry::{
    ContactManifold, ManifoldRegistry, ManifoldRegistryOptions, TrackedContact,
    MAX_MANIFOLD_POINTS,
};
pub use self::narrow_phase::{ClosestPoints, ContactStream, NarrowPhase, NarrowPhaseOptions};

mod collider;
mod contact_info;
mod manifold_registry;
mod narrow_phase;
