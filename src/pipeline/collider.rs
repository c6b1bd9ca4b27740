use core::ops::Index;
use std::sync::Arc;

use slab::Slab;

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::shape::{ColliderShape, Shape};

/// The identifier of a collider inside of a [`ColliderSet`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColliderHandle(pub u32);

impl ColliderHandle {
    /// The index of the collider in its set.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// A bit mask identifying collision groups.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Group: u32 {
        /// The group n°1.
        const GROUP_1 = 1 << 0;
        /// The group n°2.
        const GROUP_2 = 1 << 1;
        /// The group n°3.
        const GROUP_3 = 1 << 2;
        /// The group n°4.
        const GROUP_4 = 1 << 3;
        /// The group n°5.
        const GROUP_5 = 1 << 4;
        /// The group n°6.
        const GROUP_6 = 1 << 5;
        /// The group n°7.
        const GROUP_7 = 1 << 6;
        /// The group n°8.
        const GROUP_8 = 1 << 7;

        /// All of the groups.
        const ALL = u32::MAX;
        /// None of the groups.
        const NONE = 0;
    }
}

impl Default for Group {
    fn default() -> Self {
        Group::ALL
    }
}

/// Pairwise filtering using bit masks.
///
/// Two colliders interact if each one is a member of at least one group the other one
/// accepts in its filter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionGroups {
    /// Groups this collider is part of.
    pub memberships: Group,
    /// Groups this collider can interact with.
    pub filter: Group,
}

impl CollisionGroups {
    /// Creates new collision groups.
    pub const fn new(memberships: Group, filter: Group) -> Self {
        Self {
            memberships,
            filter,
        }
    }

    /// Can a collider with `self` groups interact with a collider with `rhs` groups?
    #[inline]
    pub fn test(self, rhs: Self) -> bool {
        self.memberships.intersects(rhs.filter) && rhs.memberships.intersects(self.filter)
    }
}

/// A shape placed in space, as seen by the contact pipeline.
///
/// The pose is owned by the body the collider is attached to; the caller copies it into
/// the collider with [`Collider::set_position`] before each detection pass.
#[derive(Clone, Debug)]
pub struct Collider {
    shape: Arc<ColliderShape>,
    position: Isometry<Real>,
    groups: CollisionGroups,
}

impl Collider {
    /// A collider at the origin, interacting with every other collider.
    pub fn new(shape: impl Into<ColliderShape>) -> Self {
        Self::from_shared(Arc::new(shape.into()))
    }

    /// A collider whose shape is shared with other colliders.
    pub fn from_shared(shape: Arc<ColliderShape>) -> Self {
        Self {
            shape,
            position: Isometry::identity(),
            groups: CollisionGroups::default(),
        }
    }

    /// Sets the pose of this collider.
    #[must_use]
    pub fn with_position(mut self, position: Isometry<Real>) -> Self {
        self.position = position;
        self
    }

    /// Sets the collision groups of this collider.
    #[must_use]
    pub fn with_groups(mut self, groups: CollisionGroups) -> Self {
        self.groups = groups;
        self
    }

    /// The shape of this collider.
    #[inline]
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// The shared handle of the shape of this collider.
    #[inline]
    pub fn shared_shape(&self) -> &Arc<ColliderShape> {
        &self.shape
    }

    /// The pose of this collider.
    #[inline]
    pub fn position(&self) -> &Isometry<Real> {
        &self.position
    }

    /// Moves this collider.
    #[inline]
    pub fn set_position(&mut self, position: Isometry<Real>) {
        self.position = position;
    }

    /// The collision groups of this collider.
    #[inline]
    pub fn groups(&self) -> CollisionGroups {
        self.groups
    }

    /// Changes the collision groups of this collider.
    #[inline]
    pub fn set_groups(&mut self, groups: CollisionGroups) {
        self.groups = groups;
    }

    /// The world-space bounding box of this collider.
    pub fn compute_aabb(&self) -> Aabb {
        self.shape.compute_aabb(&self.position)
    }
}

/// A set of colliders, addressed by [`ColliderHandle`]s.
///
/// Handles of removed colliders are recycled by later insertions.
#[derive(Clone, Debug, Default)]
pub struct ColliderSet {
    colliders: Slab<Collider>,
}

impl ColliderSet {
    /// An empty collider set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collider to this set.
    pub fn insert(&mut self, collider: Collider) -> ColliderHandle {
        ColliderHandle(self.colliders.insert(collider) as u32)
    }

    /// Removes a collider from this set.
    pub fn remove(&mut self, handle: ColliderHandle) -> Option<Collider> {
        self.colliders.try_remove(handle.index())
    }

    /// The collider identified by `handle`, if any.
    #[inline]
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle.index())
    }

    /// The collider identified by `handle`, if any.
    #[inline]
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle.index())
    }

    /// Does this set contain a collider identified by `handle`?
    #[inline]
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains(handle.index())
    }

    /// The number of colliders of this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Is this set empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterates through all the colliders of this set.
    pub fn iter(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> {
        self.colliders
            .iter()
            .map(|(i, c)| (ColliderHandle(i as u32), c))
    }
}

impl Index<ColliderHandle> for ColliderSet {
    type Output = Collider;

    fn index(&self, handle: ColliderHandle) -> &Collider {
        &self.colliders[handle.index()]
    }
}
