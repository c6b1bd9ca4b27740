use arrayvec::ArrayVec;
use hashbrown::{HashMap, HashSet};

use crate::math::{Isometry, Point, Real, Vector};
use crate::pipeline::{ColliderHandle, ContactInfo};
use crate::utils::SortedPair;

/// The maximum number of contacts kept by a [`ContactManifold`].
pub const MAX_MANIFOLD_POINTS: usize = 2;

/// Parameters of a [`ManifoldRegistry`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManifoldRegistryOptions {
    /// Squared distance under which a new contact is identified with a stored one, and
    /// above which the tangential drift of a stored contact invalidates it.
    pub drift_sq_threshold: Real,
}

impl Default for ManifoldRegistryOptions {
    fn default() -> Self {
        Self {
            drift_sq_threshold: 0.02 * 0.02,
        }
    }
}

/// A contact point persisted across frames.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackedContact<Data> {
    /// The contact point in the local-space of the first collider of the manifold.
    pub local_p1: Point<Real>,
    /// The contact point in the local-space of the second collider of the manifold.
    pub local_p2: Point<Real>,
    /// The contact normal in the local-space of the first collider, pointing toward the second.
    pub local_n1: Vector<Real>,
    /// The penetration depth last reported for this contact.
    pub depth: Real,
    /// The convex piece of the first collider involved.
    pub subshape1: u32,
    /// The convex piece of the second collider involved.
    pub subshape2: u32,
    /// The last frame this contact was reported in.
    pub last_seen: u64,
    /// Solver data attached to this contact, kept as long as the contact persists.
    pub data: Data,
}

impl<Data> TrackedContact<Data> {
    /// Is this contact still valid after the colliders moved to `pos1` and `pos2`?
    ///
    /// A contact is dropped once its attachment points no longer penetrate along the stored
    /// normal, or once they slid apart tangentially by more than `drift_sq_threshold`.
    fn survives(
        &self,
        pos1: &Isometry<Real>,
        pos2: &Isometry<Real>,
        drift_sq_threshold: Real,
    ) -> bool {
        let normal = pos1 * self.local_n1;
        let diff = pos1 * self.local_p1 - pos2 * self.local_p2;
        let depth = diff.dot(&normal);
        let tangential = diff - normal * depth;

        depth >= 0.0 && tangential.norm_squared() <= drift_sq_threshold
    }
}

/// The persistent contacts between two colliders.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactManifold<Data> {
    /// The first collider, in the order of the first contact ever reported for this pair.
    pub collider1: ColliderHandle,
    /// The second collider.
    pub collider2: ColliderHandle,
    /// The contacts of this manifold.
    pub points: ArrayVec<TrackedContact<Data>, MAX_MANIFOLD_POINTS>,
}

impl<Data> ContactManifold<Data> {
    fn new(collider1: ColliderHandle, collider2: ColliderHandle) -> Self {
        Self {
            collider1,
            collider2,
            points: ArrayVec::new(),
        }
    }

    /// The number of contacts of this manifold.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Does this manifold have no contact?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Storage of the contact manifolds of every touching collider pair, persisted from one
/// frame to the next so solvers can warm-start from the data attached to each contact.
///
/// Each frame, the narrow phase feeds its contacts through [`Self::add_contact`], then
/// [`Self::validate`] drops every contact that was not reported again.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManifoldRegistry<Data> {
    options: ManifoldRegistryOptions,
    colliders: HashSet<ColliderHandle>,
    manifolds: HashMap<SortedPair<ColliderHandle>, ContactManifold<Data>>,
    frame: u64,
}

impl<Data: Default + Copy> Default for ManifoldRegistry<Data> {
    fn default() -> Self {
        Self::new(ManifoldRegistryOptions::default())
    }
}

impl<Data: Default + Copy> ManifoldRegistry<Data> {
    /// An empty registry.
    pub fn new(options: ManifoldRegistryOptions) -> Self {
        Self {
            options,
            colliders: HashSet::new(),
            manifolds: HashMap::new(),
            frame: 0,
        }
    }

    /// The parameters of this registry.
    #[inline]
    pub fn options(&self) -> &ManifoldRegistryOptions {
        &self.options
    }

    /// The current frame, advanced by [`Self::validate`].
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Allows contacts involving `collider` to be added.
    pub fn register_collider(&mut self, collider: ColliderHandle) {
        let _ = self.colliders.insert(collider);
    }

    /// Is `collider` registered?
    #[inline]
    pub fn is_registered(&self, collider: ColliderHandle) -> bool {
        self.colliders.contains(&collider)
    }

    /// Unregisters `collider` and drops every manifold involving it.
    ///
    /// Returns `false` if the collider was not registered.
    pub fn unregister_collider(&mut self, collider: ColliderHandle) -> bool {
        if !self.colliders.remove(&collider) {
            return false;
        }

        self.manifolds.retain(|pair, _| !pair.contains(collider));
        true
    }

    /// Merges a contact reported this frame into the manifold of its collider pair.
    ///
    /// `pos1` and `pos2` are the current poses of `contact.collider1` and `contact.collider2`.
    ///
    /// Stored contacts that stopped penetrating or drifted apart are dropped first. The new
    /// contact then either refreshes the depth of the closest stored contact within the drift
    /// threshold, keeping its solver data, or is inserted. Past two contacts, only the deepest
    /// and the one farthest from it are kept.
    ///
    /// # Panics
    ///
    /// Panics if either collider is not registered.
    pub fn add_contact(
        &mut self,
        contact: &ContactInfo,
        pos1: &Isometry<Real>,
        pos2: &Isometry<Real>,
    ) {
        assert!(
            self.is_registered(contact.collider1) && self.is_registered(contact.collider2),
            "Contact reported between unregistered colliders {:?} and {:?}.",
            contact.collider1,
            contact.collider2
        );

        let key = SortedPair::new(contact.collider1, contact.collider2);
        let manifold = self
            .manifolds
            .entry(key)
            .or_insert_with(|| ContactManifold::new(contact.collider1, contact.collider2));

        let (contact, pos1, pos2) = if manifold.collider1 == contact.collider1 {
            (*contact, pos1, pos2)
        } else {
            (contact.flipped(), pos2, pos1)
        };

        let threshold = self.options.drift_sq_threshold;
        manifold.points.retain(|pt| pt.survives(pos1, pos2, threshold));

        let mut closest = None;
        let mut closest_dist = threshold;
        for (i, pt) in manifold.points.iter().enumerate() {
            if pt.subshape1 != contact.subshape1 || pt.subshape2 != contact.subshape2 {
                continue;
            }

            let dist = na::distance_squared(&pt.local_p1, &contact.local_point1);
            if dist <= closest_dist {
                closest = Some(i);
                closest_dist = dist;
            }
        }

        if let Some(i) = closest {
            let pt = &mut manifold.points[i];
            pt.depth = contact.depth;
            pt.last_seen = self.frame;
            return;
        }

        let new_point = TrackedContact {
            local_p1: contact.local_point1,
            local_p2: contact.local_point2,
            local_n1: pos1.inverse_transform_vector(&-contact.normal),
            depth: contact.depth,
            subshape1: contact.subshape1,
            subshape2: contact.subshape2,
            last_seen: self.frame,
            data: Data::default(),
        };

        if let Err(err) = manifold.points.try_push(new_point) {
            let mut candidates: ArrayVec<_, { MAX_MANIFOLD_POINTS + 1 }> =
                manifold.points.iter().copied().collect();
            candidates.push(err.element());
            manifold.points = reduce(&candidates);
        }
    }

    /// Ends the current frame.
    ///
    /// Drops every contact that was not reported during this frame, then every manifold left
    /// without contact.
    pub fn validate(&mut self) {
        let frame = self.frame;

        self.manifolds.retain(|_, manifold| {
            manifold.points.retain(|pt| pt.last_seen == frame);
            !manifold.points.is_empty()
        });

        self.frame += 1;
    }

    /// The contacts between `collider1` and `collider2`, in any order.
    pub fn contacts(
        &self,
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    ) -> &[TrackedContact<Data>] {
        self.manifold(collider1, collider2)
            .map(|m| &m.points[..])
            .unwrap_or(&[])
    }

    /// The manifold between `collider1` and `collider2`, in any order.
    pub fn manifold(
        &self,
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    ) -> Option<&ContactManifold<Data>> {
        self.manifolds.get(&SortedPair::new(collider1, collider2))
    }

    /// The manifold between `collider1` and `collider2`, in any order.
    pub fn manifold_mut(
        &mut self,
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    ) -> Option<&mut ContactManifold<Data>> {
        self.manifolds.get_mut(&SortedPair::new(collider1, collider2))
    }

    /// Iterates through all the manifolds.
    pub fn manifolds(&self) -> impl Iterator<Item = &ContactManifold<Data>> {
        self.manifolds.values()
    }

    /// The number of manifolds.
    #[inline]
    pub fn len(&self) -> usize {
        self.manifolds.len()
    }

    /// Is there no manifold?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.manifolds.is_empty()
    }
}

/// Keeps the deepest contact and the one farthest from it.
fn reduce<Data: Copy>(
    candidates: &[TrackedContact<Data>],
) -> ArrayVec<TrackedContact<Data>, MAX_MANIFOLD_POINTS> {
    let mut deepest = 0;
    for (i, pt) in candidates.iter().enumerate().skip(1) {
        if pt.depth > candidates[deepest].depth {
            deepest = i;
        }
    }

    let mut farthest = None;
    let mut farthest_dist = -1.0;
    for (i, pt) in candidates.iter().enumerate() {
        if i == deepest {
            continue;
        }

        let dist = na::distance_squared(&pt.local_p1, &candidates[deepest].local_p1);
        if dist > farthest_dist {
            farthest = Some(i);
            farthest_dist = dist;
        }
    }

    let mut result = ArrayVec::new();
    result.push(candidates[deepest]);
    if let Some(i) = farthest {
        result.push(candidates[i]);
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;

    fn contact(p1: Point<Real>, p2: Point<Real>, depth: Real) -> ContactInfo {
        ContactInfo {
            collider1: ColliderHandle(0),
            collider2: ColliderHandle(1),
            subshape1: 0,
            subshape2: 0,
            point1: p1,
            local_point1: p1,
            point2: p2,
            local_point2: p2,
            normal: -Vector::y(),
            depth,
        }
    }

    #[test]
    fn reduction_keeps_deepest_and_farthest() {
        let pt = |x: Real, depth: Real| TrackedContact {
            local_p1: Point::new(x, 0.0),
            local_p2: Point::new(x, 0.0),
            local_n1: Vector::y(),
            depth,
            subshape1: 0,
            subshape2: 0,
            last_seen: 0,
            data: (),
        };

        let kept = reduce(&[pt(0.0, 0.1), pt(1.0, 0.3), pt(3.0, 0.1)]);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].local_p1.x, 1.0);
        assert_eq!(kept[1].local_p1.x, 3.0);

        // Equally far candidates: the first one wins.
        let kept = reduce(&[pt(-1.0, 0.1), pt(0.0, 0.3), pt(1.0, 0.1)]);
        assert_eq!(kept[1].local_p1.x, -1.0);
    }

    #[test]
    fn reversed_contacts_feed_the_same_manifold() {
        let mut registry = ManifoldRegistry::<()>::default();
        registry.register_collider(ColliderHandle(0));
        registry.register_collider(ColliderHandle(1));

        let c = contact(Point::new(0.0, 0.5), Point::new(0.0, -0.5), 0.0);
        let pos2 = Isometry::translation(0.0, 1.0);
        registry.add_contact(&c, &Isometry::identity(), &pos2);
        registry.add_contact(&c.flipped(), &pos2, &Isometry::identity());

        assert_eq!(registry.len(), 1);
        let manifold = registry.manifold(ColliderHandle(1), ColliderHandle(0)).unwrap();
        assert_eq!(manifold.collider1, ColliderHandle(0));
        assert_eq!(manifold.len(), 1);
        assert_relative_eq!(manifold.points[0].local_n1, Vector::y());
    }
}
