use crate::math::{Point, Real, Vector};
use crate::pipeline::{ColliderHandle, ColliderSet, ContactInfo};
use crate::query::epa::Epa;
use crate::query::gjk::{self, GjkOptions, Simplex};
use crate::query::{contacts_shape_shape, ContactBuffer, SpaceMapping};
use crate::shape::{ColliderShape, Shape};

/// Parameters of the [`NarrowPhase`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NarrowPhaseOptions {
    /// Parameters of the GJK queries run by the contact generators.
    pub gjk: GjkOptions,
}

/// The closest points between two colliders, in world-space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClosestPoints {
    /// The distance between the colliders, `0.0` if they overlap.
    pub distance: Real,
    /// The point of the first collider closest to the second one.
    ///
    /// Not meaningful if `distance` is zero.
    pub point1: Point<Real>,
    /// The point of the second collider closest to the first one.
    ///
    /// Not meaningful if `distance` is zero.
    pub point2: Point<Real>,
}

/// Computes the contacts between pairs of colliders selected by a broad phase.
#[derive(Copy, Clone, Debug, Default)]
pub struct NarrowPhase {
    options: NarrowPhaseOptions,
}

impl NarrowPhase {
    /// A narrow phase with the given parameters.
    pub fn new(options: NarrowPhaseOptions) -> Self {
        Self { options }
    }

    /// The parameters of this narrow phase.
    #[inline]
    pub fn options(&self) -> &NarrowPhaseOptions {
        &self.options
    }

    /// Lazily computes the contacts between each pair of colliders.
    ///
    /// Pairs whose collision groups do not interact, pairs made of the same collider twice and
    /// pairs referencing a collider missing from `colliders` are skipped. The contacts of a
    /// pair are only computed once the stream reaches it.
    pub fn detect_contacts<'a, I>(
        &self,
        colliders: &'a ColliderSet,
        pairs: I,
    ) -> ContactStream<'a, I::IntoIter>
    where
        I: IntoIterator<Item = (ColliderHandle, ColliderHandle)>,
    {
        ContactStream {
            colliders,
            pairs: pairs.into_iter(),
            options: self.options,
            simplex: Simplex::new(),
            epa: Epa::new(),
            buffer: ContactBuffer::new(),
            next: 0,
            current: None,
        }
    }

    /// Computes the closest points between two colliders.
    ///
    /// Meshes are handled piece by piece. Returns `None` if either collider is missing from
    /// `colliders`.
    pub fn closest_points(
        &self,
        colliders: &ColliderSet,
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    ) -> Option<ClosestPoints> {
        let c1 = colliders.get(collider1)?;
        let c2 = colliders.get(collider2)?;
        let mapping = SpaceMapping::new(c1.position(), c2.position());
        let mut simplex = Simplex::new();
        let mut best: Option<ClosestPoints> = None;

        for_each_convex_part(c1.shape(), |g1| {
            for_each_convex_part(c2.shape(), |g2| {
                if best.map(|b| b.distance == 0.0).unwrap_or(false) {
                    return;
                }

                let distance = gjk::distance(
                    g1,
                    g2,
                    &mapping,
                    &Vector::zeros(),
                    &self.options.gjk,
                    &mut simplex,
                );

                if best.map(|b| distance < b.distance).unwrap_or(true) {
                    let (pt1, pt2) = gjk::closest_points(&simplex);
                    best = Some(ClosestPoints {
                        distance,
                        point1: mapping.local1_to_world(&pt1),
                        point2: mapping.local1_to_world(&pt2),
                    });
                }
            })
        });

        best
    }
}

fn for_each_convex_part(shape: &ColliderShape, mut f: impl FnMut(&dyn Shape)) {
    match shape.as_mesh() {
        Some(mesh) => mesh.pieces().iter().for_each(|piece| f(piece)),
        None => f(shape.as_shape()),
    }
}

/// The contacts computed by [`NarrowPhase::detect_contacts`].
///
/// The GJK and EPA scratch space is allocated once per stream and reused for every pair.
pub struct ContactStream<'a, I> {
    colliders: &'a ColliderSet,
    pairs: I,
    options: NarrowPhaseOptions,
    simplex: Simplex,
    epa: Epa,
    buffer: ContactBuffer,
    next: usize,
    current: Option<(ColliderHandle, ColliderHandle, SpaceMapping)>,
}

impl<I> ContactStream<'_, I>
where
    I: Iterator<Item = (ColliderHandle, ColliderHandle)>,
{
    /// Fills the buffer with the contacts of the next pair. Returns `false` once all pairs are consumed.
    fn advance(&mut self) -> bool {
        self.buffer.clear();
        self.next = 0;
        self.current = None;

        let Some((h1, h2)) = self.pairs.next() else {
            return false;
        };

        let (Some(c1), Some(c2)) = (self.colliders.get(h1), self.colliders.get(h2)) else {
            log::debug!("Skipping pair ({:?}, {:?}): unknown collider.", h1, h2);
            return true;
        };

        if h1 == h2 || !c1.groups().test(c2.groups()) {
            return true;
        }

        let mapping = SpaceMapping::new(c1.position(), c2.position());
        contacts_shape_shape(
            &mapping,
            c1.shape(),
            c2.shape(),
            &self.options.gjk,
            &mut self.simplex,
            &mut self.epa,
            &mut self.buffer,
        );
        log::trace!(
            "{} contacts between {:?} and {:?}.",
            self.buffer.len(),
            h1,
            h2
        );

        self.current = Some((h1, h2, mapping));
        true
    }
}

impl<I> Iterator for ContactStream<'_, I>
where
    I: Iterator<Item = (ColliderHandle, ColliderHandle)>,
{
    type Item = ContactInfo;

    fn next(&mut self) -> Option<ContactInfo> {
        loop {
            if let Some((h1, h2, mapping)) = &self.current {
                if let Some(contact) = self.buffer.get(self.next) {
                    self.next += 1;
                    return Some(ContactInfo::from_local_contact(
                        *h1,
                        mapping.pos1(),
                        *h2,
                        mapping.pos2(),
                        contact,
                    ));
                }
            }

            if !self.advance() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Isometry;
    use crate::pipeline::{Collider, CollisionGroups, Group};

    #[test]
    fn stream_reports_world_contacts() {
        let mut colliders = ColliderSet::new();
        let h1 = colliders.insert(Collider::new(ColliderShape::ball(1.0)));
        let h2 = colliders.insert(
            Collider::new(ColliderShape::ball(1.0)).with_position(Isometry::translation(1.5, 0.0)),
        );

        let contacts: Vec<_> = NarrowPhase::default()
            .detect_contacts(&colliders, [(h1, h2)])
            .collect();

        assert_eq!(contacts.len(), 1);
        assert_relative_eq!(contacts[0].normal, Vector::new(-1.0, 0.0), epsilon = 1.0e-6);
        assert_relative_eq!(contacts[0].depth, 0.5, epsilon = 1.0e-6);
        assert_relative_eq!(contacts[0].point1, Point::new(1.0, 0.0), epsilon = 1.0e-6);
        assert_relative_eq!(contacts[0].point2, Point::new(0.5, 0.0), epsilon = 1.0e-6);
    }

    #[test]
    fn filtered_and_unknown_pairs_are_skipped() {
        let mut colliders = ColliderSet::new();
        let ground = colliders.insert(Collider::new(ColliderShape::cuboid(5.0, 0.5)));
        let ghost = colliders.insert(
            Collider::new(ColliderShape::ball(0.5))
                .with_position(Isometry::translation(0.0, 0.9))
                .with_groups(CollisionGroups::new(Group::GROUP_2, Group::NONE)),
        );
        let ball = colliders.insert(
            Collider::new(ColliderShape::ball(0.5)).with_position(Isometry::translation(2.0, 0.9)),
        );
        let missing = ColliderHandle(42);

        let pairs = [(ground, ghost), (ground, missing), (ground, ground), (ground, ball)];
        let contacts: Vec<_> = NarrowPhase::default()
            .detect_contacts(&colliders, pairs)
            .collect();

        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].collider2, ball);
        assert_relative_eq!(contacts[0].normal, -Vector::y(), epsilon = 1.0e-6);
    }

    #[test]
    fn closest_points_between_separated_boxes() {
        let mut colliders = ColliderSet::new();
        let h1 = colliders.insert(Collider::new(ColliderShape::cuboid(0.5, 0.5)));
        let h2 = colliders.insert(
            Collider::new(ColliderShape::cuboid(0.5, 0.5))
                .with_position(Isometry::translation(3.0, 0.0)),
        );

        let narrow_phase = NarrowPhase::default();
        let res = narrow_phase.closest_points(&colliders, h1, h2).unwrap();
        assert_relative_eq!(res.distance, 2.0, epsilon = 1.0e-5);
        assert_relative_eq!(res.point1.x, 0.5, epsilon = 1.0e-5);
        assert_relative_eq!(res.point2.x, 2.5, epsilon = 1.0e-5);

        let res = narrow_phase.closest_points(&colliders, h2, h1).unwrap();
        assert_relative_eq!(res.point1.x, 2.5, epsilon = 1.0e-5);
    }
}
