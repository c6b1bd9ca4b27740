use crate::math::{Isometry, Point, Real, Vector};
use crate::pipeline::ColliderHandle;
use crate::query::Contact;

/// A contact between two colliders, as reported by the narrow phase.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactInfo {
    /// The first collider involved.
    pub collider1: ColliderHandle,
    /// The second collider involved.
    pub collider2: ColliderHandle,
    /// The convex piece of the first collider involved, `0` unless it is a mesh.
    pub subshape1: u32,
    /// The convex piece of the second collider involved, `0` unless it is a mesh.
    pub subshape2: u32,
    /// The contact point on the first collider, in world-space.
    pub point1: Point<Real>,
    /// The contact point on the first collider, in its local frame.
    pub local_point1: Point<Real>,
    /// The contact point on the second collider, in world-space.
    pub point2: Point<Real>,
    /// The contact point on the second collider, in its local frame.
    pub local_point2: Point<Real>,
    /// The world-space contact normal, pointing from the second collider toward the first.
    pub normal: Vector<Real>,
    /// The penetration depth along `normal`. Zero for touching shapes.
    pub depth: Real,
}

impl ContactInfo {
    /// Places a contact computed in the local frames of two colliders into world-space.
    pub fn from_local_contact(
        collider1: ColliderHandle,
        pos1: &Isometry<Real>,
        collider2: ColliderHandle,
        pos2: &Isometry<Real>,
        contact: &Contact,
    ) -> Self {
        Self {
            collider1,
            collider2,
            subshape1: contact.subshape1,
            subshape2: contact.subshape2,
            point1: pos1 * contact.point1,
            local_point1: contact.point1,
            point2: pos2 * contact.point2,
            local_point2: contact.point2,
            normal: -(pos1 * contact.normal1.into_inner()),
            depth: contact.depth(),
        }
    }

    /// The same contact, with the roles of both colliders swapped.
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            collider1: self.collider2,
            collider2: self.collider1,
            subshape1: self.subshape2,
            subshape2: self.subshape1,
            point1: self.point2,
            local_point1: self.local_point2,
            point2: self.point1,
            local_point2: self.local_point1,
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::UnitVector;

    #[test]
    fn local_contact_to_world() {
        let contact = Contact::new(
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            UnitVector::new_unchecked(Vector::x()),
            UnitVector::new_unchecked(-Vector::x()),
            -0.5,
        );
        let info = ContactInfo::from_local_contact(
            ColliderHandle(0),
            &Isometry::identity(),
            ColliderHandle(1),
            &Isometry::translation(1.5, 0.0),
            &contact,
        );

        assert_relative_eq!(info.normal, Vector::new(-1.0, 0.0));
        assert_relative_eq!(info.depth, 0.5);
        assert_relative_eq!(info.point2, Point::new(0.5, 0.0));

        let flipped = info.flipped();
        assert_eq!(flipped.collider1, ColliderHandle(1));
        assert_relative_eq!(flipped.normal, Vector::new(1.0, 0.0));
        assert_relative_eq!(flipped.point1, Point::new(0.5, 0.0));
    }
}
