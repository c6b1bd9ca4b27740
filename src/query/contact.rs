use crate::math::{Point, Real, UnitVector};
use core::mem;

/// Geometric description of a contact point between two shapes.
///
/// Every field is expressed in the local frame of the shape it belongs to.
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contact {
    /// Position of the contact on the first shape, in the local frame of the first shape.
    pub point1: Point<Real>,

    /// Position of the contact on the second shape, in the local frame of the second shape.
    pub point2: Point<Real>,

    /// Contact normal, pointing out of the first shape, in the local frame of the first shape.
    pub normal1: UnitVector<Real>,

    /// Contact normal, pointing out of the second shape, in the local frame of the second shape.
    pub normal2: UnitVector<Real>,

    /// Signed distance between the two contact points.
    ///
    /// Negative when the shapes are penetrating, in which case the penetration depth
    /// is `-dist`.
    pub dist: Real,

    /// Index of the convex piece of the first shape involved, zero for convex shapes.
    pub subshape1: u32,

    /// Index of the convex piece of the second shape involved, zero for convex shapes.
    pub subshape2: u32,
}

impl Contact {
    /// Creates a new contact between two convex shapes.
    #[inline]
    pub fn new(
        point1: Point<Real>,
        point2: Point<Real>,
        normal1: UnitVector<Real>,
        normal2: UnitVector<Real>,
        dist: Real,
    ) -> Self {
        Contact {
            point1,
            point2,
            normal1,
            normal2,
            dist,
            subshape1: 0,
            subshape2: 0,
        }
    }

    /// The penetration depth of this contact, zero or positive when the shapes touch.
    #[inline]
    pub fn depth(&self) -> Real {
        -self.dist
    }

    /// Swaps the roles of the two shapes.
    #[inline]
    pub fn flip(&mut self) {
        mem::swap(&mut self.point1, &mut self.point2);
        mem::swap(&mut self.normal1, &mut self.normal2);
        mem::swap(&mut self.subshape1, &mut self.subshape2);
    }

    /// Returns a copy of this contact with the roles of the two shapes swapped.
    #[inline]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }
}
