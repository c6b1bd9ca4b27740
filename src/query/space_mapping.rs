use crate::math::{Isometry, Point, Real, Vector};

/// The relative placement of two shapes.
///
/// Stores both poses together with the two relative poses derived from them, so that points
/// and vectors can be moved between world space and either local frame without recomputing
/// an inverse per conversion. A mapping must be refreshed with [`SpaceMapping::update`]
/// whenever one of the poses changes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpaceMapping {
    pos1: Isometry<Real>,
    pos2: Isometry<Real>,
    pos12: Isometry<Real>,
    pos21: Isometry<Real>,
}

impl SpaceMapping {
    /// Builds the mapping between shapes placed at `pos1` and `pos2`.
    pub fn new(pos1: &Isometry<Real>, pos2: &Isometry<Real>) -> Self {
        let pos12 = pos1.inv_mul(pos2);
        Self {
            pos1: *pos1,
            pos2: *pos2,
            pos12,
            pos21: pos12.inverse(),
        }
    }

    /// Recomputes this mapping for new poses.
    pub fn update(&mut self, pos1: &Isometry<Real>, pos2: &Isometry<Real>) {
        *self = Self::new(pos1, pos2);
    }

    /// The same mapping with the roles of the two shapes swapped.
    #[inline]
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            pos1: self.pos2,
            pos2: self.pos1,
            pos12: self.pos21,
            pos21: self.pos12,
        }
    }

    /// The pose of the first shape.
    #[inline]
    pub fn pos1(&self) -> &Isometry<Real> {
        &self.pos1
    }

    /// The pose of the second shape.
    #[inline]
    pub fn pos2(&self) -> &Isometry<Real> {
        &self.pos2
    }

    /// The pose of the second shape in the local frame of the first.
    #[inline]
    pub fn pos12(&self) -> &Isometry<Real> {
        &self.pos12
    }

    /// The pose of the first shape in the local frame of the second.
    #[inline]
    pub fn pos21(&self) -> &Isometry<Real> {
        &self.pos21
    }

    /// Expresses a world-space point in the local frame of the first shape.
    #[inline]
    pub fn point_to_local1(&self, pt: &Point<Real>) -> Point<Real> {
        self.pos1.inverse_transform_point(pt)
    }

    /// Expresses a world-space point in the local frame of the second shape.
    #[inline]
    pub fn point_to_local2(&self, pt: &Point<Real>) -> Point<Real> {
        self.pos2.inverse_transform_point(pt)
    }

    /// Expresses a world-space vector in the local frame of the first shape.
    #[inline]
    pub fn vector_to_local1(&self, v: &Vector<Real>) -> Vector<Real> {
        self.pos1.inverse_transform_vector(v)
    }

    /// Expresses a world-space vector in the local frame of the second shape.
    #[inline]
    pub fn vector_to_local2(&self, v: &Vector<Real>) -> Vector<Real> {
        self.pos2.inverse_transform_vector(v)
    }

    /// Moves a point from the local frame of the first shape to the local frame of the second.
    #[inline]
    pub fn point_1_to_2(&self, pt: &Point<Real>) -> Point<Real> {
        self.pos21 * pt
    }

    /// Moves a point from the local frame of the second shape to the local frame of the first.
    #[inline]
    pub fn point_2_to_1(&self, pt: &Point<Real>) -> Point<Real> {
        self.pos12 * pt
    }

    /// Moves a vector from the local frame of the first shape to the local frame of the second.
    #[inline]
    pub fn vector_1_to_2(&self, v: &Vector<Real>) -> Vector<Real> {
        self.pos21 * v
    }

    /// Moves a vector from the local frame of the second shape to the local frame of the first.
    #[inline]
    pub fn vector_2_to_1(&self, v: &Vector<Real>) -> Vector<Real> {
        self.pos12 * v
    }

    /// Expresses a point given in the local frame of the first shape in world-space.
    #[inline]
    pub fn local1_to_world(&self, pt: &Point<Real>) -> Point<Real> {
        self.pos1 * pt
    }

    /// Expresses a point given in the local frame of the second shape in world-space.
    #[inline]
    pub fn local2_to_world(&self, pt: &Point<Real>) -> Point<Real> {
        self.pos2 * pt
    }
}

#[cfg(test)]
mod test {
    use super::SpaceMapping;
    use crate::math::{Isometry, Point, Vector};

    #[test]
    fn local_frames_round_trip() {
        let pos1 = Isometry::new(Vector::new(1.0, 2.0), 0.3);
        let pos2 = Isometry::new(Vector::new(-3.0, 0.5), -1.2);
        let mapping = SpaceMapping::new(&pos1, &pos2);
        let pt = Point::new(0.7, -4.0);

        let in1 = mapping.point_to_local1(&pt);
        let in2 = mapping.point_to_local2(&pt);
        assert_relative_eq!(mapping.local1_to_world(&in1), pt, epsilon = 1.0e-5);
        assert_relative_eq!(mapping.local2_to_world(&in2), pt, epsilon = 1.0e-5);
        assert_relative_eq!(mapping.point_1_to_2(&in1), in2, epsilon = 1.0e-5);
        assert_relative_eq!(mapping.point_2_to_1(&in2), in1, epsilon = 1.0e-5);
    }

    #[test]
    fn inverted_mapping_swaps_the_shapes() {
        let pos1 = Isometry::new(Vector::new(1.0, 2.0), 0.3);
        let pos2 = Isometry::new(Vector::new(-3.0, 0.5), -1.2);
        let inverted = SpaceMapping::new(&pos1, &pos2).inverted();
        let swapped = SpaceMapping::new(&pos2, &pos1);

        assert_relative_eq!(*inverted.pos12(), *swapped.pos12(), epsilon = 1.0e-5);
        assert_relative_eq!(*inverted.pos21(), *swapped.pos21(), epsilon = 1.0e-5);
        assert_eq!(inverted.pos1(), swapped.pos1());
    }
}
