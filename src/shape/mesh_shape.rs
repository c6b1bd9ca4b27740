use crate::bounding_volume::{self, Aabb};
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Point, Real, Vector};
use crate::partitioning::ObbTree;
use crate::shape::{ConvexPolygon, MeshError, Shape, ShapeType, SupportMap};
use crate::transformation;
use crate::utils;

/// A non-convex shape made of convex pieces.
///
/// The pieces are indexed by an [`ObbTree`] so that contact generation only visits the
/// pieces close to the other shape. The support function is the one of the convex
/// hull of all the pieces, which is what distance and time-of-impact queries see.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct MeshShape {
    pieces: Vec<ConvexPolygon>,
    tree: ObbTree,
    hull: Vec<Point<Real>>,
    unit_mass_properties: MassProperties,
}

impl MeshShape {
    /// Builds a mesh shape from a flat list of triangles.
    ///
    /// Each triangle becomes one piece, in the same order. Triangles may be given in
    /// either orientation.
    pub fn new(triangles: &[[Point<Real>; 3]]) -> Result<Self, MeshError> {
        let pieces = triangles
            .iter()
            .enumerate()
            .map(|(i, tri)| {
                ConvexPolygon::from_convex_polyline(tri.to_vec())
                    .map_err(|_| MeshError::DegenerateTriangle(i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_convex_pieces(pieces)
    }

    /// Builds a mesh shape by decomposing a simple polygon outline into convex pieces.
    pub fn from_outline(outline: &[Point<Real>]) -> Result<Self, MeshError> {
        let pieces = pieces_from_polylines(transformation::convex_decomposition(outline)?)?;
        Self::from_convex_pieces(pieces)
    }

    /// Builds a mesh shape from already convex pieces.
    pub fn from_convex_pieces(pieces: Vec<ConvexPolygon>) -> Result<Self, MeshError> {
        if pieces.is_empty() {
            return Err(MeshError::Empty);
        }

        let tree = ObbTree::new(&pieces);
        let all_points: Vec<_> = pieces
            .iter()
            .flat_map(|p| p.points().iter().copied())
            .collect();
        let hull = transformation::convex_hull(&all_points);
        let unit_mass_properties = pieces.iter().map(|p| p.mass_properties(1.0)).sum();

        Ok(Self {
            pieces,
            tree,
            hull,
            unit_mass_properties,
        })
    }

    /// The convex pieces of this mesh.
    #[inline]
    pub fn pieces(&self) -> &[ConvexPolygon] {
        &self.pieces
    }

    /// The `i`-th convex piece of this mesh.
    #[inline]
    pub fn piece(&self, i: u32) -> &ConvexPolygon {
        &self.pieces[i as usize]
    }

    /// The tree of oriented boxes over the pieces of this mesh.
    #[inline]
    pub fn tree(&self) -> &ObbTree {
        &self.tree
    }

    /// The vertices of the convex hull of this mesh, counter-clockwise.
    #[inline]
    pub fn hull(&self) -> &[Point<Real>] {
        &self.hull
    }
}

fn pieces_from_polylines(
    polylines: Vec<Vec<Point<Real>>>,
) -> Result<Vec<ConvexPolygon>, MeshError> {
    polylines
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            ConvexPolygon::from_convex_polyline(piece).map_err(|_| MeshError::DegeneratePiece(i))
        })
        .collect()
}

impl SupportMap for MeshShape {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        utils::point_cloud_support_point(dir, &self.hull)
    }
}

impl Shape for MeshShape {
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.tree
            .leaves_where(|node| node.obb().contains_point(pt))
            .any(|i| self.piece(i).contains_local_point(pt))
    }

    fn compute_local_aabb(&self) -> Aabb {
        bounding_volume::local_point_cloud_aabb(&self.hull)
    }

    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        bounding_volume::point_cloud_aabb(pos, &self.hull)
    }

    fn mass_properties(&self, density: Real) -> MassProperties {
        self.unit_mass_properties
            .with_mass(self.unit_mass_properties.mass * density)
    }

    fn max_radius(&self) -> Real {
        self.hull
            .iter()
            .map(|pt| pt.coords.norm())
            .fold(0.0, Real::max)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Mesh
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mesh_of_two_triangles() {
        let mesh = MeshShape::new(&[
            [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            [Point::new(0.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0)],
        ])
        .unwrap();

        assert_eq!(mesh.pieces().len(), 2);
        assert_eq!(mesh.hull().len(), 4);
        assert_relative_eq!(mesh.area(), 1.0, epsilon = 1.0e-5);
        assert!(mesh.contains_local_point(&Point::new(0.2, 0.7)));
        assert!(!mesh.contains_local_point(&Point::new(1.2, 0.7)));
        // Square of side 1 about its corner: m (1 + 1) / 12 + m / 2.
        assert_relative_eq!(
            mesh.angular_inertia(1.0),
            2.0 / 12.0 + 0.5,
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn invalid_meshes() {
        assert_eq!(MeshShape::new(&[]).unwrap_err(), MeshError::Empty);
        assert_eq!(
            MeshShape::new(&[[Point::origin(), Point::new(1.0, 0.0), Point::new(2.0, 0.0)]])
                .unwrap_err(),
            MeshError::DegenerateTriangle(0)
        );
    }

    #[test]
    fn degenerate_pieces_are_reported() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let sliver = vec![Point::new(2.0, 0.0), Point::new(3.0, 0.0), Point::new(4.0, 0.0)];

        assert_eq!(pieces_from_polylines(vec![square.clone()]).unwrap().len(), 1);
        assert_eq!(
            pieces_from_polylines(vec![square, sliver]).unwrap_err(),
            MeshError::DegeneratePiece(1)
        );
    }
}
