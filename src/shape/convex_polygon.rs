use crate::bounding_volume::{self, Aabb};
use crate::mass_properties::MassProperties;
use crate::math::{Isometry, Point, Real, UnitVector, Vector, DEFAULT_EPSILON};
use crate::shape::{Shape, ShapeError, ShapeType, SupportMap};
use crate::utils;
use na::ComplexField;

/// A 2D convex polygon.
///
/// The vertices form a counter-clockwise loop and `normals[i]` is the outward unit
/// normal of the edge going from `points[i]` to `points[i + 1]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct ConvexPolygon {
    points: Vec<Point<Real>>,
    normals: Vec<UnitVector<Real>>,
}

impl ConvexPolygon {
    /// Creates a new 2D convex polygon from an arbitrary set of points.
    ///
    /// This explicitly computes the convex hull of the given set of points.
    pub fn from_convex_hull(points: &[Point<Real>]) -> Result<Self, ShapeError> {
        let vertices = crate::transformation::convex_hull(points);
        Self::from_convex_polyline(vertices)
    }

    /// Creates a new 2D convex polygon from a set of points assumed to describe a
    /// convex polyline.
    ///
    /// A clockwise loop is reversed. Consecutive collinear vertices are removed. Fails
    /// if fewer than three vertices remain, if two consecutive vertices coincide, or if
    /// the loop is not convex.
    pub fn from_convex_polyline(mut points: Vec<Point<Real>>) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::TooFewPoints(points.len()));
        }

        let area = utils::signed_area(&points);
        if area.abs() <= DEFAULT_EPSILON {
            return Err(ShapeError::DegeneratePolygon);
        } else if area < 0.0 {
            points.reverse();
        }

        let eps = ComplexField::sqrt(DEFAULT_EPSILON);
        let mut normals = Vec::with_capacity(points.len());

        for i1 in 0..points.len() {
            let i2 = (i1 + 1) % points.len();
            let normal = utils::ccw_face_normal([&points[i1], &points[i2]])
                .ok_or(ShapeError::DegeneratePolygon)?;
            normals.push(normal);
        }

        // Vertex `i` sits between the edges `i - 1` and `i`.
        for i in 0..points.len() {
            let prev = &normals[(i + points.len() - 1) % points.len()];
            if prev.perp(normals[i].as_ref()) < -eps {
                return Err(ShapeError::NotConvex(i));
            }
        }

        let mut nremoved = 0;
        // See if the first vertex must be removed.
        if normals[0].dot(normals[normals.len() - 1].as_ref()) > 1.0 - eps {
            nremoved = 1;
        }

        // Remove vertices between collinear edges.
        for i2 in 1..points.len() {
            let i1 = i2 - 1;
            if normals[i1].dot(normals[i2].as_ref()) > 1.0 - eps {
                nremoved += 1;
            } else {
                points[i2 - nremoved] = points[i2];
                normals[i2 - nremoved] = normals[i2];
            }
        }

        let new_length = points.len() - nremoved;
        points.truncate(new_length);
        normals.truncate(new_length);

        if points.len() < 3 {
            Err(ShapeError::DegeneratePolygon)
        } else {
            Ok(ConvexPolygon { points, normals })
        }
    }

    /// Creates an axis-aligned box centered at the origin.
    pub fn cuboid(half_extents: Vector<Real>) -> Self {
        let (hx, hy) = (half_extents.x, half_extents.y);
        ConvexPolygon {
            points: vec![
                Point::new(-hx, -hy),
                Point::new(hx, -hy),
                Point::new(hx, hy),
                Point::new(-hx, hy),
            ],
            normals: vec![
                -Vector::y_axis(),
                Vector::x_axis(),
                Vector::y_axis(),
                -Vector::x_axis(),
            ],
        }
    }

    /// The two-sided polygon made of the segment `[a, b]`.
    ///
    /// Used as the core of rounded shapes. Coincident endpoints yield arbitrary,
    /// opposite, normals.
    pub(crate) fn segment(a: Point<Real>, b: Point<Real>) -> Self {
        let normal = utils::ccw_face_normal([&a, &b]).unwrap_or_else(Vector::y_axis);
        ConvexPolygon {
            points: vec![a, b],
            normals: vec![normal, -normal],
        }
    }

    /// The vertices of this convex polygon.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The normals of the edges of this convex polygon.
    #[inline]
    pub fn normals(&self) -> &[UnitVector<Real>] {
        &self.normals
    }

    /// The endpoints of the `i`-th edge.
    #[inline]
    pub fn edge(&self, i: usize) -> (Point<Real>, Point<Real>) {
        (self.points[i], self.points[(i + 1) % self.points.len()])
    }

    /// The index of the vertex farthest along `local_dir`, the first one on ties.
    #[inline]
    pub fn support_point_id(&self, local_dir: &Vector<Real>) -> usize {
        utils::point_cloud_support_point_id(local_dir, &self.points)
    }
}

impl SupportMap for ConvexPolygon {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        utils::point_cloud_support_point(dir, self.points())
    }
}

impl Shape for ConvexPolygon {
    fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        self.points
            .iter()
            .zip(self.normals.iter())
            .all(|(vtx, normal)| (pt - vtx).dot(normal.as_ref()) <= 0.0)
    }

    fn compute_local_aabb(&self) -> Aabb {
        bounding_volume::local_point_cloud_aabb(&self.points)
    }

    fn compute_aabb(&self, pos: &Isometry<Real>) -> Aabb {
        bounding_volume::point_cloud_aabb(pos, &self.points)
    }

    fn mass_properties(&self, density: Real) -> MassProperties {
        MassProperties::from_convex_polygon(density, &self.points)
    }

    fn max_radius(&self) -> Real {
        self.points
            .iter()
            .map(|pt| pt.coords.norm())
            .fold(0.0, Real::max)
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::ConvexPolygon
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clockwise_input_is_reoriented_and_collinear_points_removed() {
        let poly = ConvexPolygon::from_convex_polyline(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.5),
            Point::new(1.0, 0.0),
        ])
        .unwrap();

        assert_eq!(poly.points().len(), 4);
        assert!(utils::signed_area(poly.points()) > 0.0);
        assert_relative_eq!(poly.area(), 1.0, epsilon = 1.0e-6);
    }

    #[test]
    fn invalid_polylines_are_rejected() {
        assert_eq!(
            ConvexPolygon::from_convex_polyline(vec![Point::origin(), Point::new(1.0, 0.0)])
                .unwrap_err(),
            ShapeError::TooFewPoints(2)
        );
        assert_eq!(
            ConvexPolygon::from_convex_polyline(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(2.0, 0.0),
            ])
            .unwrap_err(),
            ShapeError::DegeneratePolygon
        );
        assert!(matches!(
            ConvexPolygon::from_convex_polyline(vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 0.0),
                Point::new(1.0, 0.5),
                Point::new(2.0, 2.0),
                Point::new(0.0, 2.0),
            ]),
            Err(ShapeError::NotConvex(_))
        ));
    }

    #[test]
    fn support_breaks_ties_with_the_first_vertex() {
        let square = ConvexPolygon::cuboid(Vector::new(1.0, 1.0));
        // Vertices 1 and 2 are equally far along +x.
        assert_eq!(square.local_support_point(&Vector::x()), Point::new(1.0, -1.0));
        assert!(square.contains_local_point(&Point::new(1.0, 0.0)));
        assert!(!square.contains_local_point(&Point::new(1.1, 0.0)));
    }
}
