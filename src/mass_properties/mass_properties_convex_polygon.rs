use crate::mass_properties::MassProperties;
use crate::math::{Point, Real};

/// Second moment of area of the triangle `(a, b, c)` about `a`, divided by its area.
fn triangle_unit_angular_inertia(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> Real {
    let e1 = b - a;
    let e2 = c - a;

    let intx2 = e1.x * e1.x + e2.x * e1.x + e2.x * e2.x;
    let inty2 = e1.y * e1.y + e2.y * e1.y + e2.y * e2.y;
    (intx2 + inty2) / 6.0
}

impl MassProperties {
    /// Computes the mass properties of a convex polygon given as a counter-clockwise
    /// vertex loop.
    pub fn from_convex_polygon(density: Real, vertices: &[Point<Real>]) -> MassProperties {
        let (area, com) = convex_polygon_area_and_center_of_mass(vertices);

        if area == 0.0 {
            return MassProperties::new(com, 0.0, 0.0);
        }

        let mut itot = 0.0;

        for (i, a) in vertices.iter().enumerate() {
            let b = &vertices[(i + 1) % vertices.len()];
            let tri_area = (a - com).perp(&(b - com)).abs() * 0.5;
            itot += triangle_unit_angular_inertia(&com, a, b) * tri_area;
        }

        Self::new(com, area * density, itot * density)
    }
}

/// Computes the area and center-of-mass of a convex polygon.
///
/// Returns a zero area and the vertices' mean if the polygon is degenerate.
fn convex_polygon_area_and_center_of_mass(
    convex_polygon: &[Point<Real>],
) -> (Real, Point<Real>) {
    if convex_polygon.is_empty() {
        return (0.0, Point::origin());
    }

    let geometric_center = crate::utils::center(convex_polygon);
    let mut res = Point::origin();
    let mut areasum = 0.0;

    for (i, a) in convex_polygon.iter().enumerate() {
        let b = &convex_polygon[(i + 1) % convex_polygon.len()];
        let area = (a - geometric_center).perp(&(b - geometric_center)).abs() * 0.5;
        let center = (a.coords + b.coords + geometric_center.coords) / 3.0;

        res += center * area;
        areasum += area;
    }

    if areasum == 0.0 {
        (areasum, geometric_center)
    } else {
        (areasum, res / areasum)
    }
}
