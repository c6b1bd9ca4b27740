use crate::math::{Point, Real};
use crate::query::gjk::CsoPoint;
use arrayvec::ArrayVec;

/// A simplex of dimension up to 2 (a triangle), with barycentric weights.
///
/// This is the working set of the GJK algorithm. It is owned by the caller so that the
/// same storage can be reused by many queries, and it is read back after the query to
/// recover the separation vector or the witness points.
#[derive(Clone, Debug, Default)]
pub struct Simplex {
    points: ArrayVec<CsoPoint, 3>,
    weights: [Real; 3],
}

impl Simplex {
    /// Creates an empty simplex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets this simplex to a single point.
    pub fn reset(&mut self, pt: CsoPoint) {
        self.points.clear();
        self.points.push(pt);
        self.weights = [1.0, 0.0, 0.0];
    }

    /// The number of vertices of this simplex.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is this simplex empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The dimension of this simplex: 0 for a point, 1 for a segment, 2 for a triangle.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// The `i`-th vertex of this simplex.
    #[inline]
    pub fn point(&self, i: usize) -> &CsoPoint {
        &self.points[i]
    }

    /// The vertices of this simplex.
    #[inline]
    pub fn points(&self) -> &[CsoPoint] {
        &self.points
    }

    /// The barycentric weight of the `i`-th vertex, as computed by the last projection.
    #[inline]
    pub fn weight(&self, i: usize) -> Real {
        self.weights[i]
    }

    /// The largest squared norm among the vertices of this simplex and `extra`.
    fn max_sq_len(&self, extra: &Point<Real>) -> Real {
        self.points
            .iter()
            .map(|p| p.point.coords.norm_squared())
            .fold(extra.coords.norm_squared(), Real::max)
    }

    /// Adds a vertex to this simplex.
    ///
    /// Returns `false` if the simplex is full, or if `pt` is, within `same_point_eps`
    /// relative to the largest vertex magnitude, a duplicate of one of its vertices.
    pub fn add_point(&mut self, pt: CsoPoint, same_point_eps: Real) -> bool {
        let threshold = same_point_eps * self.max_sq_len(&pt.point);

        if self
            .points
            .iter()
            .any(|p| (p.point - pt.point).norm_squared() <= threshold)
        {
            return false;
        }

        self.points.try_push(pt).is_ok()
    }

    /// Projects the origin on this simplex and removes every vertex that does not contribute
    /// to the projection.
    ///
    /// Vertices with a barycentric weight smaller than `zero_weight_eps` are pruned. Returns the
    /// projection, which is the origin itself if it lies inside of a triangle.
    pub fn project_origin_and_reduce(&mut self, zero_weight_eps: Real) -> Point<Real> {
        let weights = match self.points.len() {
            0 => return Point::origin(),
            1 => [1.0, 0.0, 0.0],
            2 => {
                let t = segment_parameter(&self.points[0].point, &self.points[1].point);
                [1.0 - t, t, 0.0]
            }
            _ => triangle_weights(
                &self.points[0].point,
                &self.points[1].point,
                &self.points[2].point,
            ),
        };

        self.weights = weights;
        self.prune(zero_weight_eps);
        self.projection()
    }

    /// The point of this simplex described by its current barycentric weights.
    pub fn projection(&self) -> Point<Real> {
        let mut res = Point::origin();
        for (pt, w) in self.points.iter().zip(self.weights.iter()) {
            res.coords += pt.point.coords * *w;
        }
        res
    }

    fn prune(&mut self, zero_weight_eps: Real) {
        let mut kept = ArrayVec::<CsoPoint, 3>::new();
        let mut kept_weights = [0.0; 3];
        let mut best = 0;

        for i in 0..self.points.len() {
            if self.weights[i] > self.weights[best] {
                best = i;
            }

            if self.weights[i] > zero_weight_eps {
                kept_weights[kept.len()] = self.weights[i];
                kept.push(self.points[i]);
            }
        }

        if kept.is_empty() {
            kept.push(self.points[best]);
            kept_weights[0] = 1.0;
        }

        let total: Real = kept_weights.iter().sum();
        for w in &mut kept_weights {
            *w /= total;
        }

        self.points = kept;
        self.weights = kept_weights;
    }
}

/// Parameter of the projection of the origin on the segment `[a, b]`, clamped to `[0, 1]`.
fn segment_parameter(a: &Point<Real>, b: &Point<Real>) -> Real {
    let ab = b - a;
    let sqnab = ab.norm_squared();

    if sqnab == 0.0 {
        return 0.0;
    }

    (-a.coords.dot(&ab) / sqnab).clamp(0.0, 1.0)
}

/// Barycentric coordinates of the projection of the origin on the triangle `abc`.
///
/// Follows the Voronoi region tests of Ericson's "Real-Time Collision Detection", 5.1.5.
fn triangle_weights(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> [Real; 3] {
    let ab = b - a;
    let ac = c - a;
    let ap = -a.coords;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return [1.0, 0.0, 0.0];
    }

    let bp = -b.coords;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return [0.0, 1.0, 0.0];
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return [1.0 - v, v, 0.0];
    }

    let cp = -c.coords;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return [0.0, 0.0, 1.0];
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return [1.0 - w, 0.0, w];
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return [0.0, 1.0 - w, w];
    }

    let denom = va + vb + vc;
    if denom <= 0.0 {
        // Flat triangle: fall back to the closest of its edges.
        return flat_triangle_weights(a, b, c);
    }

    let v = vb / denom;
    let w = vc / denom;
    [1.0 - v - w, v, w]
}

fn flat_triangle_weights(a: &Point<Real>, b: &Point<Real>, c: &Point<Real>) -> [Real; 3] {
    let edges = [(0, 1, a, b), (1, 2, b, c), (2, 0, c, a)];
    let mut best = [1.0, 0.0, 0.0];
    let mut best_sq_dist = Real::MAX;

    for (i, j, p, q) in edges {
        let t = segment_parameter(p, q);
        let sq_dist = (p.coords * (1.0 - t) + q.coords * t).norm_squared();

        if sq_dist < best_sq_dist {
            best_sq_dist = sq_dist;
            best = [0.0; 3];
            best[i] = 1.0 - t;
            best[j] = t;
        }
    }

    best
}

#[cfg(test)]
mod test {
    use super::Simplex;
    use crate::math::{Point, Real};
    use crate::query::gjk::CsoPoint;

    fn cso(x: Real, y: Real) -> CsoPoint {
        CsoPoint::new(Point::new(x, y), Point::origin())
    }

    #[test]
    fn triangle_containing_the_origin_keeps_all_vertices() {
        let mut simplex = Simplex::new();
        simplex.reset(cso(-1.0, -1.0));
        assert!(simplex.add_point(cso(1.0, -1.0), 1.0e-6));
        assert!(simplex.add_point(cso(0.0, 1.0), 1.0e-6));

        let proj = simplex.project_origin_and_reduce(1.0e-6);
        assert_relative_eq!(proj, Point::origin(), epsilon = 1.0e-6);
        assert_eq!(simplex.len(), 3);
    }

    #[test]
    fn vertices_with_zero_weight_are_pruned() {
        let mut simplex = Simplex::new();
        simplex.reset(cso(1.0, -1.0));
        assert!(simplex.add_point(cso(1.0, 1.0), 1.0e-6));
        assert!(simplex.add_point(cso(3.0, 0.0), 1.0e-6));

        let proj = simplex.project_origin_and_reduce(1.0e-6);
        assert_relative_eq!(proj, Point::new(1.0, 0.0), epsilon = 1.0e-6);
        assert_eq!(simplex.len(), 2);
        assert_relative_eq!(simplex.weight(0), 0.5, epsilon = 1.0e-6);
    }

    #[test]
    fn duplicate_points_are_rejected() {
        let mut simplex = Simplex::new();
        simplex.reset(cso(1.0, 2.0));
        assert!(!simplex.add_point(cso(1.0, 2.0 + 1.0e-5), 1.0e-6));
        assert_eq!(simplex.len(), 1);
    }
}
