//! Closed vertex loops stored in an index arena.

use crate::math::{Point, Real};

#[derive(Copy, Clone, Debug)]
pub(crate) struct RingNode {
    pub point: Point<Real>,
    pub prev: u32,
    pub next: u32,
}

/// A set of closed vertex loops sharing one node arena.
///
/// Loops are addressed by any of their node ids. Cutting a loop in two along a
/// diagonal is O(1): the diagonal endpoints are duplicated so each resulting loop
/// owns its own copy.
#[derive(Clone, Debug, Default)]
pub(crate) struct VertexRing {
    nodes: Vec<RingNode>,
}

impl VertexRing {
    /// A single loop through `points`, in order. Its first node has id `0`.
    pub fn from_loop(points: &[Point<Real>]) -> Self {
        let n = points.len() as u32;
        let nodes = points
            .iter()
            .enumerate()
            .map(|(i, pt)| {
                let i = i as u32;
                RingNode {
                    point: *pt,
                    prev: (i + n - 1) % n,
                    next: (i + 1) % n,
                }
            })
            .collect();

        Self { nodes }
    }

    #[inline]
    pub fn point(&self, id: u32) -> &Point<Real> {
        &self.nodes[id as usize].point
    }

    #[inline]
    pub fn next(&self, id: u32) -> u32 {
        self.nodes[id as usize].next
    }

    #[inline]
    pub fn prev(&self, id: u32) -> u32 {
        self.nodes[id as usize].prev
    }

    /// Inserts a new node holding `point` between `id` and its successor.
    pub fn insert_after(&mut self, id: u32, point: Point<Real>) -> u32 {
        let new_id = self.nodes.len() as u32;
        let next = self.next(id);

        self.nodes.push(RingNode {
            point,
            prev: id,
            next,
        });
        self.nodes[id as usize].next = new_id;
        self.nodes[next as usize].prev = new_id;

        new_id
    }

    /// Cuts the loop containing `a` and `b` along the diagonal `[a, b]`.
    ///
    /// Afterward, `a` belongs to the loop `a -> .. -> b -> a` (the original path from
    /// `a` to `b`), and the returned node, a copy of `b`, belongs to the loop made of the
    /// original path from `b` back to `a`.
    pub fn split(&mut self, a: u32, b: u32) -> u32 {
        let a_prev = self.prev(a);
        let b_next = self.next(b);
        let a2 = self.nodes.len() as u32;
        let b2 = a2 + 1;

        self.nodes.push(RingNode {
            point: *self.point(a),
            prev: a_prev,
            next: b2,
        });
        self.nodes.push(RingNode {
            point: *self.point(b),
            prev: a2,
            next: b_next,
        });
        self.nodes[a_prev as usize].next = a2;
        self.nodes[b_next as usize].prev = b2;

        self.nodes[b as usize].next = a;
        self.nodes[a as usize].prev = b;

        b2
    }

    /// The node ids of the loop containing `start`, beginning with `start`.
    pub fn walk(&self, start: u32) -> RingWalk<'_> {
        RingWalk {
            ring: self,
            start,
            current: Some(start),
            remaining: self.nodes.len(),
        }
    }
}

/// Iterator through the node ids of one loop of a [`VertexRing`].
pub(crate) struct RingWalk<'a> {
    ring: &'a VertexRing,
    start: u32,
    current: Option<u32>,
    // Bounds the walk if the links were corrupted.
    remaining: usize,
}

impl Iterator for RingWalk<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.current?;

        if self.remaining == 0 {
            self.current = None;
            return None;
        }

        self.remaining -= 1;
        let next = self.ring.next(current);
        self.current = if next == self.start { None } else { Some(next) };
        Some(current)
    }
}

#[cfg(test)]
mod test {
    use super::VertexRing;
    use crate::math::{Point, Real};

    #[test]
    fn split_produces_two_closed_loops() {
        let pts: Vec<_> = (0..6).map(|i| Point::new(i as Real, 0.0)).collect();
        let mut ring = VertexRing::from_loop(&pts);
        let other = ring.split(1, 4);

        assert_eq!(ring.walk(1).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        let second: Vec<_> = ring.walk(other).map(|id| ring.point(id).x).collect();
        assert_eq!(second, vec![4.0, 5.0, 0.0, 1.0]);

        let inserted = ring.insert_after(2, Point::new(2.5, 0.0));
        assert_eq!(ring.walk(1).collect::<Vec<_>>(), vec![1, 2, inserted, 3, 4]);
        assert_eq!(ring.prev(3), inserted);
    }
}
