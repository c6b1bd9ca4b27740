//! A binary tree of oriented bounding boxes over the convex pieces of a mesh.

use crate::bounding_volume::{Aabb, Obb};
use crate::math::{Point, Real};
use crate::shape::ConvexPolygon;
use crate::utils;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// A node of an [`ObbTree`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub enum ObbTreeNode {
    /// A node with exactly two children, given as indices into the tree's node list.
    Internal {
        /// The box bounding every piece below this node.
        obb: Obb,
        /// The two children of this node.
        children: [u32; 2],
    },
    /// A leaf referencing a single convex piece.
    Leaf {
        /// The box bounding the piece.
        obb: Obb,
        /// The index of the piece in the mesh.
        piece: u32,
    },
}

impl ObbTreeNode {
    /// The box bounding everything below this node.
    #[inline]
    pub fn obb(&self) -> &Obb {
        match self {
            ObbTreeNode::Internal { obb, .. } | ObbTreeNode::Leaf { obb, .. } => obb,
        }
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, ObbTreeNode::Leaf { .. })
    }
}

/// A binary tree of oriented bounding boxes.
///
/// Each leaf holds exactly one convex piece of a mesh. The tree is built once by
/// recursively splitting the pieces along the principal axes of their covariance,
/// and is immutable afterward. The root, if any, is the first node.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct ObbTree {
    nodes: Vec<ObbTreeNode>,
}

struct PieceInfo<'a> {
    id: u32,
    centroid: Point<Real>,
    points: &'a [Point<Real>],
}

impl ObbTree {
    /// Builds a tree over the given convex pieces.
    ///
    /// Leaf `i` references `pieces[i]`. An empty set of pieces yields an empty tree.
    pub fn new(pieces: &[ConvexPolygon]) -> Self {
        let mut infos: Vec<_> = pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| PieceInfo {
                id: i as u32,
                centroid: utils::center(piece.points()),
                points: piece.points(),
            })
            .collect();

        let mut tree = ObbTree {
            nodes: Vec::with_capacity(pieces.len() * 2),
        };

        if !infos.is_empty() {
            let _ = tree.build_recursive(&mut infos);
        }

        tree
    }

    fn build_recursive(&mut self, infos: &mut [PieceInfo]) -> u32 {
        let points: Vec<_> = infos
            .iter()
            .flat_map(|info| info.points.iter().copied())
            .collect();
        let obb = Obb::from_points(&points);
        let node_id = self.nodes.len() as u32;

        if infos.len() == 1 {
            self.nodes.push(ObbTreeNode::Leaf {
                obb,
                piece: infos[0].id,
            });
            return node_id;
        }

        // Reserve the slot so the parent precedes its children.
        self.nodes.push(ObbTreeNode::Leaf { obb, piece: 0 });

        let split = Self::partition(&obb, infos);
        let (left, right) = infos.split_at_mut(split);
        let left = self.build_recursive(left);
        let right = self.build_recursive(right);

        self.nodes[node_id as usize] = ObbTreeNode::Internal {
            obb,
            children: [left, right],
        };

        node_id
    }

    /// Reorders `infos` so that `infos[..k]` and `infos[k..]` form the two children,
    /// and returns `k`, which is never `0` nor `infos.len()`.
    fn partition(obb: &Obb, infos: &mut [PieceInfo]) -> usize {
        let axis = obb.axis(obb.longest_axis());
        let centroid = utils::center(&infos.iter().map(|i| i.centroid).collect::<Vec<_>>());

        for origin in [obb.center(), centroid] {
            let mut split = 0;

            for i in 0..infos.len() {
                if (infos[i].centroid - origin).dot(&axis) < 0.0 {
                    infos.swap(i, split);
                    split += 1;
                }
            }

            if split != 0 && split != infos.len() {
                return split;
            }
        }

        // Every centroid projects on the same side: fall back to a median split.
        infos.sort_by_key(|info| OrderedFloat(info.centroid.coords.dot(&axis)));
        infos.len() / 2
    }

    /// The nodes of this tree. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[ObbTreeNode] {
        &self.nodes
    }

    /// The box bounding the whole tree, if it is not empty.
    #[inline]
    pub fn root_obb(&self) -> Option<&Obb> {
        self.nodes.first().map(|n| n.obb())
    }

    /// The number of leaves of this tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// The number of nodes on the longest path from the root to a leaf.
    ///
    /// An empty tree has a depth of zero.
    pub fn depth(&self) -> usize {
        let mut stack: SmallVec<[(u32, usize); TRAVERSAL_STACK_SIZE]> = SmallVec::new();
        let mut depth = 0;

        if !self.nodes.is_empty() {
            stack.push((0, 1));
        }

        while let Some((id, d)) = stack.pop() {
            depth = depth.max(d);

            if let ObbTreeNode::Internal { children, .. } = &self.nodes[id as usize] {
                stack.push((children[0], d + 1));
                stack.push((children[1], d + 1));
            }
        }

        depth
    }

    /// Iterates through the piece indices of all the leaves whose ancestors (and
    /// themselves) satisfy `check`.
    pub fn leaves_where<F: Fn(&ObbTreeNode) -> bool>(&self, check: F) -> Leaves<'_, F> {
        Leaves::new(self, check)
    }

    /// Iterates through the piece indices of every leaf, depth-first from the root.
    pub fn leaves(&self) -> Leaves<'_, fn(&ObbTreeNode) -> bool> {
        fn always(_: &ObbTreeNode) -> bool {
            true
        }
        Leaves::new(self, always as fn(&ObbTreeNode) -> bool)
    }

    /// Calls `f` on the piece index of every leaf whose box intersects `aabb`.
    ///
    /// The AABB must be expressed in the same frame as the tree.
    pub fn visit_leaves_intersecting(&self, aabb: &Aabb, mut f: impl FnMut(u32)) {
        for leaf in self.leaves_where(|node| node.obb().intersects_aabb(aabb)) {
            f(leaf)
        }
    }

    /// Pushes into `out` the piece index of every leaf whose box contains `pt`.
    pub fn leaves_containing_point(&self, pt: &Point<Real>, out: &mut Vec<u32>) {
        out.extend(self.leaves_where(|node| node.obb().contains_point(pt)));
    }
}

/// Iterator through the leaves of an [`ObbTree`] satisfying a node predicate.
pub struct Leaves<'a, Check: Fn(&ObbTreeNode) -> bool> {
    tree: &'a ObbTree,
    stack: SmallVec<[u32; TRAVERSAL_STACK_SIZE]>,
    check: Check,
}

impl<'a, Check: Fn(&ObbTreeNode) -> bool> Leaves<'a, Check> {
    fn new(tree: &'a ObbTree, check: Check) -> Self {
        let mut stack = SmallVec::new();

        if let Some(root) = tree.nodes.first() {
            if check(root) {
                stack.push(0);
            }
        }

        Leaves { tree, stack, check }
    }
}

impl<Check: Fn(&ObbTreeNode) -> bool> Iterator for Leaves<'_, Check> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            let id = self.stack.pop()?;

            match &self.tree.nodes[id as usize] {
                ObbTreeNode::Leaf { piece, .. } => return Some(*piece),
                ObbTreeNode::Internal { children, .. } => {
                    // Push the right child first so the left one is visited first.
                    for child in children.iter().rev() {
                        if (self.check)(&self.tree.nodes[*child as usize]) {
                            self.stack.push(*child);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Vector;

    fn strip(n: usize) -> Vec<ConvexPolygon> {
        (0..n)
            .map(|i| {
                let mut cuboid = ConvexPolygon::cuboid(Vector::new(0.5, 0.5)).points().to_vec();
                cuboid
                    .iter_mut()
                    .for_each(|p| p.x += i as Real * 2.0);
                ConvexPolygon::from_convex_polyline(cuboid).unwrap()
            })
            .collect()
    }

    #[test]
    fn every_piece_is_a_leaf_exactly_once() {
        let pieces = strip(9);
        let tree = ObbTree::new(&pieces);
        let mut leaves: Vec<_> = tree.leaves().collect();
        leaves.sort();

        assert_eq!(leaves, (0..9).collect::<Vec<u32>>());
        assert_eq!(tree.num_leaves(), 9);
        assert!(tree.depth() >= 5 && tree.depth() <= 9);
    }

    #[test]
    fn aabb_query_only_reaches_overlapping_pieces() {
        let pieces = strip(9);
        let tree = ObbTree::new(&pieces);
        let query = Aabb::new(Point::new(3.8, -0.1), Point::new(4.2, 0.1));
        let mut hits = vec![];
        tree.visit_leaves_intersecting(&query, |leaf| hits.push(leaf));

        assert_eq!(hits, vec![2]);

        let mut inside = vec![];
        tree.leaves_containing_point(&Point::new(16.0, 0.0), &mut inside);
        assert_eq!(inside, vec![8]);
    }

    #[test]
    fn empty_tree() {
        let tree = ObbTree::new(&[]);
        assert_eq!(tree.leaves().count(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.root_obb().is_none());
    }
}
