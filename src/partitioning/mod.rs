//! Spatial partitioning tools.

pub use self::obb_tree::{Leaves, ObbTree, ObbTreeNode};

mod obb_tree;
