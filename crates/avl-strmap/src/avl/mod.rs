//! AVL tree engine: arena-backed nodes, rotation and rebalance primitives,
//! recursive insert/delete and the invariant checks.

pub mod check;
pub mod tree;
pub mod types;
pub mod util;

pub use tree::AvlTree;
pub use types::{Arena, AvlNode};
