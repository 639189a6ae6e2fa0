//! Height-balanced (AVL) ordered map keyed by strings.
//!
//! Nodes are stored in an arena and linked with `Option<u32>` indices, so the
//! tree owns all of its memory and needs no reference counting. Every public
//! mutation leaves the tree satisfying:
//!
//! - BST order by byte-wise key comparison, with unique keys,
//! - `|height(left) - height(right)| <= 1` at every node,
//! - cached heights equal to `max(height(left), height(right)) + 1`.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`avl::types`] | [`AvlNode`] and the slot [`Arena`] |
//! [`avl::util`] | heights, rotations, `rebalance`, recursive `insert` / `remove` |
//! [`avl::check`] | read-only invariant checks |
//! [`avl::tree`] | the public [`AvlTree`] map |
//! [`print`] | box-drawing tree layout used by [`AvlTree::print`] |

pub mod avl;
pub mod config;
pub mod error;
pub mod print;

pub use avl::{Arena, AvlNode, AvlTree};
pub use config::{DuplicatePolicy, TreeConfig};
pub use error::{AvlError, InvariantViolation, Result};
