use std::collections::TryReserveError;

use thiserror::Error;

/// Errors surfaced at the [`AvlTree`](crate::AvlTree) API boundary.
///
/// Missing keys are not errors: lookups yield `None` and deleting an absent
/// key is a no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvlError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error("out of memory while reserving a tree node: {0}")]
    OutOfMemory(#[from] TryReserveError),

    #[error("tree cannot address more than {max} nodes")]
    CapacityExceeded { max: u64 },
}

pub type Result<T> = std::result::Result<T, AvlError>;

/// First structural invariant found broken by
/// [`AvlTree::check_invariants`](crate::AvlTree::check_invariants).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("cached height of {key:?} is {cached}, expected {actual}")]
    HeightMismatch {
        key: String,
        cached: i32,
        actual: i32,
    },

    #[error("node {key:?} is unbalanced: left height {left}, right height {right}")]
    Unbalanced { key: String, left: i32, right: i32 },

    #[error("keys out of order: {prev:?} is not less than {next:?}")]
    OutOfOrder { prev: String, next: String },

    #[error("tree holds {counted} nodes but tracks {expected} entries")]
    CountMismatch { counted: usize, expected: usize },
}
