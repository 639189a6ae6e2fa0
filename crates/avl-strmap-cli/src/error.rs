use std::path::PathBuf;

use avl_strmap::{AvlError, InvariantViolation};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Tree(#[from] AvlError),

    #[error("invariant broken after operation {op}: {violation}")]
    Invariant {
        op: usize,
        #[source]
        violation: InvariantViolation,
    },

    #[error("deleting {key:?} after operation {op} returned {found:?}, expected {expected}")]
    DeleteMismatch {
        op: usize,
        key: String,
        expected: u64,
        found: Option<u64>,
    },

    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no unused key found among {attempts} candidates of width {width}")]
    KeySpaceExhausted { width: usize, attempts: usize },
}
