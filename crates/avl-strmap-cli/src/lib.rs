//! Fuzz harness for `avl-strmap`.
//!
//! Populates a tree with generated keys, runs a seeded mix of deletes and
//! inserts, then checks heights, balance, ordering, node count and that
//! every tracked key still maps to the value last written for it.

pub mod cli;
pub mod config;
pub mod error;
pub mod harness;

pub use cli::FuzzCli;
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use harness::{run, Harness, HarnessReport};
