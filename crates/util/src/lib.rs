//! avl-strmap-util - seeded random generators for tree fuzzing.

pub mod fuzzer;
pub mod keys;

pub use fuzzer::Fuzzer;
pub use keys::{KeyStream, DEFAULT_KEY_SEED};
