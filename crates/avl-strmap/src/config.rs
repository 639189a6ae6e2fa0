use serde::{Deserialize, Serialize};

/// What [`AvlTree::insert`](crate::AvlTree::insert) does when the key is
/// already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the stored value; the old value is handed back to the caller.
    #[default]
    Overwrite,
    /// Keep the stored value; the rejected value is handed back to the caller.
    Ignore,
}

/// Per-tree settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub duplicate_policy: DuplicatePolicy,
}

impl TreeConfig {
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
