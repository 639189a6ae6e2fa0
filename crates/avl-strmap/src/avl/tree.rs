use std::fmt::Debug;

use tracing::debug;

use crate::config::TreeConfig;
use crate::error::{AvlError, InvariantViolation, Result};

use super::check;
use super::types::Arena;
use super::util;

/// Height-balanced ordered map from string keys to `V`.
///
/// Keys compare lexicographically by bytes. Nodes live in an arena owned by
/// the tree; every mutation keeps the cached heights, the AVL balance and the
/// key order valid before it returns.
///
/// ```
/// use avl_strmap::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert("hello", 1).unwrap();
/// tree.insert("world", 2).unwrap();
///
/// assert_eq!(tree.get("hello").unwrap(), Some(&1));
/// assert_eq!(tree.remove("world").unwrap(), Some(2));
/// assert_eq!(tree.get("world").unwrap(), None);
/// ```
#[derive(Clone, Debug)]
pub struct AvlTree<V> {
    arena: Arena<V>,
    root: Option<u32>,
    len: usize,
    config: TreeConfig,
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        debug!("rejected empty key");
        return Err(AvlError::EmptyKey);
    }
    Ok(())
}

impl<V> AvlTree<V> {
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        debug!(policy = ?config.duplicate_policy, "created tree");
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root, `-1` for an empty tree.
    pub fn height(&self) -> i32 {
        util::height_of(&self.arena, self.root)
    }

    /// Stores `value` under `key`.
    ///
    /// Returns `None` when the key is new. For an existing key the tree's
    /// [`DuplicatePolicy`](crate::DuplicatePolicy) decides: `Overwrite` swaps
    /// in the new value and returns the old one, `Ignore` keeps the stored
    /// value and returns the one passed in. Neither case allocates, so only
    /// a new key can fail with an allocation or capacity error.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>> {
        check_key(key)?;
        let policy = self.config.duplicate_policy;
        if let Some(i) = util::find(&self.arena, self.root, key) {
            return Ok(Some(util::resolve_duplicate(&mut self.arena, i, value, policy)));
        }
        self.arena.reserve_slot()?;

        let (root, displaced) = util::insert(
            &mut self.arena,
            self.root,
            key,
            value,
            policy,
        );
        self.root = Some(root);
        if displaced.is_none() {
            self.len += 1;
        }
        Ok(displaced)
    }

    pub fn get(&self, key: &str) -> Result<Option<&V>> {
        check_key(key)?;
        Ok(util::find(&self.arena, self.root, key).map(|i| self.arena.node(i).value()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<Option<&mut V>> {
        check_key(key)?;
        Ok(util::find(&self.arena, self.root, key).map(|i| &mut self.arena.node_mut(i).v))
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        Ok(util::find(&self.arena, self.root, key).is_some())
    }

    /// Deletes `key` and returns its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Result<Option<V>> {
        check_key(key)?;
        let (root, removed) = util::remove(&mut self.arena, self.root, key);
        self.root = root;
        Ok(removed.map(|(_, v)| {
            self.len -= 1;
            v
        }))
    }

    /// Releases every node, children before parents. The tree stays usable.
    pub fn clear(&mut self) {
        let released = util::release_post_order(&mut self.arena, self.root.take());
        self.arena.reset();
        self.len = 0;
        debug!(released, "cleared tree");
    }

    /// Releases every node and then the tree itself.
    pub fn destroy(mut self) {
        self.clear();
    }

    pub fn heights_are_consistent(&self) -> bool {
        check::heights_are_consistent(&self.arena, self.root)
    }

    pub fn is_height_balanced(&self) -> bool {
        check::is_height_balanced(&self.arena, self.root)
    }

    pub fn is_ordered_correctly(&self) -> bool {
        check::is_ordered_correctly(&self.arena, self.root)
    }

    /// Counts nodes by walking the tree, independent of [`len`](Self::len).
    pub fn count_nodes(&self) -> usize {
        check::count_nodes(&self.arena, self.root)
    }

    /// Runs every structural check and reports the first violation.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        check::check_heights(&self.arena, self.root)?;
        check::check_balance(&self.arena, self.root)?;
        check::check_order(&self.arena, self.root)?;
        let counted = self.count_nodes();
        if counted != self.len {
            return Err(InvariantViolation::CountMismatch {
                counted,
                expected: self.len,
            });
        }
        Ok(())
    }
}

impl<V: Debug> AvlTree<V> {
    /// Renders the tree structure with cached heights, for debugging.
    pub fn print(&self) -> String {
        util::print(&self.arena, self.root, "")
    }
}
