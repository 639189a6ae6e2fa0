//! Node and slot-arena types.
//!
//! Child "pointers" are `Option<u32>` indices into an [`Arena`]. Every live
//! slot is referenced by exactly one parent link or by the tree's root, so
//! releasing a slot never leaves a dangling link behind.

use tracing::trace;

use crate::error::{AvlError, Result};

/// One key/value association and the root of the subtree below it.
#[derive(Clone, Debug)]
pub struct AvlNode<V> {
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: Box<str>,
    pub v: V,
    /// Longest downward path. A leaf is `0`, an absent subtree counts as `-1`.
    pub h: i32,
}

impl<V> AvlNode<V> {
    pub fn new(k: Box<str>, v: V) -> Self {
        Self {
            l: None,
            r: None,
            k,
            v,
            h: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.k
    }

    pub fn value(&self) -> &V {
        &self.v
    }

    pub fn is_leaf(&self) -> bool {
        self.l.is_none() && self.r.is_none()
    }
}

/// Slot storage for [`AvlNode`]s with a free list for released slots.
#[derive(Clone, Debug)]
pub struct Arena<V> {
    slots: Vec<Option<AvlNode<V>>>,
    free: Vec<u32>,
    max_slots: u64,
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Arena<V> {
    pub const MAX_SLOTS: u64 = u32::MAX as u64;

    pub fn new() -> Self {
        Self::with_max_slots(Self::MAX_SLOTS)
    }

    /// Arena that refuses to grow past `max` slots (capped at
    /// [`MAX_SLOTS`](Self::MAX_SLOTS)).
    pub fn with_max_slots(max: u64) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            max_slots: max.min(Self::MAX_SLOTS),
        }
    }

    /// Live nodes currently held.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Makes sure the next [`alloc`](Self::alloc) cannot fail.
    ///
    /// Must be called before a mutation starts re-linking nodes.
    pub fn reserve_slot(&mut self) -> Result<()> {
        if !self.free.is_empty() {
            return Ok(());
        }
        if self.slots.len() as u64 >= self.max_slots {
            return Err(AvlError::CapacityExceeded {
                max: self.max_slots,
            });
        }
        self.slots.try_reserve(1)?;
        // Released slots never outnumber allocated ones, so `release` cannot
        // reallocate the free list.
        self.free.try_reserve(self.slots.len() + 1)?;
        Ok(())
    }

    pub fn alloc(&mut self, node: AvlNode<V>) -> u32 {
        if let Some(i) = self.free.pop() {
            trace!(slot = i, key = %node.k, "reusing released slot");
            self.slots[i as usize] = Some(node);
            return i;
        }
        self.slots.push(Some(node));
        (self.slots.len() - 1) as u32
    }

    /// Takes the node out of slot `i` and puts the slot on the free list.
    pub fn release(&mut self, i: u32) -> AvlNode<V> {
        let node = self.slots[i as usize]
            .take()
            .expect("released slot is live");
        self.free.push(i);
        node
    }

    #[inline]
    pub fn node(&self, i: u32) -> &AvlNode<V> {
        self.slots[i as usize].as_ref().expect("linked slot is live")
    }

    #[inline]
    pub fn node_mut(&mut self, i: u32) -> &mut AvlNode<V> {
        self.slots[i as usize].as_mut().expect("linked slot is live")
    }

    /// Drops every slot at once. Callers that need post-order release walk
    /// the tree first.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::new();
        let a = arena.alloc(AvlNode::new("a".into(), 1));
        let b = arena.alloc(AvlNode::new("b".into(), 2));
        assert_eq!(arena.live(), 2);

        let node = arena.release(a);
        assert_eq!(node.key(), "a");
        assert_eq!(arena.live(), 1);

        arena.reserve_slot().unwrap();
        let c = arena.alloc(AvlNode::new("c".into(), 3));
        assert_eq!(c, a);
        assert_eq!(arena.node(b).value(), &2);
        assert_eq!(arena.node(c).key(), "c");
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn capped_arena_only_reuses_released_slots() {
        let mut arena = Arena::with_max_slots(1);
        arena.reserve_slot().unwrap();
        let a = arena.alloc(AvlNode::new("a".into(), 1));
        assert_eq!(
            arena.reserve_slot(),
            Err(AvlError::CapacityExceeded { max: 1 })
        );

        arena.release(a);
        arena.reserve_slot().unwrap();
        assert_eq!(arena.alloc(AvlNode::new("b".into(), 2)), a);
    }

    #[test]
    fn fresh_node_is_a_leaf() {
        let node = AvlNode::new("k".into(), ());
        assert!(node.is_leaf());
        assert_eq!(node.h, 0);
    }
}
