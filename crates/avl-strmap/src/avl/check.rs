//! Read-only invariant checks used by tests and the fuzz harness.

use crate::error::InvariantViolation;

use super::types::Arena;
use super::util::height_of;

/// Recomputes the height of every node and compares it with the cached one.
pub fn heights_are_consistent<V>(arena: &Arena<V>, root: Option<u32>) -> bool {
    check_heights(arena, root).is_ok()
}

/// `true` when every node's children differ in height by at most one.
pub fn is_height_balanced<V>(arena: &Arena<V>, root: Option<u32>) -> bool {
    check_balance(arena, root).is_ok()
}

/// `true` when an in-order walk yields strictly increasing keys.
pub fn is_ordered_correctly<V>(arena: &Arena<V>, root: Option<u32>) -> bool {
    check_order(arena, root).is_ok()
}

pub fn count_nodes<V>(arena: &Arena<V>, root: Option<u32>) -> usize {
    root.map_or(0, |i| {
        let n = arena.node(i);
        1 + count_nodes(arena, n.l) + count_nodes(arena, n.r)
    })
}

/// Returns the real height of the subtree, or the first node whose cached
/// height disagrees with it.
pub fn check_heights<V>(arena: &Arena<V>, root: Option<u32>) -> Result<i32, InvariantViolation> {
    let Some(i) = root else {
        return Ok(-1);
    };
    let n = arena.node(i);
    let actual = check_heights(arena, n.l)?.max(check_heights(arena, n.r)?) + 1;
    if n.h != actual {
        return Err(InvariantViolation::HeightMismatch {
            key: n.key().to_string(),
            cached: n.h,
            actual,
        });
    }
    Ok(actual)
}

/// Balance is judged on cached heights, so run [`check_heights`] first when
/// the cache itself is in doubt.
pub fn check_balance<V>(arena: &Arena<V>, root: Option<u32>) -> Result<(), InvariantViolation> {
    let Some(i) = root else {
        return Ok(());
    };
    let n = arena.node(i);
    let left = height_of(arena, n.l);
    let right = height_of(arena, n.r);
    if (left - right).abs() > 1 {
        return Err(InvariantViolation::Unbalanced {
            key: n.key().to_string(),
            left,
            right,
        });
    }
    check_balance(arena, n.l)?;
    check_balance(arena, n.r)
}

pub fn check_order<V>(arena: &Arena<V>, root: Option<u32>) -> Result<(), InvariantViolation> {
    fn walk<'a, V>(
        arena: &'a Arena<V>,
        node: Option<u32>,
        prev: &mut Option<&'a str>,
    ) -> Result<(), InvariantViolation> {
        let Some(i) = node else {
            return Ok(());
        };
        let n = arena.node(i);
        walk(arena, n.l, prev)?;
        if let Some(p) = *prev {
            if p >= n.key() {
                return Err(InvariantViolation::OutOfOrder {
                    prev: p.to_string(),
                    next: n.key().to_string(),
                });
            }
        }
        *prev = Some(n.key());
        walk(arena, n.r, prev)
    }

    walk(arena, root, &mut None)
}
