use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::config::DuplicatePolicy;
use crate::print::print_binary;

use super::types::{Arena, AvlNode};

#[cfg(test)]
thread_local! {
    static ROTATIONS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

#[inline]
fn l<V>(arena: &Arena<V>, i: u32) -> Option<u32> {
    arena.node(i).l
}

#[inline]
fn r<V>(arena: &Arena<V>, i: u32) -> Option<u32> {
    arena.node(i).r
}

#[inline]
fn set_l<V>(arena: &mut Arena<V>, i: u32, v: Option<u32>) {
    arena.node_mut(i).l = v;
}

#[inline]
fn set_r<V>(arena: &mut Arena<V>, i: u32, v: Option<u32>) {
    arena.node_mut(i).r = v;
}

/// Cached height of a subtree, `-1` when absent.
#[inline]
pub fn height_of<V>(arena: &Arena<V>, node: Option<u32>) -> i32 {
    node.map_or(-1, |i| arena.node(i).h)
}

pub fn update_height<V>(arena: &mut Arena<V>, n: u32) {
    let h = height_of(arena, l(arena, n)).max(height_of(arena, r(arena, n))) + 1;
    arena.node_mut(n).h = h;
}

/// Promotes the right child of `n`. Returns the new subtree root, or `n`
/// itself when it has no right child.
pub fn rotate_left<V>(arena: &mut Arena<V>, n: u32) -> u32 {
    let Some(nr) = r(arena, n) else {
        return n;
    };
    trace!(pivot = %arena.node(n).k, "rotate left");
    #[cfg(test)]
    ROTATIONS.with(|c| c.set(c.get() + 1));
    let nrl = l(arena, nr);
    set_r(arena, n, nrl);
    set_l(arena, nr, Some(n));
    update_height(arena, n);
    update_height(arena, nr);
    nr
}

/// Mirror of [`rotate_left`].
pub fn rotate_right<V>(arena: &mut Arena<V>, n: u32) -> u32 {
    let Some(nl) = l(arena, n) else {
        return n;
    };
    trace!(pivot = %arena.node(n).k, "rotate right");
    #[cfg(test)]
    ROTATIONS.with(|c| c.set(c.get() + 1));
    let nlr = r(arena, nl);
    set_l(arena, n, nlr);
    set_r(arena, nl, Some(n));
    update_height(arena, n);
    update_height(arena, nl);
    nl
}

fn lr_rotate<V>(arena: &mut Arena<V>, n: u32, nl: u32) -> u32 {
    let nl = rotate_left(arena, nl);
    set_l(arena, n, Some(nl));
    rotate_right(arena, n)
}

fn rl_rotate<V>(arena: &mut Arena<V>, n: u32, nr: u32) -> u32 {
    let nr = rotate_right(arena, nr);
    set_r(arena, n, Some(nr));
    rotate_left(arena, n)
}

/// Restores the height-balance invariant at `n`.
///
/// The subtree must have been balanced before the last single insertion or
/// deletion below it, so the children's heights differ by at most 2. The
/// returned index is the new subtree root and must be re-linked by the caller.
pub fn rebalance<V>(arena: &mut Arena<V>, n: u32) -> u32 {
    let nl = l(arena, n);
    let nr = r(arena, n);
    let lh = height_of(arena, nl);
    let rh = height_of(arena, nr);

    if lh == rh + 2 {
        if let Some(nl) = nl {
            return if height_of(arena, l(arena, nl)) == rh + 1 {
                rotate_right(arena, n)
            } else {
                lr_rotate(arena, n, nl)
            };
        }
    } else if rh == lh + 2 {
        if let Some(nr) = nr {
            return if height_of(arena, r(arena, nr)) == lh + 1 {
                rotate_left(arena, n)
            } else {
                rl_rotate(arena, n, nr)
            };
        }
    }

    n
}

/// Binary search for `key` below `root`.
pub fn find<V>(arena: &Arena<V>, root: Option<u32>, key: &str) -> Option<u32> {
    let mut curr = root;
    while let Some(i) = curr {
        curr = match key.cmp(arena.node(i).key()) {
            Ordering::Less => l(arena, i),
            Ordering::Greater => r(arena, i),
            Ordering::Equal => return Some(i),
        };
    }
    None
}

/// Applies `policy` to an insert that hit the live node `n` with an equal
/// key and returns the value that did not end up stored.
pub fn resolve_duplicate<V>(
    arena: &mut Arena<V>,
    n: u32,
    value: V,
    policy: DuplicatePolicy,
) -> V {
    match policy {
        DuplicatePolicy::Overwrite => std::mem::replace(&mut arena.node_mut(n).v, value),
        DuplicatePolicy::Ignore => value,
    }
}

/// Inserts `key` below `node` and returns the new subtree root together with
/// the value displaced by an equal key (`None` when a node was created).
///
/// The caller must have reserved a slot in `arena` beforehand.
pub fn insert<V>(
    arena: &mut Arena<V>,
    node: Option<u32>,
    key: &str,
    value: V,
    policy: DuplicatePolicy,
) -> (u32, Option<V>) {
    let Some(n) = node else {
        return (arena.alloc(AvlNode::new(key.into(), value)), None);
    };

    let displaced = match key.cmp(arena.node(n).key()) {
        Ordering::Equal => return (n, Some(resolve_duplicate(arena, n, value, policy))),
        Ordering::Less => {
            let next = l(arena, n);
            let (child, displaced) = insert(arena, next, key, value, policy);
            set_l(arena, n, Some(child));
            displaced
        }
        Ordering::Greater => {
            let next = r(arena, n);
            let (child, displaced) = insert(arena, next, key, value, policy);
            set_r(arena, n, Some(child));
            displaced
        }
    };

    update_height(arena, n);
    (rebalance(arena, n), displaced)
}

/// Detaches the rightmost node of the non-empty subtree `n`, rebalancing
/// every node on the way back up.
///
/// Returns the new subtree root and the detached node's key and value.
pub fn extract_rightmost<V>(arena: &mut Arena<V>, n: u32) -> (Option<u32>, Box<str>, V) {
    match r(arena, n) {
        Some(nr) => {
            let (child, k, v) = extract_rightmost(arena, nr);
            set_r(arena, n, child);
            update_height(arena, n);
            (Some(rebalance(arena, n)), k, v)
        }
        None => {
            let nl = l(arena, n);
            let dead = arena.release(n);
            (nl, dead.k, dead.v)
        }
    }
}

/// Removes `key` from below `node`.
///
/// Returns the new subtree root and the removed entry, if the key was found.
pub fn remove<V>(
    arena: &mut Arena<V>,
    node: Option<u32>,
    key: &str,
) -> (Option<u32>, Option<(Box<str>, V)>) {
    let Some(n) = node else {
        return (None, None);
    };

    let removed = match key.cmp(arena.node(n).key()) {
        Ordering::Less => {
            let next = l(arena, n);
            let (child, removed) = remove(arena, next, key);
            set_l(arena, n, child);
            removed
        }
        Ordering::Greater => {
            let next = r(arena, n);
            let (child, removed) = remove(arena, next, key);
            set_r(arena, n, child);
            removed
        }
        Ordering::Equal => match (l(arena, n), r(arena, n)) {
            (None, nr) => {
                let dead = arena.release(n);
                return (nr, Some((dead.k, dead.v)));
            }
            (nl, None) => {
                let dead = arena.release(n);
                return (nl, Some((dead.k, dead.v)));
            }
            (Some(nl), Some(_)) => {
                // The in-order predecessor's entry moves into this slot.
                let (child, pk, pv) = extract_rightmost(arena, nl);
                set_l(arena, n, child);
                let node = arena.node_mut(n);
                let k = std::mem::replace(&mut node.k, pk);
                let v = std::mem::replace(&mut node.v, pv);
                Some((k, v))
            }
        },
    };

    if removed.is_none() {
        return (Some(n), None);
    }
    update_height(arena, n);
    (Some(rebalance(arena, n)), removed)
}

/// Releases every node below `root`, children before their parent.
///
/// Returns the number of released nodes.
pub fn release_post_order<V>(arena: &mut Arena<V>, root: Option<u32>) -> usize {
    let Some(root) = root else {
        return 0;
    };

    let mut released = 0;
    let mut stack = vec![(root, false)];
    while let Some((i, expanded)) = stack.pop() {
        if expanded {
            arena.release(i);
            released += 1;
            continue;
        }
        stack.push((i, true));
        if let Some(nr) = r(arena, i) {
            stack.push((nr, false));
        }
        if let Some(nl) = l(arena, i) {
            stack.push((nl, false));
        }
    }
    released
}

/// Debug printer for AVL subtrees.
pub fn print<V: Debug>(arena: &Arena<V>, node: Option<u32>, tab: &str) -> String {
    let Some(i) = node else {
        return "∅".to_string();
    };

    let n = arena.node(i);
    let label = format!("{:?} = {:?} [h={}]", n.key(), n.value(), n.h);
    if n.is_leaf() {
        return label;
    }

    let left = |tab: &str| print(arena, n.l, tab);
    let right = |tab: &str| print(arena, n.r, tab);
    label + &print_binary(tab, &left, &right)
}
