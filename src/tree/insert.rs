//! Recursive AVL insertion
//!
//! Places a key, then repairs balance on the way back up.
//! Recursion depth is the tree height, O(log n).

use super::node::{balance_factor, refresh_height, Link, NodeId};
use super::rotation::{rebalance, Imbalance};
use crate::arena::NodeArena;

/// Rotation counts per repair case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RotationStats {
    /// Single right rotations
    pub left_left: usize,
    /// Single left rotations
    pub right_right: usize,
    /// Left-then-right double rotations
    pub left_right: usize,
    /// Right-then-left double rotations
    pub right_left: usize,
}

impl RotationStats {
    /// Record one repair
    pub fn record(&mut self, case: Imbalance) {
        match case {
            Imbalance::LeftLeft => self.left_left += 1,
            Imbalance::RightRight => self.right_right += 1,
            Imbalance::LeftRight => self.left_right += 1,
            Imbalance::RightLeft => self.right_left += 1,
        }
    }

    /// Number of repair events (a double rotation counts once)
    pub fn events(&self) -> usize {
        self.left_left + self.right_right + self.left_right + self.right_left
    }

    /// Number of primitive rotations performed
    pub fn rotations(&self) -> usize {
        self.left_left + self.right_right + 2 * (self.left_right + self.right_left)
    }
}

/// Insert `key` below `root`, returning the (possibly new) subtree root
///
/// Equal keys go right, so equal keys come out of an in-order walk in
/// insertion order. Allocates exactly one node from `arena`.
pub fn insert<K: Ord + Copy>(
    arena: &mut NodeArena<K>,
    root: Link,
    key: K,
    stats: &mut RotationStats,
) -> NodeId {
    let Some(node) = root else {
        return arena.allocate(key);
    };

    if key < arena[node].key {
        let left = arena[node].left;
        arena[node].left = Some(insert(arena, left, key, stats));
    } else {
        let right = arena[node].right;
        arena[node].right = Some(insert(arena, right, key, stats));
    }

    refresh_height(arena, node);

    match classify(arena, node, &key) {
        Some(case) => {
            stats.record(case);
            rebalance(arena, node, case)
        }
        None => node,
    }
}

/// Pick the repair case for `node` after `key` was inserted beneath it
///
/// The side of the heavy child is read off the inserted key rather than the
/// child's own balance factor. That only holds for insert-only trees, where
/// the key's path is the only thing that changed; removal would need the
/// child's balance factor instead.
fn classify<K: Ord>(arena: &NodeArena<K>, node: NodeId, key: &K) -> Option<Imbalance> {
    let balance = balance_factor(arena, node);

    if balance > 1 {
        let left = arena[node].left?;
        if *key < arena[left].key {
            Some(Imbalance::LeftLeft)
        } else {
            Some(Imbalance::LeftRight)
        }
    } else if balance < -1 {
        let right = arena[node].right?;
        if *key < arena[right].key {
            Some(Imbalance::RightLeft)
        } else {
            Some(Imbalance::RightRight)
        }
    } else {
        None
    }
}
