//! Single and double rotations
//!
//! Each rotation re-roots a small cluster, keeps the in-order key
//! sequence intact, and refreshes the cached heights it touched.

use tracing::trace;

use super::node::{refresh_height, NodeId};
use crate::arena::NodeArena;

/// Which way an insertion pushed a node out of balance
///
/// First half names the heavy child of the unbalanced node,
/// second half the side of that child the new key landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Imbalance {
    /// Left child, left side: one right rotation
    LeftLeft,
    /// Right child, right side: one left rotation
    RightRight,
    /// Left child, right side: left then right rotation
    LeftRight,
    /// Right child, left side: right then left rotation
    RightLeft,
}

impl Imbalance {
    /// Needs two rotations
    pub fn is_double(self) -> bool {
        matches!(self, Imbalance::LeftRight | Imbalance::RightLeft)
    }
}

/// Rotate `y` down to the right; its left child becomes the subtree root
///
/// ```text
///       y            x
///      / \          / \
///     x   C   ->   A   y
///    / \              / \
///   A   B            B   C
/// ```
pub fn rotate_right<K>(arena: &mut NodeArena<K>, y: NodeId) -> NodeId {
    let Some(x) = arena[y].left else {
        unreachable!("right rotation at {y} without a left child");
    };

    arena[y].left = arena[x].right;
    arena[x].right = Some(y);

    // y now sits below x
    refresh_height(arena, y);
    refresh_height(arena, x);
    x
}

/// Rotate `x` down to the left; its right child becomes the subtree root
pub fn rotate_left<K>(arena: &mut NodeArena<K>, x: NodeId) -> NodeId {
    let Some(y) = arena[x].right else {
        unreachable!("left rotation at {x} without a right child");
    };

    arena[x].right = arena[y].left;
    arena[y].left = Some(x);

    refresh_height(arena, x);
    refresh_height(arena, y);
    y
}

/// Apply the rotation(s) that repair `case` at `node`, returning the new subtree root
pub fn rebalance<K>(arena: &mut NodeArena<K>, node: NodeId, case: Imbalance) -> NodeId {
    trace!(node = %node, ?case, "rebalancing");

    match case {
        Imbalance::LeftLeft => rotate_right(arena, node),
        Imbalance::RightRight => rotate_left(arena, node),
        Imbalance::LeftRight => {
            let Some(left) = arena[node].left else {
                unreachable!("left-right repair at {node} without a left child");
            };
            let pivot = rotate_left(arena, left);
            arena[node].left = Some(pivot);
            rotate_right(arena, node)
        }
        Imbalance::RightLeft => {
            let Some(right) = arena[node].right else {
                unreachable!("right-left repair at {node} without a right child");
            };
            let pivot = rotate_right(arena, right);
            arena[node].right = Some(pivot);
            rotate_left(arena, node)
        }
    }
}
