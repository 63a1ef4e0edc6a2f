//! Structural invariant checks
//!
//! Walks a tree and confirms what insertion promises: in-order keys never
//! decrease, cached heights are exact, every balance factor is in [-1, 1],
//! and each allocated node hangs off the root exactly once.
//!
//! Equal keys may end up on either side of each other after a left rotation,
//! so ordering is checked as `left <= node <= right`.

use bitvec::prelude::*;
use thiserror::Error;

use crate::arena::NodeArena;
use crate::tree::{BalancedTree, Link, NodeId};

/// First invariant violation found by [`check`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuditError {
    /// Key falls outside the range its ancestors allow.
    #[error("order violated at node {node}")]
    OrderViolation {
        /// Offending node
        node: NodeId,
    },

    /// Cached height disagrees with the children.
    #[error("stale height at node {node}: cached {cached}, actual {actual}")]
    HeightMismatch {
        /// Offending node
        node: NodeId,
        /// Height stored in the node
        cached: u32,
        /// Height recomputed from the children
        actual: u32,
    },

    /// Subtree heights differ by more than one.
    #[error("node {node} out of balance: factor {balance}")]
    Unbalanced {
        /// Offending node
        node: NodeId,
        /// height(left) - height(right)
        balance: i64,
    },

    /// Link refers to a slot the arena never handed out.
    #[error("dangling link to node {node}")]
    DanglingLink {
        /// Unresolvable handle
        node: NodeId,
    },

    /// Node reachable along more than one path.
    #[error("node {node} reached more than once from the root")]
    SharedNode {
        /// Node visited twice
        node: NodeId,
    },

    /// Allocated nodes not reachable from the root.
    #[error("{count} allocated node(s) unreachable from the root")]
    Unreachable {
        /// Number of orphaned nodes
        count: usize,
    },
}

/// What a successful audit saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AuditSummary {
    /// Nodes reachable from the root
    pub nodes: usize,

    /// Recomputed tree height
    pub height: u32,
}

/// Audit a whole tree
pub fn check<K: Ord>(tree: &BalancedTree<K>) -> Result<AuditSummary, AuditError> {
    check_subtree(tree.arena(), tree.root())
}

/// Audit the subtree under `root`; every allocated node must belong to it
pub fn check_subtree<K: Ord>(arena: &NodeArena<K>, root: Link) -> Result<AuditSummary, AuditError> {
    let mut seen = bitvec![0; arena.len()];
    let height = visit(arena, root, None, None, &mut seen)?;

    let nodes = seen.count_ones();
    let orphaned = arena.len() - nodes;
    if orphaned > 0 {
        return Err(AuditError::Unreachable { count: orphaned });
    }

    Ok(AuditSummary { nodes, height })
}

/// Recursive check; returns the recomputed height of `link`
///
/// `lower` and `upper` are inclusive key bounds inherited from ancestors.
fn visit<K: Ord>(
    arena: &NodeArena<K>,
    link: Link,
    lower: Option<&K>,
    upper: Option<&K>,
    seen: &mut BitVec,
) -> Result<u32, AuditError> {
    let Some(id) = link else {
        return Ok(0);
    };
    let node = arena.get(id).ok_or(AuditError::DanglingLink { node: id })?;

    if seen.replace(id.index(), true) {
        return Err(AuditError::SharedNode { node: id });
    }

    let below_lower = lower.is_some_and(|bound| node.key < *bound);
    let above_upper = upper.is_some_and(|bound| node.key > *bound);
    if below_lower || above_upper {
        return Err(AuditError::OrderViolation { node: id });
    }

    let left = visit(arena, node.left, lower, Some(&node.key), seen)?;
    let right = visit(arena, node.right, Some(&node.key), upper, seen)?;

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(AuditError::HeightMismatch {
            node: id,
            cached: node.height,
            actual,
        });
    }

    let balance = i64::from(left) - i64::from(right);
    if balance.abs() > 1 {
        return Err(AuditError::Unbalanced { node: id, balance });
    }

    Ok(actual)
}
