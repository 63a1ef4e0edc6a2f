//! Arena node representation
//!
//! A node is a key, two child links and a cached height.
//! Links are indices into the owning arena, never pointers:
//! the arena owns every node, children are just relations inside it.

use std::fmt;

use crate::arena::NodeArena;

/// Handle to a node inside one [`NodeArena`]
///
/// Only meaningful for the arena that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Largest number of nodes a single arena can address
    pub const MAX_NODES: usize = u32::MAX as usize;

    /// Wrap a slot index; caller guarantees `index < MAX_NODES`
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::MAX_NODES, "slot {index} outside handle range");
        Self(index as u32)
    }

    /// Slot index inside the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Optional child reference; `None` is the empty subtree
pub type Link = Option<NodeId>;

/// Balanced-tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<K> {
    /// Sort key
    pub key: K,

    /// Subtree of keys ordered before `key`
    pub left: Link,

    /// Subtree of keys ordered at or after `key`
    pub right: Link,

    /// Cached subtree height (a lone node has height 1)
    pub height: u32,
}

impl<K> Node<K> {
    /// Fresh childless node of height 1
    pub fn leaf(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Check if node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Height of a possibly-empty subtree (empty = 0)
#[inline]
pub fn height<K>(arena: &NodeArena<K>, link: Link) -> u32 {
    link.map_or(0, |id| arena[id].height)
}

/// Balance factor: height(left) - height(right)
#[inline]
pub fn balance_factor<K>(arena: &NodeArena<K>, id: NodeId) -> i64 {
    let node = &arena[id];
    i64::from(height(arena, node.left)) - i64::from(height(arena, node.right))
}

/// Recompute the cached height of `id` from its children
#[inline]
pub(crate) fn refresh_height<K>(arena: &mut NodeArena<K>, id: NodeId) {
    let node = &arena[id];
    let fresh = 1 + height(arena, node.left).max(height(arena, node.right));
    arena[id].height = fresh;
}
