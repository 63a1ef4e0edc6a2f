//! Fixed-capacity node arena

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

use thiserror::Error;

use super::ArenaUsage;
use crate::tree::{Node, NodeId};

/// Errors raised while reserving arena storage
#[derive(Debug, Error)]
pub enum ArenaError {
    /// Capacity of zero requested.
    #[error("arena capacity must be greater than zero")]
    ZeroCapacity,

    /// Capacity does not fit the node handle range.
    #[error("arena capacity {requested} exceeds the addressable node count {max}")]
    CapacityOverflow {
        /// Requested number of nodes
        requested: usize,
        /// Largest supported number of nodes
        max: usize,
    },

    /// Backing storage could not be obtained.
    #[error("failed to reserve arena storage: {0}")]
    Reservation(#[from] TryReserveError),
}

/// Pre-sized node storage with a monotonic cursor
///
/// Nodes are never freed one at a time; the arena is dropped as a unit
/// via [`NodeArena::release`].
#[derive(Debug)]
pub struct NodeArena<K> {
    /// Allocated nodes; `nodes.len()` is the cursor
    nodes: Vec<Node<K>>,

    /// Reserved slot count
    capacity: usize,
}

impl<K> NodeArena<K> {
    /// Reserve storage for exactly `capacity` nodes
    pub fn reserve(capacity: usize) -> Result<Self, ArenaError> {
        if capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        if capacity > NodeId::MAX_NODES {
            return Err(ArenaError::CapacityOverflow {
                requested: capacity,
                max: NodeId::MAX_NODES,
            });
        }

        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;

        Ok(Self { nodes, capacity })
    }

    /// Hand out the next slot as a childless node of height 1
    ///
    /// # Panics
    ///
    /// When every reserved slot is already in use. The arena is always sized
    /// to the input length, so reaching this is a sizing bug in the caller.
    pub fn allocate(&mut self, key: K) -> NodeId {
        let cursor = self.nodes.len();
        assert!(
            cursor < self.capacity,
            "node arena exhausted: all {} reserved slots already allocated",
            self.capacity
        );

        // Within the reservation, so push never reallocates
        self.nodes.push(Node::leaf(key));
        NodeId::from_index(cursor)
    }

    /// Look up a node, `None` for handles this arena never issued
    pub fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.nodes.get(id.index())
    }

    /// Reserved slot count
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of allocated nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// No node allocated yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current occupancy
    pub fn usage(&self) -> ArenaUsage {
        ArenaUsage {
            capacity: self.capacity,
            allocated: self.nodes.len(),
        }
    }

    /// Drop every node at once
    ///
    /// Consumes the arena, so no handle can be resolved against it afterwards.
    pub fn release(self) -> ArenaUsage {
        let usage = self.usage();
        drop(self.nodes);
        usage
    }
}

impl<K> Index<NodeId> for NodeArena<K> {
    type Output = Node<K>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.index()]
    }
}

impl<K> IndexMut<NodeId> for NodeArena<K> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_rejects_zero() {
        let err = NodeArena::<i32>::reserve(0).unwrap_err();
        assert!(matches!(err, ArenaError::ZeroCapacity));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_reserve_rejects_capacity_past_handle_range() {
        let requested = NodeId::MAX_NODES + 1;
        let err = NodeArena::<i32>::reserve(requested).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::CapacityOverflow { requested: r, max } if r == requested && max == NodeId::MAX_NODES
        ));
    }

    #[test]
    fn test_allocate_hands_out_sequential_slots() {
        let mut arena = NodeArena::reserve(3).unwrap();
        let a = arena.allocate(10);
        let b = arena.allocate(20);

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena[b].key, 20);
        assert_eq!(arena[b].height, 1);
        assert!(arena[b].is_leaf());
        assert_eq!(arena.usage(), ArenaUsage { capacity: 3, allocated: 2 });
        assert_eq!(arena.usage().remaining(), 1);
    }

    #[test]
    fn test_storage_is_not_reallocated() {
        let mut arena = NodeArena::reserve(64).unwrap();
        let base = arena.nodes.as_ptr();
        for key in 0..64 {
            arena.allocate(key);
        }
        assert_eq!(arena.nodes.as_ptr(), base);
        assert!(arena.usage().is_exact());
    }

    #[test]
    #[should_panic(expected = "node arena exhausted")]
    fn test_allocate_past_capacity_panics() {
        let mut arena = NodeArena::reserve(1).unwrap();
        arena.allocate(1);
        arena.allocate(2);
    }

    #[test]
    fn test_get_unknown_handle() {
        let mut arena = NodeArena::reserve(2).unwrap();
        arena.allocate(1);
        assert!(arena.get(NodeId::from_index(0)).is_some());
        assert!(arena.get(NodeId::from_index(1)).is_none());
    }

    #[test]
    fn test_release_reports_usage() {
        let mut arena = NodeArena::reserve(2).unwrap();
        arena.allocate('a');
        let usage = arena.release();
        assert_eq!(usage.allocated, 1);
        assert!(!usage.is_exact());
    }
}
