//! Bump allocation for tree nodes
//!
//! One arena per sort call. Capacity is fixed before the first insert,
//! the cursor only moves forward, and every node is released together.

mod allocator;

pub use allocator::{ArenaError, NodeArena};

/// Arena occupancy snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArenaUsage {
    /// Slots reserved up front
    pub capacity: usize,

    /// Slots handed out so far
    pub allocated: usize,
}

impl ArenaUsage {
    /// Slots still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.allocated
    }

    /// Every reserved slot was used, none more
    pub fn is_exact(&self) -> bool {
        self.allocated == self.capacity
    }
}
