//! In-order flattening
//!
//! Two equivalent walks: a recursive writer into a slice, and an
//! explicit-stack iterator for callers that want no recursion at all.
//! Neither allocates nodes nor touches the tree.

use super::node::{Link, NodeId};
use crate::arena::NodeArena;

/// Write the keys under `root` into `output[*cursor..]` in ascending order
///
/// Advances `cursor` once per key written.
///
/// # Panics
///
/// If `output` has fewer free slots than the subtree has nodes.
pub fn in_order<K: Copy>(arena: &NodeArena<K>, root: Link, output: &mut [K], cursor: &mut usize) {
    let Some(id) = root else {
        return;
    };
    let node = &arena[id];

    in_order(arena, node.left, output, cursor);
    output[*cursor] = node.key;
    *cursor += 1;
    in_order(arena, node.right, output, cursor);
}

/// Stack-based in-order iterator
///
/// Holds at most one handle per tree level.
#[derive(Debug)]
pub struct InOrder<'a, K> {
    arena: &'a NodeArena<K>,

    /// Ancestors whose key has not been yielded yet
    stack: Vec<NodeId>,

    /// Next subtree to descend into
    pending: Link,
}

impl<'a, K> InOrder<'a, K> {
    /// Start a walk at `root`; `depth_hint` pre-sizes the ancestor stack
    pub fn new(arena: &'a NodeArena<K>, root: Link, depth_hint: usize) -> Self {
        Self {
            arena,
            stack: Vec::with_capacity(depth_hint),
            pending: root,
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        while let Some(id) = self.pending {
            self.stack.push(id);
            self.pending = self.arena[id].left;
        }

        let id = self.stack.pop()?;
        let node = &self.arena[id];
        self.pending = node.right;
        Some(&node.key)
    }
}
