//! Arena-backed AVL tree
//!
//! Nodes live in a [`NodeArena`] sized to the number of keys;
//! links are arena handles. Insertion keeps every node's balance
//! factor in [-1, 1], so height stays O(log n) even for sorted input.

mod insert;
mod node;
mod rotation;
mod traversal;

pub use insert::{insert, RotationStats};
pub use node::{balance_factor, height, Link, Node, NodeId};
pub use rotation::{rebalance, rotate_left, rotate_right, Imbalance};
pub use traversal::{in_order, InOrder};

use crate::arena::{ArenaError, ArenaUsage, NodeArena};

/// AVL tree owning the arena its nodes live in
#[derive(Debug)]
pub struct BalancedTree<K> {
    arena: NodeArena<K>,

    /// Current root, `None` until the first insert
    root: Link,

    /// Repair events so far
    rotations: RotationStats,
}

impl<K> BalancedTree<K> {
    /// Create an empty tree with room for exactly `capacity` keys
    pub fn with_capacity(capacity: usize) -> Result<Self, ArenaError> {
        Ok(Self {
            arena: NodeArena::reserve(capacity)?,
            root: None,
            rotations: RotationStats::default(),
        })
    }

    /// Root handle
    pub fn root(&self) -> Link {
        self.root
    }

    /// Backing arena
    pub fn arena(&self) -> &NodeArena<K> {
        &self.arena
    }

    /// Height of the whole tree (0 when empty)
    pub fn height(&self) -> u32 {
        height(&self.arena, self.root)
    }

    /// Number of keys inserted
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// No keys inserted yet
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Repair counts accumulated by inserts
    pub fn rotations(&self) -> RotationStats {
        self.rotations
    }

    /// Arena occupancy
    pub fn usage(&self) -> ArenaUsage {
        self.arena.usage()
    }

    /// Keys in ascending order, without recursion
    pub fn iter(&self) -> InOrder<'_, K> {
        InOrder::new(&self.arena, self.root, self.height() as usize)
    }

    /// Release the arena and every node in it
    pub fn release(self) -> ArenaUsage {
        self.arena.release()
    }
}

impl<K: Ord + Copy> BalancedTree<K> {
    /// Insert one key
    ///
    /// # Panics
    ///
    /// If the tree already holds `capacity` keys.
    pub fn insert(&mut self, key: K) {
        let root = insert(&mut self.arena, self.root, key, &mut self.rotations);
        self.root = Some(root);
    }

    /// Write all keys in ascending order into the front of `output`
    ///
    /// Returns the number of keys written.
    ///
    /// # Panics
    ///
    /// If `output` is shorter than [`len`](Self::len).
    pub fn write_in_order(&self, output: &mut [K]) -> usize {
        assert!(
            output.len() >= self.len(),
            "output holds {} slots but the tree has {} keys",
            output.len(),
            self.len()
        );

        let mut cursor = 0;
        in_order(&self.arena, self.root, output, &mut cursor);
        cursor
    }
}

/// Largest height an AVL tree with `n` nodes can reach
///
/// Knuth's bound h < 1.4405 log2(n + 2) - 0.3277, rounded down.
pub fn avl_height_bound(n: usize) -> usize {
    (1.4405 * ((n + 2) as f64).log2() - 0.3277).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_bound_matches_minimal_trees() {
        // Sparsest AVL tree of height h has N(h) = N(h-1) + N(h-2) + 1 nodes
        let mut sparse = vec![0usize, 1];
        for h in 2..30 {
            sparse.push(sparse[h - 1] + sparse[h - 2] + 1);
        }
        for (h, &n) in sparse.iter().enumerate().skip(1) {
            assert!(
                avl_height_bound(n) >= h,
                "bound {} for n={} below reachable height {}",
                avl_height_bound(n),
                n,
                h
            );
        }
    }

    #[test]
    fn test_height_bound_small_values() {
        assert_eq!(avl_height_bound(1), 1);
        assert_eq!(avl_height_bound(2), 2);
        assert_eq!(avl_height_bound(4), 3);
        assert_eq!(avl_height_bound(7), 4);
    }

    #[test]
    fn test_tree_insert_and_flatten() {
        let keys = [9, 8, 7, 6, 5, 4, 3, 2, 1];
        let mut tree = BalancedTree::with_capacity(keys.len()).unwrap();
        for key in keys {
            tree.insert(key);
        }

        assert_eq!(tree.len(), 9);
        assert!(tree.height() as usize <= avl_height_bound(9));

        let mut output = [0; 9];
        assert_eq!(tree.write_in_order(&mut output), 9);
        assert_eq!(output, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(tree.iter().copied().eq(output.iter().copied()));

        let usage = tree.release();
        assert!(usage.is_exact());
    }

    #[test]
    fn test_empty_tree() {
        let tree = BalancedTree::<i32>::with_capacity(4).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "output holds")]
    fn test_write_into_short_slice_panics() {
        let mut tree = BalancedTree::with_capacity(2).unwrap();
        tree.insert(1);
        tree.insert(2);
        let mut output = [0; 1];
        tree.write_in_order(&mut output);
    }
}
