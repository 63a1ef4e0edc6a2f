//! # Tree Sort over an Arena-Backed AVL Tree
//!
//! Sorts a slice by inserting every element into a self-balancing binary
//! search tree and reading it back in order.
//!
//! ## Core Algorithm
//!
//! 1. **Reserve**: one node arena sized to exactly `n` slots
//! 2. **Insert**: fold AVL insertion over the input, rotating on the way up
//! 3. **Flatten**: in-order walk writes keys back into the input slice
//! 4. **Release**: the arena is dropped as a unit
//!
//! Result: O(n log n) time, O(n) auxiliary nodes, O(log n) recursion depth
//! even for already-sorted or reverse-sorted input.
//!
//! ## Usage Example
//!
//! ```
//! use avl_treesort::tree_sort;
//!
//! let mut values = vec![5, 3, 8, 1, 4, 7, 9, 2, 6];
//! tree_sort(&mut values)?;
//! assert_eq!(values, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! # Ok::<(), avl_treesort::SortError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod arena; // Bump-allocated node storage
pub mod audit; // Structural invariant checks
pub mod tree; // AVL insert, rotations, traversal

// Re-exports for convenience
pub use arena::{ArenaError, ArenaUsage, NodeArena};
pub use audit::{AuditError, AuditSummary};
pub use tree::{avl_height_bound, BalancedTree, Imbalance, RotationStats};

use thiserror::Error;
use tracing::{debug, warn};

/// Sort `sequence` in place with the default configuration
///
/// Equal elements keep their original relative order.
pub fn tree_sort<K: Ord + Copy>(sequence: &mut [K]) -> Result<(), SortError> {
    TreeSorter::new(SortConfig::default()).sort(sequence)?;
    Ok(())
}

/// How the final tree is flattened back into the slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Recursive in-order writer
    #[default]
    Recursive,

    /// Explicit-stack iterator, no recursion
    Iterative,
}

/// Configuration parameters for a sort
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Audit the finished tree before flattening
    pub verify_invariants: bool,

    /// Flattening strategy
    pub traversal: Traversal,

    /// Slack multiplier applied to the AVL height bound in reports
    pub max_height_factor: f64,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            verify_invariants: false,
            traversal: Traversal::Recursive,
            max_height_factor: 1.0,
        }
    }
}

impl SortConfig {
    /// Configuration that audits every sort
    pub fn verified() -> Self {
        Self {
            verify_invariants: true,
            ..Self::default()
        }
    }

    /// Height bound for `n` elements, scaled by `max_height_factor`
    pub fn height_bound(&self, n: usize) -> usize {
        (avl_height_bound(n) as f64 * self.max_height_factor).floor() as usize
    }
}

/// What one sort did
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortReport {
    /// Number of elements sorted
    pub elements: usize,

    /// Height of the final tree
    pub tree_height: u32,

    /// Allowed height for `elements` keys
    pub height_bound: usize,

    /// Repair events per case
    pub rotations: RotationStats,

    /// Arena occupancy at release
    pub arena: ArenaUsage,

    /// Audit result, when verification was enabled
    pub audit: Option<AuditSummary>,
}

impl SortReport {
    /// Report for an empty input
    fn empty(height_bound: usize) -> Self {
        Self {
            elements: 0,
            tree_height: 0,
            height_bound,
            rotations: RotationStats::default(),
            arena: ArenaUsage::default(),
            audit: None,
        }
    }

    /// Final tree stayed within the height bound
    pub fn satisfies_height_bound(&self) -> bool {
        self.tree_height as usize <= self.height_bound
    }

    /// Human-readable summary
    pub fn report(&self) -> String {
        let mut out = format!(
            "Elements: {}\nTree height: {} (bound {})\nRotations: {} events, {} primitive\n  LL: {}\n  RR: {}\n  LR: {}\n  RL: {}\nArena: {}/{} nodes",
            self.elements,
            self.tree_height,
            self.height_bound,
            self.rotations.events(),
            self.rotations.rotations(),
            self.rotations.left_left,
            self.rotations.right_right,
            self.rotations.left_right,
            self.rotations.right_left,
            self.arena.allocated,
            self.arena.capacity,
        );
        if let Some(audit) = &self.audit {
            out.push_str(&format!(
                "\nAudit: ok ({} nodes, height {})",
                audit.nodes, audit.height
            ));
        }
        out
    }
}

/// Errors that can occur during a sort
#[derive(Error, Debug)]
pub enum SortError {
    /// Node arena could not be reserved
    #[error("arena reservation failed: {0}")]
    Arena(#[from] ArenaError),

    /// Audit found a broken tree
    #[error("tree invariant violated: {0}")]
    InvariantViolation(#[from] AuditError),
}

/// Sort orchestrator
///
/// Owns only configuration; every call gets its own arena, so one sorter
/// can serve any number of independent sorts.
#[derive(Debug, Clone, Default)]
pub struct TreeSorter {
    config: SortConfig,
}

impl TreeSorter {
    /// Create sorter
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Sort `sequence` in place
    ///
    /// 1. Reserve an arena of `sequence.len()` nodes
    /// 2. Insert every element in original order
    /// 3. Flatten the tree back into `sequence`
    /// 4. Release the arena
    pub fn sort<K: Ord + Copy>(&self, sequence: &mut [K]) -> Result<SortReport, SortError> {
        let n = sequence.len();
        let height_bound = self.config.height_bound(n);

        if n == 0 {
            debug!("empty input, skipping tree");
            return Ok(SortReport::empty(height_bound));
        }

        debug!(elements = n, "tree sort started");

        let mut tree = BalancedTree::with_capacity(n)?;
        for &key in sequence.iter() {
            tree.insert(key);
        }

        let audit = if self.config.verify_invariants {
            Some(audit::check(&tree)?)
        } else {
            None
        };

        let written = match self.config.traversal {
            Traversal::Recursive => tree.write_in_order(sequence),
            Traversal::Iterative => {
                let mut written = 0;
                for (slot, &key) in sequence.iter_mut().zip(tree.iter()) {
                    *slot = key;
                    written += 1;
                }
                written
            }
        };
        debug_assert_eq!(written, n, "flatten wrote {written} of {n} keys");

        let tree_height = tree.height();
        let rotations = tree.rotations();
        let arena = tree.release();
        debug_assert!(arena.is_exact(), "arena usage {arena:?} for {n} keys");

        let report = SortReport {
            elements: n,
            tree_height,
            height_bound,
            rotations,
            arena,
            audit,
        };

        if !report.satisfies_height_bound() {
            warn!(
                elements = n,
                height = tree_height,
                bound = height_bound,
                "tree height exceeded bound"
            );
        }

        debug!(
            elements = n,
            height = tree_height,
            rotations = rotations.events(),
            "tree sort finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SortConfig::default();
        assert!(!config.verify_invariants);
        assert_eq!(config.traversal, Traversal::Recursive);
        assert_eq!(config.height_bound(9), avl_height_bound(9));
    }

    #[test]
    fn test_scaled_height_bound() {
        let config = SortConfig {
            max_height_factor: 2.0,
            ..SortConfig::default()
        };
        assert_eq!(config.height_bound(7), 8);
    }

    #[test]
    fn test_empty_input_skips_arena() {
        let mut empty: [i32; 0] = [];
        let report = TreeSorter::default().sort(&mut empty).unwrap();
        assert_eq!(report.elements, 0);
        assert_eq!(report.arena, ArenaUsage::default());
        assert_eq!(report.tree_height, 0);
    }

    #[test]
    fn test_single_element_allocates_one_node() {
        let mut single = [7];
        let report = TreeSorter::new(SortConfig::verified())
            .sort(&mut single)
            .unwrap();
        assert_eq!(single, [7]);
        assert_eq!(report.arena, ArenaUsage { capacity: 1, allocated: 1 });
        assert_eq!(report.tree_height, 1);
        assert_eq!(report.rotations, RotationStats::default());
        assert!(report.satisfies_height_bound());
    }

    #[test]
    fn test_report_mentions_audit() {
        let mut values = [3, 1, 2];
        let report = TreeSorter::new(SortConfig::verified())
            .sort(&mut values)
            .unwrap();
        assert_eq!(values, [1, 2, 3]);
        assert!(report.report().contains("Audit: ok (3 nodes, height 2)"));
        assert!(report.report().contains("LR: 1"));
    }

    #[test]
    fn test_iterative_flatten() {
        let mut values = [4, 2, 2, 2, 3];
        let config = SortConfig {
            traversal: Traversal::Iterative,
            ..SortConfig::default()
        };
        let report = TreeSorter::new(config).sort(&mut values).unwrap();
        assert_eq!(values, [2, 2, 2, 3, 4]);
        assert_eq!(report.arena, ArenaUsage { capacity: 5, allocated: 5 });
    }
}
