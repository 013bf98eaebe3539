//! B-tree operation counters.

use std::fmt;

/// Counters tracked by a [`BTree`](crate::BTree).
///
/// The tree is only mutated through `&mut self`, so plain integers are
/// enough. [`SharedBTree`](crate::SharedBTree) reads them under its lock.
///
/// # Example
/// ```
/// use treeindex::BTree;
///
/// let mut tree = BTree::new(2).unwrap();
/// for k in 0..4 {
///     tree.insert(k, ());
/// }
///
/// let stats = tree.stats();
/// assert_eq!(stats.inserts, 4);
/// assert_eq!(stats.root_splits, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of completed inserts.
    pub inserts: u64,

    /// Number of node splits, root splits included.
    pub node_splits: u64,

    /// Number of times the root split and the tree grew a level.
    pub root_splits: u64,
}

impl TreeStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Average splits per insert (0.0 when nothing was inserted).
    pub fn splits_per_insert(&self) -> f64 {
        if self.inserts == 0 {
            0.0
        } else {
            self.node_splits as f64 / self.inserts as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn record_insert(&mut self, splits: u64, root_split: bool) {
        self.inserts += 1;
        self.node_splits += splits;
        if root_split {
            self.root_splits += 1;
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, splits: {}, root_splits: {}, splits_per_insert: {:.3} }}",
            self.inserts,
            self.node_splits,
            self.root_splits,
            self.splits_per_insert()
        )
    }
}
