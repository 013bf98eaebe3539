//! BTree - the tree controller that owns the root.
//!
//! The [`BTree`] provides:
//! - Insertion with preemptive (top-down) splitting
//! - Point search returning the owning node and index
//! - Lazy in-order and pre-order traversals
//! - A diagnostic invariant checker

use std::borrow::Borrow;
use std::fmt;

use crate::common::{BTreeConfig, Error, Result};
use crate::index::btree::iter::{Iter, Traverse};
use crate::index::btree::node::{Node, SearchHit};
use crate::index::btree::stats::TreeStats;

/// An in-memory B-tree mapping ordered keys to values.
///
/// # Architecture
/// ```text
/// ┌───────────────────────────────────────────────┐
/// │                    BTree                      │
/// │  ┌──────────┐  ┌──────────┐  ┌────────────┐   │
/// │  │  config  │  │   root   │  │   stats    │   │
/// │  │ t, 2t-1  │  │ Node<K,V>│  │ TreeStats  │   │
/// │  └──────────┘  └────┬─────┘  └────────────┘   │
/// │                     ▼                         │
/// │        children: Vec<Node<K,V>> ...           │
/// └───────────────────────────────────────────────┘
/// ```
///
/// Every leaf sits at the same depth. Every non-root node holds between
/// `t - 1` and `2t - 1` keys. The root may hold fewer, and is empty only
/// before the first insert.
///
/// Duplicate keys are accepted. An entry whose key equals an existing one
/// is placed after it.
///
/// # Thread Safety
/// `insert` takes `&mut self`, so the borrow checker already serializes it
/// against `search`. Use [`SharedBTree`](crate::SharedBTree) to share one
/// tree across threads.
///
/// # Usage
/// ```
/// use treeindex::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for i in 0..20 {
///     tree.insert(i, 2 * i);
/// }
///
/// let hit = tree.search(&8).unwrap();
/// assert_eq!(*hit.value(), 16);
/// assert!(tree.height() > 1);
/// assert!(tree.search(&42).is_none());
/// ```
#[derive(Clone)]
pub struct BTree<K, V> {
    /// Root node. Replaced, never mutated into a new shape in place, when
    /// it splits.
    root: Node<K, V>,

    /// Degree bounds (immutable after construction).
    config: BTreeConfig,

    /// Total number of entries.
    len: usize,

    /// Operation counters.
    stats: TreeStats,
}

impl<K: Ord, V> BTree<K, V> {
    /// Create an empty tree with minimum degree `min_degree`.
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if `min_degree` is outside
    ///   `2..=MAX_MIN_DEGREE`
    pub fn new(min_degree: usize) -> Result<Self> {
        Ok(Self::with_config(BTreeConfig::new(min_degree)?))
    }

    /// Create an empty tree from an already validated configuration.
    pub fn with_config(config: BTreeConfig) -> Self {
        tracing::debug!(
            min_degree = config.min_degree(),
            max_keys = config.max_keys(),
            "created B-tree"
        );
        Self {
            root: Node::new_leaf(),
            config,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Insert
    // ========================================================================

    /// Insert `(key, value)`.
    ///
    /// If the root is full it is split first and the tree grows by one
    /// level. The descent then splits every full child before entering it,
    /// so a single root-to-leaf pass is enough.
    pub fn insert(&mut self, key: K, value: V) {
        let root_split = self.root.is_full(&self.config);
        let mut splits = 0;

        if root_split {
            let old_root = std::mem::replace(&mut self.root, Node::new_leaf());
            let mut new_root = Node::new_parent_of(old_root);
            new_root.split_child(0, &self.config);
            self.root = new_root;
            splits += 1;
            tracing::debug!(height = self.height(), "root split, tree grew one level");
        }

        splits += self.root.insert_non_full(key, value, &self.config);
        self.len += 1;
        self.stats.record_insert(splits, root_split);

        debug_assert!(self.root.len() <= self.config.max_keys());
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Find the first entry whose key equals `key`.
    ///
    /// Returns the node holding it and its index within that node, or
    /// `None` if the key is absent.
    pub fn search<Q>(&self, key: &Q) -> Option<SearchHit<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.root.search(key)
    }

    /// Value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(|hit| hit.value())
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Verify every structural invariant.
    ///
    /// Walks the whole tree, checking key-count bounds, child counts,
    /// in-node and cross-separator ordering, equal leaf depth and the
    /// cached length.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken invariant
    pub fn check_invariants(&self) -> Result<()> {
        let counted = self.root.check(&self.config, 0, &mut None, None, None)?;
        if counted != self.len {
            return Err(Error::InvariantViolation(format!(
                "tree reports {} entries but holds {}",
                self.len, counted
            )));
        }
        Ok(())
    }
}

impl<K, V> BTree<K, V> {
    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels, counting the root. A lone leaf root has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = &self.root;
        while let Some(child) = node.children().first() {
            node = child;
            height += 1;
        }
        height
    }

    /// The minimum degree `t`.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.config.min_degree()
    }

    /// The tree's configuration.
    #[inline]
    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &Node<K, V> {
        &self.root
    }

    /// Snapshot of the operation counters.
    #[inline]
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Reset the operation counters to zero.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Every node paired with its depth, parents before children.
    pub fn traverse(&self) -> Traverse<'_, K, V> {
        Traverse::new(&self.root)
    }
}

impl<K: Ord, V> Default for BTree<K, V> {
    fn default() -> Self {
        Self::with_config(BTreeConfig::default())
    }
}

impl<K: Ord, V> Extend<(K, V)> for BTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a BTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// One line per node in pre-order:
///
/// ```text
/// Level 0 : 1 keys -> (2, 4)
/// Level 1 : 2 keys -> (0, 0) (1, 2)
/// Level 1 : 2 keys -> (3, 6) (4, 8)
/// ```
///
/// Each entry is preceded by a single space, so lines carry no trailing
/// whitespace.
impl<K: fmt::Debug, V: fmt::Debug> fmt::Display for BTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, node) in self.traverse() {
            write!(f, "Level {} : {} keys ->", depth, node.len())?;
            for (k, v) in node.entries() {
                write!(f, " ({:?}, {:?})", k, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
