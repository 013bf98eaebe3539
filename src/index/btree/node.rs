//! Node - one level of fan-out in the B-tree.
//!
//! A [`Node`] holds a sorted run of key-value entries and, when internal,
//! one more child than it has entries:
//!
//! ```text
//!            [ k0 | k1 | k2 ]
//!           /     |    |     \
//!      child0 child1 child2 child3
//!      (<=k0) (k0..k1) (k1..k2) (>=k2)
//! ```
//!
//! Keys equal to a separator are routed into the subtree on its right when
//! inserting. A child's keys lie between its bounding separators, inclusive.

use std::borrow::Borrow;

use crate::common::{BTreeConfig, Error, Result};

/// A node of the B-tree.
///
/// Nodes own their children outright. No node is ever shared between two
/// parents or retained outside its tree, so plain `Vec` ownership is enough.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// True if the node has no children.
    is_leaf: bool,

    /// Entries sorted by key (non-decreasing).
    entries: Vec<(K, V)>,

    /// Empty for leaves, otherwise `entries.len() + 1` subtrees.
    children: Vec<Node<K, V>>,
}

/// Result of a successful [`search`](crate::BTree::search): the node that
/// owns the key and the key's index inside that node.
#[derive(Debug)]
pub struct SearchHit<'a, K, V> {
    node: &'a Node<K, V>,
    index: usize,
}

impl<'a, K, V> SearchHit<'a, K, V> {
    /// The node holding the key.
    #[inline]
    pub fn node(&self) -> &'a Node<K, V> {
        self.node
    }

    /// Index of the key within [`node`](Self::node).
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stored key.
    #[inline]
    pub fn key(&self) -> &'a K {
        &self.node.entries[self.index].0
    }

    /// The stored value.
    #[inline]
    pub fn value(&self) -> &'a V {
        &self.node.entries[self.index].1
    }
}

impl<K, V> Clone for SearchHit<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for SearchHit<'_, K, V> {}

impl<K, V> Node<K, V> {
    /// Create an empty leaf (the initial root).
    pub(crate) fn new_leaf() -> Self {
        Self {
            is_leaf: true,
            entries: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an internal node whose sole child is `child`.
    ///
    /// Only valid as the first step of a root split: the caller must split
    /// child 0 right away to restore `children == entries + 1`.
    pub(crate) fn new_parent_of(child: Node<K, V>) -> Self {
        Self {
            is_leaf: false,
            entries: Vec::new(),
            children: vec![child],
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Whether the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Number of keys in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the node holds no keys (only possible for a fresh root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    #[inline]
    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Child subtrees, left to right. Empty for leaves.
    #[inline]
    pub fn children(&self) -> &[Node<K, V>] {
        &self.children
    }

    /// Whether the node holds the maximum number of keys.
    #[inline]
    pub fn is_full(&self, config: &BTreeConfig) -> bool {
        self.entries.len() == config.max_keys()
    }
}

impl<K: Ord, V> Node<K, V> {
    // ========================================================================
    // Search
    // ========================================================================

    /// Find the first entry equal to `key` in the subtree rooted here.
    ///
    /// At each node the keys are scanned for the first `key' >= key`. An
    /// exact match is a hit; otherwise the descent continues into the child
    /// at the stopping index until a leaf is exhausted.
    pub fn search<Q>(&self, key: &Q) -> Option<SearchHit<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = self;
        loop {
            let index = node
                .entries
                .partition_point(|(k, _)| <K as Borrow<Q>>::borrow(k) < key);

            if let Some((k, _)) = node.entries.get(index) {
                if <K as Borrow<Q>>::borrow(k) == key {
                    return Some(SearchHit { node, index });
                }
            }
            if node.is_leaf {
                return None;
            }
            node = &node.children[index];
        }
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Index of the child whose subtree receives `key`.
    ///
    /// This is the first index whose separator is strictly greater than
    /// `key`, defaulting to the last child. Equal keys route right.
    #[inline]
    fn child_index_for(&self, key: &K) -> usize {
        self.entries.partition_point(|(k, _)| k <= key)
    }

    /// Insert into a leaf by appending and shifting into place.
    ///
    /// The new entry moves left only past strictly greater keys, so it
    /// lands after any entries with an equal key.
    fn insert_into_leaf(&mut self, key: K, value: V) {
        let mut index = self.entries.len();
        self.entries.push((key, value));
        while index > 0 && self.entries[index - 1].0 > self.entries[index].0 {
            self.entries.swap(index - 1, index);
            index -= 1;
        }
    }

    /// Insert into the subtree rooted at this node, which must not be full.
    ///
    /// Full children are split before descending into them, so the recursion
    /// never has to travel back up. Returns the number of splits performed.
    pub(crate) fn insert_non_full(&mut self, key: K, value: V, config: &BTreeConfig) -> u64 {
        debug_assert!(!self.is_full(config), "insert_non_full on a full node");

        if self.is_leaf {
            self.insert_into_leaf(key, value);
            return 0;
        }

        let mut index = self.child_index_for(&key);
        let mut splits = 0;

        if self.children[index].is_full(config) {
            self.split_child(index, config);
            splits += 1;
            // The promoted median now separates child `index` from its new
            // right sibling.
            if key >= self.entries[index].0 {
                index += 1;
            }
        }

        splits + self.children[index].insert_non_full(key, value, config)
    }
}

impl<K, V> Node<K, V> {
    /// Split the full child at `child_index`.
    ///
    /// ```text
    ///   before (t = 3):  parent [ .. P .. ]
    ///                              |
    ///                     [ a b M c d ]
    ///
    ///   after:           parent [ .. M P .. ]
    ///                              /   \
    ///                         [ a b ] [ c d ]
    /// ```
    ///
    /// The median (index `t - 1`) is promoted into `self` at `child_index`,
    /// both halves keep `t - 1` keys, and an internal child's `2t` children
    /// are divided `t` / `t`. The new right half becomes child
    /// `child_index + 1`.
    pub(crate) fn split_child(&mut self, child_index: usize, config: &BTreeConfig) {
        let t = config.min_degree();
        let child = &mut self.children[child_index];
        debug_assert_eq!(child.entries.len(), config.max_keys(), "split of non-full node");

        let mut upper = child.entries.split_off(t - 1);
        let median = upper.remove(0);
        let right_children = if child.is_leaf {
            Vec::new()
        } else {
            child.children.split_off(t)
        };

        let right = Node {
            is_leaf: child.is_leaf,
            entries: upper,
            children: right_children,
        };

        debug_assert_eq!(child.entries.len(), config.min_keys());
        debug_assert_eq!(right.entries.len(), config.min_keys());
        tracing::trace!(
            child_index,
            leaf = right.is_leaf,
            parent_keys = self.entries.len() + 1,
            "split full child"
        );

        self.entries.insert(child_index, median);
        self.children.insert(child_index + 1, right);
    }
}

impl<K: Ord, V> Node<K, V> {
    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Recursively verify the subtree rooted here.
    ///
    /// `lower`/`upper` are the separators bounding this subtree (inclusive,
    /// since equal keys may sit on either side after a split). Returns the
    /// number of keys in the subtree.
    pub(crate) fn check(
        &self,
        config: &BTreeConfig,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<usize> {
        let is_root = depth == 0;
        let n = self.entries.len();

        if n > config.max_keys() {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} holds {} keys, max is {}",
                depth,
                n,
                config.max_keys()
            )));
        }
        if !is_root && n < config.min_keys() {
            return Err(Error::InvariantViolation(format!(
                "node at depth {} holds {} keys, min is {}",
                depth,
                n,
                config.min_keys()
            )));
        }

        if self.entries.windows(2).any(|w| w[0].0 > w[1].0) {
            return Err(Error::InvariantViolation(format!(
                "keys out of order in node at depth {}",
                depth
            )));
        }
        if let (Some(lo), Some((first, _))) = (lower, self.entries.first()) {
            if first < lo {
                return Err(Error::InvariantViolation(format!(
                    "key below lower separator at depth {}",
                    depth
                )));
            }
        }
        if let (Some(hi), Some((last, _))) = (upper, self.entries.last()) {
            if last > hi {
                return Err(Error::InvariantViolation(format!(
                    "key above upper separator at depth {}",
                    depth
                )));
            }
        }

        if self.is_leaf {
            if !self.children.is_empty() {
                return Err(Error::InvariantViolation(format!(
                    "leaf at depth {} has {} children",
                    depth,
                    self.children.len()
                )));
            }
            match *leaf_depth {
                None => *leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(Error::InvariantViolation(format!(
                        "leaf depth {} != {}",
                        depth, expected
                    )));
                }
                Some(_) => {}
            }
            return Ok(n);
        }

        if self.children.len() > config.max_children() {
            return Err(Error::InvariantViolation(format!(
                "internal node at depth {} has {} children, max is {}",
                depth,
                self.children.len(),
                config.max_children()
            )));
        }
        if self.children.len() != n + 1 {
            return Err(Error::InvariantViolation(format!(
                "internal node at depth {} has {} keys but {} children",
                depth,
                n,
                self.children.len()
            )));
        }

        let mut total = n;
        for (i, child) in self.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(&self.entries[i - 1].0) };
            let hi = if i == n { upper } else { Some(&self.entries[i].0) };
            total += child.check(config, depth + 1, leaf_depth, lo, hi)?;
        }
        Ok(total)
    }
}
