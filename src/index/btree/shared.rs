//! SharedBTree - a B-tree that can be shared across threads.
//!
//! Inserts may restructure every node on the root-to-leaf path, root
//! included, so they hold the write lock for the whole call. Lookups only
//! need the read lock and run concurrently with each other.

use std::borrow::Borrow;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use crate::common::{BTreeConfig, Result};
use crate::index::btree::stats::TreeStats;
use crate::index::btree::tree::BTree;

/// A [`BTree`] behind a reader-writer lock.
///
/// Cloning is cheap: clones share the same tree.
///
/// # Usage
/// ```
/// use std::thread;
/// use treeindex::SharedBTree;
///
/// let tree = SharedBTree::new(3).unwrap();
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let tree = tree.clone();
///         thread::spawn(move || {
///             for i in 0..100 {
///                 tree.insert(t * 100 + i, i);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
pub struct SharedBTree<K, V> {
    inner: Arc<RwLock<BTree<K, V>>>,
}

impl<K: Ord, V> SharedBTree<K, V> {
    /// Create an empty shared tree with minimum degree `min_degree`.
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if `min_degree` is outside
    ///   `2..=MAX_MIN_DEGREE`
    pub fn new(min_degree: usize) -> Result<Self> {
        Ok(Self::from_tree(BTree::new(min_degree)?))
    }

    /// Create an empty shared tree from a validated configuration.
    pub fn with_config(config: BTreeConfig) -> Self {
        Self::from_tree(BTree::with_config(config))
    }

    /// Insert `(key, value)` under the write lock.
    pub fn insert(&self, key: K, value: V) {
        self.inner.write().insert(key, value);
    }

    /// Clone of the value stored under `key`, if any.
    ///
    /// The value is cloned so the read lock is released before returning.
    /// Use [`read`](Self::read) to borrow instead.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// Verify every structural invariant under the read lock.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` describing the first broken invariant
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.read().check_invariants()
    }
}

impl<K, V> SharedBTree<K, V> {
    /// Wrap an existing tree.
    pub fn from_tree(tree: BTree<K, V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tree)),
        }
    }

    /// Acquire the read lock for queries that borrow from the tree.
    ///
    /// Inserts from other handles block until the guard drops.
    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, BTree<K, V>> {
        self.inner.read()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Number of levels, counting the root.
    pub fn height(&self) -> usize {
        self.inner.read().height()
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> TreeStats {
        self.inner.read().stats()
    }
}

impl<K, V> Clone for SharedBTree<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K: Ord, V> Default for SharedBTree<K, V> {
    fn default() -> Self {
        Self::from_tree(BTree::default())
    }
}
