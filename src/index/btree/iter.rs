//! Lazy traversals over a B-tree.
//!
//! - [`Iter`] - in-order walk yielding entries in key order
//! - [`Traverse`] - pre-order walk yielding every node with its depth
//!
//! Both borrow the tree, so they cannot observe a concurrent insert.
//! Calling the constructor again restarts the walk from the root.

use std::iter::FusedIterator;

use crate::index::btree::node::Node;

/// In-order iterator over `(&K, &V)`.
///
/// Holds the root-to-current path on an explicit stack, one frame per
/// level, so memory use is bounded by the tree height.
pub struct Iter<'a, K, V> {
    /// (node, index of the next entry to yield in that node)
    stack: Vec<(&'a Node<K, V>, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    /// Push `node` and its leftmost descendants.
    fn descend_left(&mut self, mut node: &'a Node<K, V>) {
        loop {
            self.stack.push((node, 0));
            match node.children().first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(top) = self.stack.last_mut() {
            let (node, index) = *top;
            if index < node.len() {
                top.1 += 1;
                // Everything between this key and the next one lives in the
                // child to its right.
                if let Some(child) = node.children().get(index + 1) {
                    self.descend_left(child);
                }
                self.remaining = self.remaining.saturating_sub(1);
                let (k, v) = &node.entries()[index];
                return Some((k, v));
            }
            self.stack.pop();
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// Pre-order iterator over `(depth, &Node)`.
///
/// Visits a node, then each of its children left to right. The root is at
/// depth 0.
pub struct Traverse<'a, K, V> {
    stack: Vec<(usize, &'a Node<K, V>)>,
}

impl<'a, K, V> Traverse<'a, K, V> {
    pub(crate) fn new(root: &'a Node<K, V>) -> Self {
        Self {
            stack: vec![(0, root)],
        }
    }
}

impl<'a, K, V> Iterator for Traverse<'a, K, V> {
    type Item = (usize, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

impl<K, V> FusedIterator for Traverse<'_, K, V> {}
