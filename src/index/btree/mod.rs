//! B-tree index implementation.
//!
//! An in-memory multiway search tree that keeps every leaf at the same
//! depth. Nodes split on the way down during insertion, so an insert
//! touches each level once.
//!
//! # Components
//! - [`BTree`] - The tree controller (insert, search, traverse)
//! - [`Node`] - A node of sorted entries plus child subtrees
//! - [`SearchHit`] - Owning node and index returned by a search
//! - [`Iter`] / [`Traverse`] - In-order and pre-order walks
//! - [`TreeStats`] - Insert and split counters
//! - [`SharedBTree`] - Reader-writer locked tree for multi-threaded callers

mod iter;
mod node;
mod shared;
mod stats;
mod tree;

pub use iter::{Iter, Traverse};
pub use node::{Node, SearchHit};
pub use shared::SharedBTree;
pub use stats::TreeStats;
pub use tree::BTree;
