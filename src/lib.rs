//! treeindex - An in-memory B-tree index with preemptive node splitting.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          treeindex                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Concurrency wrapper (index/btree/shared)        │   │
//! │  │     SharedBTree: RwLock, exclusive insert, shared read   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Tree controller (index/btree)               │   │
//! │  │   BTree: insert / search / iter / traverse / Display     │   │
//! │  │   TreeStats: insert and split counters                   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Node model (index/btree)                 │   │
//! │  │   sorted entries + owned children, split primitive       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                                                                 │
//! │  common/: BTreeConfig (degree bounds), Error, Result            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (configuration, Error)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use treeindex::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(key, key.to_string());
//! }
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![5, 6, 7, 10, 12, 17, 20, 30]);
//! assert_eq!(tree.get(&12).map(String::as_str), Some("12"));
//!
//! // Diagnostic dump, one line per node.
//! println!("{}", tree);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MIN_DEGREE, MAX_MIN_DEGREE, MIN_DEGREE_LOWER_BOUND};
pub use common::{BTreeConfig, Error, Result};

pub use index::btree::{BTree, Iter, Node, SearchHit, SharedBTree, Traverse, TreeStats};
