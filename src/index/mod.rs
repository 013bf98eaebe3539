//! Index structures.
//!
//! Currently implements:
//! - [`btree`] - In-memory B-tree

pub mod btree;
