//! Common types and utilities shared across treeindex.
//!
//! This module contains the primitives every index builds on:
//! - Configuration (degree bounds)
//! - Error types

pub mod config;
pub mod error;

pub use config::{BTreeConfig, DEFAULT_MIN_DEGREE, MAX_MIN_DEGREE, MIN_DEGREE_LOWER_BOUND};
pub use error::{Error, Result};
