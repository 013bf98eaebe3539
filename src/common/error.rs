//! Error types for treeindex.

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in treeindex.
///
/// Inserts and lookups never fail, so this enum only covers configuration
/// mistakes and the diagnostic invariant checker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The minimum degree is outside `2..=MAX_MIN_DEGREE`.
    ///
    /// With `t = 1` a node could hold at most one key and a split would
    /// leave an empty half. Above the upper bound `2t` overflows `usize`.
    #[error(
        "Invalid minimum degree {min_degree}: must be between 2 and {max}",
        max = crate::common::config::MAX_MIN_DEGREE
    )]
    InvalidMinDegree { min_degree: usize },

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug - only [`check_invariants`] reports it.
    ///
    /// [`check_invariants`]: crate::BTree::check_invariants
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}
