//! Configuration for treeindex.

use crate::common::{Error, Result};

/// Smallest legal minimum degree.
///
/// `t = 2` gives the 2-3-4 tree: nodes hold 1 to 3 keys.
pub const MIN_DEGREE_LOWER_BOUND: usize = 2;

/// Largest legal minimum degree.
///
/// A node holds up to `2t` children, and that count must fit in `usize`.
pub const MAX_MIN_DEGREE: usize = usize::MAX / 2;

/// Minimum degree used by [`BTreeConfig::default`].
///
/// Nodes hold 2 to 5 keys.
pub const DEFAULT_MIN_DEGREE: usize = 3;

/// Shape parameters of a B-tree.
///
/// The minimum degree `t` fixes every other bound:
///
/// | Bound            | Value    |
/// |------------------|----------|
/// | max keys / node  | `2t - 1` |
/// | min keys / node  | `t - 1`  |
/// | max children     | `2t`     |
///
/// The root is exempt from the lower bound.
///
/// # Example
/// ```
/// use treeindex::BTreeConfig;
///
/// let config = BTreeConfig::new(3).unwrap();
/// assert_eq!(config.max_keys(), 5);
/// assert_eq!(config.min_keys(), 2);
///
/// assert!(BTreeConfig::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BTreeConfig {
    min_degree: usize,
}

impl BTreeConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    /// - `Error::InvalidMinDegree` if `min_degree < 2`, or if `2t`
    ///   overflows `usize`
    pub fn new(min_degree: usize) -> Result<Self> {
        if min_degree < MIN_DEGREE_LOWER_BOUND || min_degree.checked_mul(2).is_none() {
            return Err(Error::InvalidMinDegree { min_degree });
        }
        Ok(Self { min_degree })
    }

    /// The minimum degree `t`.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Maximum keys any node may hold (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Minimum keys a non-root node must hold (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Maximum children an internal node may hold (`2t`).
    #[inline]
    pub fn max_children(&self) -> usize {
        2 * self.min_degree
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_degree_bounds() {
        let config = BTreeConfig::new(MIN_DEGREE_LOWER_BOUND).unwrap();
        assert_eq!(config.max_keys(), 3);
        assert_eq!(config.min_keys(), 1);
        assert_eq!(config.max_children(), 4);
    }

    #[test]
    fn test_rejects_small_degree() {
        assert_eq!(
            BTreeConfig::new(0),
            Err(Error::InvalidMinDegree { min_degree: 0 })
        );
        assert_eq!(
            BTreeConfig::new(1),
            Err(Error::InvalidMinDegree { min_degree: 1 })
        );
    }

    #[test]
    fn test_rejects_overflowing_degree() {
        let too_big = usize::MAX / 2 + 1;
        assert_eq!(
            BTreeConfig::new(too_big),
            Err(Error::InvalidMinDegree { min_degree: too_big })
        );
        assert!(BTreeConfig::new(usize::MAX).is_err());
    }

    #[test]
    fn test_largest_degree_bounds_do_not_overflow() {
        let config = BTreeConfig::new(MAX_MIN_DEGREE).unwrap();
        assert_eq!(config.max_children(), usize::MAX - 1);
        assert_eq!(config.max_keys(), usize::MAX - 2);
        assert_eq!(config.min_keys(), MAX_MIN_DEGREE - 1);
    }

    #[test]
    fn test_default_config() {
        let config = BTreeConfig::default();
        assert_eq!(config.min_degree(), DEFAULT_MIN_DEGREE);
        assert_eq!(config.max_keys(), 5);
        assert_eq!(config.min_keys(), 2);
    }

    #[test]
    fn test_max_keys_is_odd() {
        // Odd capacity means a full node always has a single median.
        for t in 2..32 {
            let config = BTreeConfig::new(t).unwrap();
            assert_eq!(config.max_keys() % 2, 1);
            assert_eq!(config.max_keys(), 2 * config.min_keys() + 1);
        }
    }
}
