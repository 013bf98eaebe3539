//! Property tests for the B-tree.
//!
//! Random insert sequences (duplicates included) must always leave a tree
//! that is balanced, sorted and searchable.

use std::collections::BTreeSet;

use proptest::prelude::*;
use treeindex::BTree;

fn degree() -> impl Strategy<Value = usize> {
    2usize..=6
}

fn key_seq() -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(any::<i16>(), 0..400)
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_insert(t in degree(), keys in key_seq()) {
        let mut tree = BTree::new(t).unwrap();
        for (i, &k) in keys.iter().enumerate() {
            tree.insert(k, i);
            prop_assert!(tree.check_invariants().is_ok());
        }
        prop_assert_eq!(tree.len(), keys.len());
    }

    #[test]
    fn prop_in_order_traversal_is_sorted(t in degree(), keys in key_seq()) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().map(|&k| (k, ())));

        let walked: Vec<i16> = tree.keys().copied().collect();
        let mut expected = keys.clone();
        expected.sort();
        prop_assert_eq!(walked, expected);
    }

    #[test]
    fn prop_inserted_keys_are_found(t in degree(), keys in key_seq(), lookups in key_seq()) {
        let mut tree = BTree::new(t).unwrap();
        for &k in &keys {
            tree.insert(k, i32::from(k) * 2);
        }

        for &k in &keys {
            let hit = tree.search(&k);
            prop_assert!(hit.is_some());
            let hit = hit.unwrap();
            prop_assert_eq!(*hit.key(), k);
            prop_assert_eq!(*hit.value(), i32::from(k) * 2);
        }

        let present: BTreeSet<i16> = keys.iter().copied().collect();
        for p in lookups.iter().filter(|p| !present.contains(*p)) {
            prop_assert!(tree.search(p).is_none());
        }
    }

    #[test]
    fn prop_height_is_logarithmic(t in degree(), keys in key_seq()) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().map(|&k| (k, ())));

        let n = keys.len().max(1) as f64;
        let bound = (((n + 1.0) / 2.0).ln() / (t as f64).ln() + 1e-9).floor() as usize + 1;
        prop_assert!(tree.height() <= bound.max(1));
    }

    #[test]
    fn prop_leaves_share_depth(t in degree(), keys in key_seq()) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().map(|&k| (k, ())));

        let leaf_depths: BTreeSet<usize> = tree
            .traverse()
            .filter(|(_, node)| node.is_leaf())
            .map(|(depth, _)| depth)
            .collect();
        prop_assert_eq!(leaf_depths.len(), 1);
        prop_assert_eq!(leaf_depths.into_iter().next(), Some(tree.height() - 1));
    }

    #[test]
    fn prop_split_count_matches_node_count(t in degree(), keys in key_seq()) {
        let mut tree = BTree::new(t).unwrap();
        tree.extend(keys.iter().map(|&k| (k, ())));

        // Every node except the initial root came out of a split, and a root
        // split creates two (new root plus right half).
        let nodes = tree.traverse().count() as u64;
        let stats = tree.stats();
        prop_assert_eq!(nodes, 1 + stats.node_splits + stats.root_splits);
    }
}
