//! Integration tests for the lock-wrapped B-tree.
//!
//! These verify that exclusive inserts and shared reads from several
//! threads leave a structurally valid tree behind.

use std::sync::{Arc, Barrier};
use std::thread;

use treeindex::SharedBTree;

/// Test concurrent writers inserting disjoint key ranges.
#[test]
fn test_concurrent_writers() {
    let tree = SharedBTree::new(3).unwrap();
    let mut handles = vec![];

    for i in 0..8u32 {
        let tree = tree.clone();
        handles.push(thread::spawn(move || {
            for j in 0..250u32 {
                let key = j * 8 + i;
                tree.insert(key, key * 2);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(tree.len(), 2000);
    tree.check_invariants().unwrap();

    let guard = tree.read();
    let keys: Vec<u32> = guard.keys().copied().collect();
    assert_eq!(keys, (0..2000).collect::<Vec<_>>());
    assert!(guard.iter().all(|(k, v)| *v == k * 2));
}

/// Test readers running alongside a writer.
#[test]
fn test_readers_during_writes() {
    let tree = SharedBTree::new(2).unwrap();
    for k in 0..100u64 {
        tree.insert(k, k);
    }

    let barrier = Arc::new(Barrier::new(5));
    let mut handles = vec![];

    let writer = tree.clone();
    let writer_barrier = Arc::clone(&barrier);
    handles.push(thread::spawn(move || {
        writer_barrier.wait();
        for k in 100..1100u64 {
            writer.insert(k, k);
        }
    }));

    for _ in 0..4 {
        let reader = tree.clone();
        let reader_barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            reader_barrier.wait();
            for round in 0..200u64 {
                // Keys inserted before the threads started are always visible.
                let k = round % 100;
                assert_eq!(reader.get(&k), Some(k));
                // Every snapshot a reader sees is a valid tree.
                if round % 50 == 0 {
                    reader.check_invariants().unwrap();
                }
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(tree.len(), 1100);
    tree.check_invariants().unwrap();
}

/// Test stats accuracy under concurrent load.
#[test]
fn test_stats_accuracy() {
    let tree = SharedBTree::new(2).unwrap();

    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let tree = tree.clone();
            thread::spawn(move || {
                for j in 0..100u32 {
                    tree.insert(i * 1000 + j, ());
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let stats = tree.stats();
    assert_eq!(stats.inserts, 400);
    assert_eq!(stats.root_splits as usize, tree.height() - 1);
    assert!(stats.node_splits >= stats.root_splits);
}
