//! Integration tests for SharedBucketSet.
//!
//! These tests verify that the mutex-guarded set stays consistent when
//! several threads add, remove and iterate at the same time.

#![cfg(feature = "sync")]

use chainset::{BucketSet, SharedBucketSet};
use rstest::rstest;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

#[rstest]
fn test_disjoint_writers() {
    let set = Arc::new(SharedBucketSet::with_capacity(NonZeroUsize::new(16).unwrap()));

    let handles: Vec<_> = (0..4_i64)
        .map(|worker| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                for offset in 0..250 {
                    assert!(set.add(worker * 10_000 + offset));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(set.len(), 1_000);
    assert_eq!(set.keys().len(), 1_000);
}

#[rstest]
fn test_competing_writers_add_each_key_once() {
    let set = Arc::new(SharedBucketSet::new(8).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let set = Arc::clone(&set);
            thread::spawn(move || (0..100_i64).filter(|key| set.add(*key)).count())
        })
        .collect();

    let added: usize = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .sum();

    assert_eq!(added, 100);
    assert_eq!(set.len(), 100);
}

#[rstest]
fn test_readers_see_consistent_snapshots() {
    let set = Arc::new(SharedBucketSet::new(4).unwrap());

    let writer = {
        let set = Arc::clone(&set);
        thread::spawn(move || {
            for key in 0..500 {
                set.add(key);
                set.remove(key - 1);
            }
        })
    };

    let reader = {
        let set = Arc::clone(&set);
        thread::spawn(move || {
            for _ in 0..200 {
                set.with_set(|inner| assert_eq!(inner.iter().count(), inner.len()));
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(set.keys(), vec![499]);
}

#[rstest]
fn test_into_inner_after_threads() {
    let set = Arc::new(SharedBucketSet::from(BucketSet::from_keys(4, [1]).unwrap()));
    let handle = {
        let set = Arc::clone(&set);
        thread::spawn(move || set.add(2))
    };
    assert!(handle.join().unwrap());

    let set = Arc::try_unwrap(set).unwrap().into_inner();
    assert_eq!(set.to_string(), "[1] 1\n[2] 2\n");
}
