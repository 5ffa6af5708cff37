// ==============================================
// CONCURRENT BOUNDED CACHE TESTS (integration)
// ==============================================
#![cfg(feature = "concurrency")]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use memokit::builder::CacheBuilder;
use memokit::policy::lru::ConcurrentBoundedCache;
use memokit::traits::ConcurrentCache;

fn assert_concurrent<C: ConcurrentCache>(_: &C) {}

#[test]
fn capacity_holds_under_contention() {
    let cache = Arc::new(ConcurrentBoundedCache::try_new(64).unwrap());
    assert_concurrent(&*cache);

    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..500 {
                    let key = thread_id * 1_000 + i;
                    cache.insert(key, key);
                    cache.get(&key);
                    assert!(cache.len() <= 64);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 64);
}

#[test]
fn get_or_insert_with_computes_once_per_key() {
    let cache = Arc::new(
        CacheBuilder::new(16)
            .build_concurrent::<u32, String>()
            .unwrap(),
    );
    let computations = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let computations = Arc::clone(&computations);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for key in 0..8u32 {
                    let value = cache.get_or_insert_with(key, || {
                        computations.fetch_add(1, Ordering::Relaxed);
                        format!("v{}", key)
                    });
                    assert_eq!(*value, format!("v{}", key));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(computations.load(Ordering::Relaxed), 8);
}

#[test]
fn handles_outlive_eviction() {
    let cache = ConcurrentBoundedCache::try_new(1).unwrap();
    cache.insert("a", vec![1, 2, 3]);
    let held = cache.get("a").unwrap();

    cache.insert("b", vec![4]);
    assert!(!cache.contains("a"));
    assert_eq!(*held, vec![1, 2, 3]);
}

#[test]
fn readers_and_writers_interleave() {
    let cache = Arc::new(ConcurrentBoundedCache::try_new(128).unwrap());
    for k in 0..128u64 {
        cache.insert(k, k);
    }

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut seen = 0;
                for k in 0..128u64 {
                    if let Some(v) = cache.peek(&k) {
                        assert_eq!(*v, k);
                        seen += 1;
                    }
                }
                seen
            })
        })
        .collect();

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for k in 0..128u64 {
                cache.touch(&k);
                cache.insert(k, k);
            }
        })
    };

    writer.join().unwrap();
    for reader in readers {
        assert_eq!(reader.join().unwrap(), 128);
    }
}
