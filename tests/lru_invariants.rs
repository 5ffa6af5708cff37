// ==============================================
// BOUNDED LRU CACHE INVARIANT TESTS (integration)
// ==============================================
//
// Behavioral guarantees of BoundedCache exercised through the public API
// only: capacity bound, recency ordering, eviction choice, update-in-place
// and clear.

use memokit::builder::CacheBuilder;
use memokit::error::ConfigError;
use memokit::policy::lru::BoundedCache;
use memokit::traits::{CoreCache, LruCacheTrait, MutableCache};

// ==============================================
// Capacity Bound
// ==============================================

mod capacity_bound {
    use super::*;

    #[test]
    fn len_never_exceeds_capacity() {
        for capacity in [1usize, 2, 3, 7, 64] {
            let mut cache = BoundedCache::try_new(capacity).unwrap();
            for i in 0..(capacity * 5) {
                cache.insert(i, i.to_string());
                assert!(
                    cache.len() <= capacity,
                    "len {} exceeded capacity {}",
                    cache.len(),
                    capacity
                );
            }
            assert_eq!(cache.len(), capacity);
        }
    }

    #[test]
    fn zero_capacity_is_invalid_argument() {
        let err = BoundedCache::<&str, i32>::try_new(0).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidArgument {
                param: "capacity",
                reason: "must be greater than zero".to_string(),
            }
        );
        assert!(CacheBuilder::new(0).build::<&str, i32>().is_err());
    }
}

// ==============================================
// Eviction Order
// ==============================================

mod eviction_order {
    use super::*;

    #[test]
    fn get_refreshes_recency_before_eviction() {
        let mut cache = BoundedCache::try_new(3).unwrap();
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.get("a");
        cache.insert("d", 4);

        let mut keys: Vec<_> = cache.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "c", "d"]);
    }

    #[test]
    fn get_changes_order_but_contains_does_not() {
        let mut with_get = BoundedCache::try_new(2).unwrap();
        with_get.insert(1, ());
        with_get.insert(2, ());
        with_get.get(&1);
        with_get.insert(3, ());
        assert!(with_get.contains(&1));
        assert!(!with_get.contains(&2));

        let mut with_contains = BoundedCache::try_new(2).unwrap();
        with_contains.insert(1, ());
        with_contains.insert(2, ());
        assert!(with_contains.contains(&1));
        with_contains.insert(3, ());
        assert!(!with_contains.contains(&1));
        assert!(with_contains.contains(&2));
    }

    #[test]
    fn capacity_two_three_inserts() {
        let mut cache = BoundedCache::try_new(2).unwrap();
        cache.insert("x", 1);
        cache.insert("y", 2);
        cache.insert("z", 3);

        assert!(!cache.contains("x"));
        assert_eq!(cache.get("y"), Some(&2));
        assert_eq!(cache.get("z"), Some(&3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn missing_get_does_not_disturb_order() {
        let mut cache = BoundedCache::try_new(2).unwrap();
        cache.insert(1, 'a');
        cache.insert(2, 'b');
        assert_eq!(cache.get(&99), None);
        cache.insert(3, 'c');
        assert!(!cache.contains(&1));
    }

    #[test]
    fn recency_rank_matches_iteration_order() {
        let mut cache = BoundedCache::try_new(5).unwrap();
        for k in 0..5 {
            cache.insert(k, k);
        }
        cache.get(&2);
        cache.touch(&0);

        let order: Vec<_> = cache.keys().copied().collect();
        for (rank, key) in order.iter().enumerate() {
            assert_eq!(cache.recency_rank(key), Some(rank));
        }
        assert_eq!(order, vec![0, 2, 4, 3, 1]);
    }
}

// ==============================================
// Update In Place
// ==============================================

mod update_in_place {
    use super::*;

    #[test]
    fn update_at_capacity_evicts_nothing() {
        let mut cache = BoundedCache::try_new(3).unwrap();
        cache.insert(1, "one");
        cache.insert(2, "two");
        cache.insert(3, "three");

        assert_eq!(cache.insert(2, "TWO"), Some("two"));
        assert_eq!(cache.len(), 3);
        for key in 1..=3 {
            assert!(cache.contains(&key));
        }
        assert_eq!(cache.peek(&2), Some(&"TWO"));
    }
}

// ==============================================
// Clear
// ==============================================

mod clear {
    use super::*;

    #[test]
    fn clear_empties_and_every_key_misses() {
        let mut cache = BoundedCache::try_new(4).unwrap();
        for k in 0..4 {
            cache.insert(k, k * 10);
        }
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        for k in 0..4 {
            assert_eq!(cache.get(&k), None);
        }
        assert_eq!(cache.capacity(), 4);
    }
}

// ==============================================
// Trait Surface
// ==============================================

mod trait_surface {
    use super::*;

    fn memoize<C: CoreCache<u64, u64>>(cache: &mut C, n: u64) -> u64 {
        if let Some(v) = cache.get(&n) {
            return *v;
        }
        let v = n * n;
        cache.insert(n, v);
        v
    }

    #[test]
    fn generic_memoization_through_core_cache() {
        let mut cache = BoundedCache::try_new(8).unwrap();
        for n in [3, 4, 3, 5, 4] {
            assert_eq!(memoize(&mut cache, n), n * n);
        }
        assert_eq!(CoreCache::len(&cache), 3);
    }

    #[test]
    fn remove_batch_and_pop_lru() {
        let mut cache: BoundedCache<u32, u32> = BoundedCache::try_new(4).unwrap();
        for k in 0..4 {
            cache.insert(k, k);
        }
        let removed = MutableCache::remove_batch(&mut cache, &[1, 7]);
        assert_eq!(removed, vec![Some(1), None]);

        assert_eq!(LruCacheTrait::pop_lru(&mut cache), Some((0, 0)));
        assert_eq!(LruCacheTrait::peek_lru(&cache), Some((&2, &2)));
    }
}
