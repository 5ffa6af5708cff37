#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::policy::lru::BoundedCache;

// Arbitrary operation sequences on BoundedCache. The first byte picks the
// capacity; every following pair is (op, key).
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 32) + 1;
    let mut cache: BoundedCache<u8, u32> = match BoundedCache::try_new(capacity) {
        Ok(cache) => cache,
        Err(_) => return,
    };
    let mut stamp = 0u32;

    for chunk in ops.chunks_exact(2) {
        let op = chunk[0] % 10;
        let key = chunk[1] % 64;
        stamp = stamp.wrapping_add(1);

        match op {
            0 | 1 => {
                let was_present = cache.contains(&key);
                let before = cache.len();
                let old = cache.insert(key, stamp);
                assert_eq!(old.is_some(), was_present);
                if was_present {
                    assert_eq!(cache.len(), before);
                }
                assert_eq!(cache.recency_rank(&key), Some(0));
            },
            2 => {
                let present = cache.contains(&key);
                assert_eq!(cache.get(&key).is_some(), present);
                if present {
                    assert_eq!(cache.keys().next(), Some(&key));
                }
            },
            3 => {
                let order: Vec<u8> = cache.keys().copied().collect();
                let _ = cache.peek(&key);
                let _ = cache.contains(&key);
                let after: Vec<u8> = cache.keys().copied().collect();
                assert_eq!(order, after);
            },
            4 => {
                let present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), present);
                assert!(!cache.contains(&key));
            },
            5 => {
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            },
            6 => {
                let present = cache.contains(&key);
                assert_eq!(cache.touch(&key), present);
            },
            7 => {
                let v = *cache.get_or_insert_with(key, || stamp);
                assert!(cache.contains(&key));
                assert!(v <= stamp);
            },
            8 => {
                if let Some(v) = cache.get_mut(&key) {
                    *v = stamp;
                }
            },
            9 => {
                cache.clear();
                assert!(cache.is_empty());
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        assert_eq!(cache.iter().count(), cache.len());
        #[cfg(debug_assertions)]
        cache.debug_validate_invariants();
    }
});
