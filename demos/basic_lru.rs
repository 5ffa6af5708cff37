use memokit::policy::lru::BoundedCache;

fn main() {
    let mut cache: BoundedCache<u32, String> = match BoundedCache::try_new(2) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };

    cache.insert(1, "alpha".to_string());
    cache.insert(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    cache.insert(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
    println!("mru -> lru: {:?}", cache.keys().collect::<Vec<_>>());
}

// Expected output:
// hit 1: alpha
// contains 2? false
// mru -> lru: [3, 1]
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Inserting key 3 evicts key 2, so contains(2) is false.
