//! # Cache Trait Hierarchy
//!
//! Policy-agnostic contracts for bounded caches. Generic code that only needs
//! "put things in, get things out" takes a [`CoreCache`]; code that also
//! invalidates entries takes a [`MutableCache`]; code that inspects or drives
//! recency order takes an [`LruCacheTrait`].
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │  insert / get / contains / len          │
//!   │  is_empty / capacity / clear            │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │  remove / remove_batch                  │
//!   └──────────────────┬──────────────────────┘
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │  pop_lru / peek_lru / touch             │
//!   │  recency_rank                           │
//!   └─────────────────────────────────────────┘
//!
//!   ConcurrentCache: marker (Send + Sync) for internally locked caches
//! ```
//!
//! ## Thread Safety
//!
//! Implementations of these traits take `&mut self` for anything that
//! reorders entries and are **not** internally synchronized. The
//! `concurrency` feature adds
//! [`ConcurrentBoundedCache`](crate::policy::lru::ConcurrentBoundedCache),
//! which carries the [`ConcurrentCache`] marker instead.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use memokit::traits::CoreCache;
/// use memokit::policy::lru::BoundedCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = BoundedCache::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and `key` is new, one entry is evicted
    /// according to the cache's policy before the insert.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update eviction order. Use [`contains`](Self::contains) to test
    /// presence without side effects.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    fn capacity(&self) -> usize;

    /// Removes all entries. Capacity is unchanged.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use memokit::traits::{CoreCache, MutableCache};
/// use memokit::policy::lru::BoundedCache;
///
/// fn invalidate_keys<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = BoundedCache::try_new(100).unwrap();
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// cache.insert(3, "three".to_string());
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed. Other entries keep their
    /// relative order.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys, returning results in input order.
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }
}

/// LRU-specific operations that expose recency order.
///
/// # Example
///
/// ```
/// use memokit::traits::{CoreCache, LruCacheTrait};
/// use memokit::policy::lru::BoundedCache;
///
/// let mut cache = BoundedCache::try_new(3).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three");
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving value
/// assert!(cache.touch(&2)); // Now key 3 is LRU
///
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it or updating order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without reading it.
    ///
    /// Returns `true` if the key was present.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order (0 = MRU). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker for caches that synchronize internally and can be shared across
/// threads behind an `Arc`.
pub trait ConcurrentCache: Send + Sync {}
