//! # Bounded Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key/value store used to memoize derived values (formatted
//! labels, resolved URLs, parsed fragments) keyed by their inputs. When a new
//! key arrives at capacity, the entry that has gone longest without being
//! read or written is evicted.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      BoundedCache<K, V>                          │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  FxHashMap<K, SlotId>  (index)                           │   │
//!   │   │                                                          │   │
//!   │   │   "x" ──────────────┐                                    │   │
//!   │   │   "y" ────────┐     │                                    │   │
//!   │   │   "z" ──┐     │     │                                    │   │
//!   │   └─────────┼─────┼─────┼────────────────────────────────────┘   │
//!   │             ▼     ▼     ▼                                        │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │  IntrusiveList<Entry<K, V>>  (recency order)             │   │
//!   │   │                                                          │   │
//!   │   │  head ──► [z:3] ◄──► [y:2] ◄──► [x:1] ◄── tail           │   │
//!   │   │           MRU                   LRU                      │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries (key + value) live in the list's arena; the index maps each key to
//! its node's generation-checked [`SlotId`]. No raw pointers are involved.
//!
//! ## Operations Flow
//!
//! ```text
//!   insert(w) on a full cache (capacity = 3)
//!
//!     head ──► [z] ◄──► [y] ◄──► [x] ◄── tail
//!     1. pop [x] from tail, drop its index entry
//!     2. push [w] at head
//!     head ──► [w] ◄──► [z] ◄──► [y] ◄── tail
//!
//!   get(y)
//!
//!     1. index lookup: O(1)
//!     2. move node to head: O(1)
//!     head ──► [y] ◄──► [w] ◄──► [z] ◄── tail
//!
//!   contains(z) / peek(z)
//!
//!     index lookup only; order unchanged
//! ```
//!
//! ## Methods
//!
//! | Method                  | Complexity | Reorders | Description                       |
//! |-------------------------|------------|----------|-----------------------------------|
//! | `try_new(capacity)`     | O(1)       | -        | Fails on zero capacity            |
//! | `insert(k, v)`          | O(1)*      | yes      | Insert or update, may evict LRU   |
//! | `get(&k)`               | O(1)       | yes      | Read and promote to MRU           |
//! | `get_or_insert_with`    | O(1)*      | yes      | Memoize: compute on miss          |
//! | `peek(&k)`              | O(1)       | no       | Read without promoting            |
//! | `contains(&k)`          | O(1)       | no       | Presence check                    |
//! | `remove(&k)`            | O(1)       | no       | Delete one entry                  |
//! | `touch(&k)`             | O(1)       | yes      | Promote without reading           |
//! | `pop_lru()`             | O(1)       | -        | Remove the LRU entry              |
//! | `peek_lru()`            | O(1)       | no       | Inspect the LRU entry             |
//! | `recency_rank(&k)`      | O(n)       | no       | 0 = MRU                           |
//! | `clear()`               | O(n)       | -        | Drop everything, keep capacity    |
//!
//! ## Thread Safety
//!
//! - `BoundedCache`: **not** internally synchronized. Reads that promote
//!   (`get`, `touch`) need `&mut self`.
//! - `ConcurrentBoundedCache` (feature `concurrency`): wraps the core in a
//!   `parking_lot::RwLock` and hands out `Arc<V>` so values outlive eviction.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::mem;
use std::num::NonZeroUsize;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::builder::{BoundedCacheConfig, MAX_CAPACITY};
use crate::ds::{IntrusiveList, SlotId};
use crate::error::ConfigError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// Upper bound on slots reserved up front when preallocation is requested.
const PREALLOC_LIMIT: usize = 1 << 16;

const MAX_CAPACITY_NONZERO: NonZeroUsize = match NonZeroUsize::new(MAX_CAPACITY) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache.
///
/// # Example
///
/// ```
/// use memokit::policy::lru::BoundedCache;
///
/// let mut cache = BoundedCache::try_new(2).unwrap();
/// cache.insert("x", 1);
/// cache.insert("y", 2);
/// cache.insert("z", 3); // evicts "x"
///
/// assert!(!cache.contains("x"));
/// assert_eq!(cache.get("y"), Some(&2));
/// assert_eq!(cache.get("z"), Some(&3));
/// assert_eq!(cache.len(), 2);
/// ```
pub struct BoundedCache<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<Entry<K, V>>,
    capacity: NonZeroUsize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// Capacities above [`MAX_CAPACITY`] are clamped to it.
    pub fn new(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.min(MAX_CAPACITY_NONZERO);
        Self::with_reserved(capacity, capacity.get().min(PREALLOC_LIMIT))
    }

    /// Creates a cache, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArgument`] when `capacity == 0` or
    /// `capacity > MAX_CAPACITY`.
    ///
    /// ```
    /// use memokit::policy::lru::BoundedCache;
    ///
    /// assert!(BoundedCache::<u32, u32>::try_new(0).is_err());
    /// assert_eq!(BoundedCache::<u32, u32>::try_new(8).unwrap().capacity(), 8);
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_config(BoundedCacheConfig {
            capacity,
            ..BoundedCacheConfig::default()
        })
    }

    /// Creates a cache from an explicit configuration.
    pub fn with_config(config: BoundedCacheConfig) -> Result<Self, ConfigError> {
        let capacity = config.validate()?;
        let reserved = if config.preallocate {
            capacity.get().min(PREALLOC_LIMIT)
        } else {
            0
        };
        Ok(Self::with_reserved(capacity, reserved))
    }

    fn with_reserved(capacity: NonZeroUsize, reserved: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(reserved, Default::default()),
            order: IntrusiveList::with_capacity(reserved),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Returns the number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the maximum number of entries, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns `true` if the key exists. Does not update LRU order.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Gets a reference to a value and promotes the key to MRU.
    ///
    /// A missing key returns `None` and leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Gets a mutable reference to a value and promotes the key to MRU.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = match self.index.get(key) {
            Some(&id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.order.move_to_front(id);
        self.order.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Peeks at a value without updating LRU order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = *self.index.get(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        self.order.get(id).map(|entry| &entry.value)
    }

    /// Inserts a key-value pair, returning the previous value if the key existed.
    ///
    /// Updating an existing key replaces its value in place, promotes it to
    /// MRU and never evicts. A new key on a full cache evicts the LRU entry
    /// first.
    ///
    /// ```
    /// use memokit::policy::lru::BoundedCache;
    ///
    /// let mut cache = BoundedCache::try_new(2).unwrap();
    /// assert_eq!(cache.insert(1, "a"), None);
    /// assert_eq!(cache.insert(2, "b"), None);
    /// assert_eq!(cache.insert(1, "A"), Some("a"));
    ///
    /// cache.insert(3, "c"); // evicts 2, the LRU after 1 was refreshed
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.order.move_to_front(id);
            return self
                .order
                .get_mut(id)
                .map(|entry| mem::replace(&mut entry.value, value));
        }

        self.insert_new(key, value);
        None
    }

    /// Returns the cached value for `key`, computing and inserting it on a miss.
    ///
    /// A hit promotes the key exactly like [`get`](Self::get). A miss calls `f`
    /// once and inserts the result, evicting the LRU entry if needed.
    ///
    /// ```
    /// use memokit::policy::lru::BoundedCache;
    ///
    /// let mut calls = 0;
    /// let mut cache = BoundedCache::try_new(4).unwrap();
    /// for _ in 0..3 {
    ///     let len = *cache.get_or_insert_with("hello", || {
    ///         calls += 1;
    ///         "hello".len()
    ///     });
    ///     assert_eq!(len, 5);
    /// }
    /// assert_eq!(calls, 1);
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let id = match self.index.get(&key) {
            Some(&id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();

                self.order.move_to_front(id);
                id
            },
            None => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_get_miss();
                    self.metrics.record_insert_call();
                }
                self.insert_new(key, f())
            },
        };
        self.value_at(id)
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// If `f` fails nothing is inserted and the error is returned.
    pub fn try_get_or_insert_with<F, E>(&mut self, key: K, f: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let id = match self.index.get(&key) {
            Some(&id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();

                self.order.move_to_front(id);
                id
            },
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();

                let value = f()?;

                #[cfg(feature = "metrics")]
                self.metrics.record_insert_call();

                self.insert_new(key, value)
            },
        };
        Ok(self.value_at(id))
    }

    /// Removes a key from the cache, returning its value.
    ///
    /// The relative order of the remaining entries is unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }

    /// Moves an existing entry to MRU without reading it.
    ///
    /// Returns `true` if the key existed.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        match self.index.get(key) {
            Some(&id) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_found();

                self.order.move_to_front(id)
            },
            None => false,
        }
    }

    /// Removes and returns the least recently used entry.
    ///
    /// ```
    /// use memokit::policy::lru::BoundedCache;
    ///
    /// let mut cache = BoundedCache::try_new(10).unwrap();
    /// cache.insert(1, "one");
    /// cache.insert(2, "two");
    /// cache.get(&1);
    ///
    /// assert_eq!(cache.pop_lru(), Some((2, "two")));
    /// ```
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        self.order.back().map(|entry| {
            #[cfg(feature = "metrics")]
            self.metrics.record_peek_lru_found();

            (&entry.key, &entry.value)
        })
    }

    /// Position of `key` in recency order, 0 being most recently used.
    ///
    /// Walks the list from the head, so this is O(n).
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = *self.index.get(key)?;
        let rank = self.order.iter_entries().position(|(id, _)| {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            id == target
        });

        #[cfg(feature = "metrics")]
        if rank.is_some() {
            self.metrics.record_recency_rank_found();
        }

        rank
    }

    /// Removes all entries. Capacity is retained.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.index.clear();
        self.order.clear();
    }

    /// Iterates entries from most to least recently used without promoting.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.order.iter().map(|entry| (&entry.key, &entry.value))
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.order.iter().map(|entry| &entry.key)
    }

    /// Values from most to least recently used.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.order.iter().map(|entry| &entry.value)
    }

    /// Inserts a key known to be absent and returns its node id.
    fn insert_new(&mut self, key: K, value: V) -> SlotId {
        if self.index.len() >= self.capacity.get() {
            self.evict_one();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        id
    }

    fn evict_one(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if let Some(entry) = self.order.pop_back() {
            self.index.remove(&entry.key);

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();

            tracing::trace!(
                len = self.index.len(),
                capacity = self.capacity.get(),
                "evicted least recently used entry"
            );
        }
    }

    fn value_at(&self, id: SlotId) -> &V {
        match self.order.get(id) {
            Some(entry) => &entry.value,
            // every id handed out by insert_new or found in the index is live
            None => unreachable!("indexed slot {:?} missing from recency list", id),
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(self.index.len(), self.order.len());
        assert!(self.len() <= self.capacity());
        for (id, entry) in self.order.iter_entries() {
            assert_eq!(self.index.get(&entry.key), Some(&id));
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity.get())
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> fmt::Debug for BoundedCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Entries<'a, K, V>(&'a BoundedCache<K, V>);

        impl<K, V> fmt::Debug for Entries<'_, K, V>
        where
            K: Eq + Hash + Clone + fmt::Debug,
            V: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("BoundedCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("entries", &Entries(self))
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> CoreCache<K, V> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BoundedCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        BoundedCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BoundedCache::contains(self, key)
    }

    fn len(&self) -> usize {
        BoundedCache::len(self)
    }

    fn capacity(&self) -> usize {
        BoundedCache::capacity(self)
    }

    fn clear(&mut self) {
        BoundedCache::clear(self)
    }
}

impl<K, V> MutableCache<K, V> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        BoundedCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        BoundedCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        BoundedCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        BoundedCache::touch(self, key)
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        BoundedCache::recency_rank(self, key)
    }
}

/// Thread-safe [`BoundedCache`] behind a `parking_lot::RwLock`.
///
/// Values are stored as `Arc<V>` so a handle returned by `get` stays valid
/// after the entry is evicted. `get` and `touch` reorder the list and
/// therefore take the write lock; `peek`, `contains` and `len` only read.
///
/// ```
/// # #[cfg(feature = "concurrency")]
/// # {
/// use std::sync::Arc;
/// use std::thread;
/// use memokit::policy::lru::ConcurrentBoundedCache;
///
/// let cache = Arc::new(ConcurrentBoundedCache::try_new(64).unwrap());
/// let handles: Vec<_> = (0..4u64)
///     .map(|t| {
///         let cache = Arc::clone(&cache);
///         thread::spawn(move || {
///             cache.insert(t, t * 10);
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// assert_eq!(cache.len(), 4);
/// assert_eq!(cache.get(&2).as_deref(), Some(&20));
/// # }
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentBoundedCache<K, V> {
    inner: RwLock<BoundedCache<K, Arc<V>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentBoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: RwLock::new(BoundedCache::new(capacity)),
        }
    }

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        BoundedCache::try_new(capacity).map(Self::from_core)
    }

    pub fn with_config(config: BoundedCacheConfig) -> Result<Self, ConfigError> {
        BoundedCache::with_config(config).map(Self::from_core)
    }

    fn from_core(core: BoundedCache<K, Arc<V>>) -> Self {
        Self {
            inner: RwLock::new(core),
        }
    }

    /// Inserts a value, wrapping it in an `Arc`.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        self.insert_arc(key, Arc::new(value))
    }

    /// Inserts a value that is already shared.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.write().insert(key, value)
    }

    /// Gets a value and promotes it (write lock).
    pub fn get<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().get(key).cloned()
    }

    /// Gets a value without promoting it (read lock).
    pub fn peek<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().peek(key).cloned()
    }

    /// Memoizing lookup. `f` runs while the write lock is held.
    pub fn get_or_insert_with<F>(&self, key: K, f: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        let mut guard = self.inner.write();
        Arc::clone(guard.get_or_insert_with(key, || Arc::new(f())))
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains(key)
    }

    pub fn remove<Q>(&self, key: &Q) -> Option<Arc<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key)
    }

    pub fn touch<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().touch(key)
    }

    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lru()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentBoundedCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ConcurrentBoundedCache")
            .field("capacity", &inner.capacity())
            .field("len", &inner.len())
            .finish()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentBoundedCache<K, V>
where
    K: Send + Sync,
    V: Send + Sync,
{
}
