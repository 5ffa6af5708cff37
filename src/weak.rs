//! # Identity-Keyed Weak Association Cache
//!
//! Associates values with reference-counted objects without keeping those
//! objects alive. Entries are keyed by the address of the shared allocation,
//! not by the key's value: two `Rc`s with equal contents are different keys,
//! and clones of one `Rc` are the same key.
//!
//! ```text
//!   caller                         WeakAssociationCache
//!   ──────                         ─────────────────────────────────────────
//!   Rc<Node> ──strong──┐           FxHashMap<usize, WeakEntry>
//!                      ▼
//!              ┌──────────────┐    0x7f30 ──► { key: Weak<Node> ─┐, value }
//!              │ RcBox<Node>  │◄───────────────────────────────────┘
//!              │ strong: 1    │
//!              │ weak:   1    │    the Weak pins the allocation, so 0x7f30
//!              └──────────────┘    cannot be handed to another Node while
//!                                  the entry exists
//! ```
//!
//! ## Reclamation
//!
//! There is no garbage collector to drop entries behind the caller's back.
//! Once every strong reference to a key is gone the entry is *expired*: it
//! can no longer be looked up (nobody holds the key), and its value is
//! dropped on the next [`purge`](WeakAssociationCache::purge). `insert` also
//! purges on its own once the table has doubled since the last sweep, so a
//! cache that only ever inserts stays proportional to its live keys.
//!
//! ## Retain cycles
//!
//! A value must not hold a strong reference to its own key. The cache keeps
//! values alive, so such a value keeps the key alive, and the entry never
//! expires. This is not detected.
//!
//! ```
//! use std::rc::Rc;
//! use memokit::weak::WeakAssociationCache;
//!
//! let mut cache = WeakAssociationCache::new();
//! let key = Rc::new("config");
//!
//! // a value that captures its own key defeats weak keying
//! cache.insert(&key, Rc::clone(&key));
//! drop(key);
//! assert_eq!(cache.purge(), 0);
//! ```

use std::fmt;
use std::rc::{self, Rc};
use std::sync::{self, Arc};

use rustc_hash::FxHashMap;

/// Table size below which `insert` never sweeps.
const MIN_PURGE_THRESHOLD: usize = 32;

/// Reference-counted handles that can key a [`WeakAssociationCache`].
///
/// Plain values such as integers or strings do not implement this trait, so
/// using one as a key is rejected at compile time.
pub trait WeakKey {
    /// Non-owning handle stored by the cache.
    type Weak;

    fn downgrade(&self) -> Self::Weak;

    /// Address of the shared allocation. Stable for the allocation's lifetime.
    fn identity(&self) -> usize;

    /// `true` while at least one strong reference to the allocation remains.
    fn is_alive(weak: &Self::Weak) -> bool;
}

impl<T: ?Sized> WeakKey for Rc<T> {
    type Weak = rc::Weak<T>;

    fn downgrade(&self) -> Self::Weak {
        Rc::downgrade(self)
    }

    fn identity(&self) -> usize {
        Rc::as_ptr(self).cast::<()>() as usize
    }

    fn is_alive(weak: &Self::Weak) -> bool {
        weak.strong_count() > 0
    }
}

impl<T: ?Sized> WeakKey for Arc<T> {
    type Weak = sync::Weak<T>;

    fn downgrade(&self) -> Self::Weak {
        Arc::downgrade(self)
    }

    fn identity(&self) -> usize {
        Arc::as_ptr(self).cast::<()>() as usize
    }

    fn is_alive(weak: &Self::Weak) -> bool {
        weak.strong_count() > 0
    }
}

struct WeakEntry<K: WeakKey, V> {
    key: K::Weak,
    value: V,
}

/// Value store keyed by object identity, holding its keys weakly.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use memokit::weak::WeakAssociationCache;
///
/// struct Widget {
///     label: String,
/// }
///
/// let mut layout = WeakAssociationCache::new();
/// let button = Rc::new(Widget { label: "OK".into() });
///
/// layout.insert(&button, (120u32, 32u32));
/// assert_eq!(layout.get(&button), Some(&(120, 32)));
///
/// // equal contents, different allocation
/// let other = Rc::new(Widget { label: button.label.clone() });
/// assert!(!layout.contains(&other));
///
/// drop(button);
/// assert_eq!(layout.purge(), 1);
/// ```
pub struct WeakAssociationCache<K: WeakKey, V> {
    entries: FxHashMap<usize, WeakEntry<K, V>>,
    purge_threshold: usize,
}

impl<K: WeakKey, V> WeakAssociationCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            purge_threshold: MIN_PURGE_THRESHOLD,
        }
    }

    /// Returns the value associated with `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(&key.identity()).map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .get_mut(&key.identity())
            .map(|entry| &mut entry.value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(&key.identity())
    }

    /// Associates `value` with `key`, returning the value it replaces.
    ///
    /// Only a weak handle to `key` is kept.
    pub fn insert(&mut self, key: &K, value: V) -> Option<V> {
        let id = key.identity();
        if let Some(entry) = self.entries.get_mut(&id) {
            return Some(std::mem::replace(&mut entry.value, value));
        }

        self.maybe_purge();
        self.entries.insert(
            id,
            WeakEntry {
                key: key.downgrade(),
                value,
            },
        );
        None
    }

    /// Returns the value for `key`, computing it with `f` if absent.
    pub fn get_or_insert_with<F>(&mut self, key: &K, f: F) -> &V
    where
        F: FnOnce() -> V,
    {
        let id = key.identity();
        if !self.entries.contains_key(&id) {
            self.maybe_purge();
        }

        &self
            .entries
            .entry(id)
            .or_insert_with(|| WeakEntry {
                key: key.downgrade(),
                value: f(),
            })
            .value
    }

    /// Removes the association for `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries
            .remove(&key.identity())
            .map(|entry| entry.value)
    }

    /// Drops every entry whose key has no strong references left.
    ///
    /// Returns the number of entries reclaimed.
    pub fn purge(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| K::is_alive(&entry.key));
        let reclaimed = before - self.entries.len();

        self.purge_threshold = (self.entries.len() * 2).max(MIN_PURGE_THRESHOLD);

        if reclaimed > 0 {
            tracing::trace!(
                reclaimed,
                remaining = self.entries.len(),
                "purged expired weak associations"
            );
        }
        reclaimed
    }

    fn maybe_purge(&mut self) {
        if self.entries.len() >= self.purge_threshold {
            self.purge();
        }
    }
}

impl<K: WeakKey, V> Default for WeakAssociationCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: WeakKey, V> fmt::Debug for WeakAssociationCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakAssociationCache")
            .field("purge_threshold", &self.purge_threshold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts its own drops.
    struct DropProbe<'a>(&'a Cell<usize>);

    impl Drop for DropProbe<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn basic_get_set_has_delete() {
        let mut cache = WeakAssociationCache::new();
        let key = Rc::new(5u32);

        assert_eq!(cache.get(&key), None);
        assert_eq!(cache.insert(&key, "five"), None);
        assert!(cache.contains(&key));
        assert_eq!(cache.get(&key), Some(&"five"));

        assert_eq!(cache.insert(&key, "FIVE"), Some("five"));
        assert_eq!(cache.remove(&key), Some("FIVE"));
        assert_eq!(cache.remove(&key), None);
        assert!(!cache.contains(&key));
    }

    #[test]
    fn keys_compare_by_identity() {
        let mut cache = WeakAssociationCache::new();
        let a = Rc::new(String::from("same"));
        let b = Rc::new(String::from("same"));
        let a2 = Rc::clone(&a);

        cache.insert(&a, 1);
        assert!(cache.contains(&a2));
        assert!(!cache.contains(&b));
    }

    #[test]
    fn cache_does_not_keep_key_alive() {
        let mut cache = WeakAssociationCache::new();
        let key = Rc::new(vec![1, 2, 3]);
        cache.insert(&key, ());

        assert_eq!(Rc::strong_count(&key), 1);
        assert_eq!(Rc::weak_count(&key), 1);
    }

    #[test]
    fn purge_reclaims_dead_keys_and_drops_values() {
        let drops = Cell::new(0);
        let mut cache = WeakAssociationCache::new();

        let live = Rc::new(1);
        let dead = Rc::new(2);
        cache.insert(&live, DropProbe(&drops));
        cache.insert(&dead, DropProbe(&drops));

        drop(dead);
        assert_eq!(drops.get(), 0);

        assert_eq!(cache.purge(), 1);
        assert_eq!(drops.get(), 1);
        assert!(cache.contains(&live));
        assert_eq!(cache.purge(), 0);
    }

    #[test]
    fn remove_drops_value_immediately() {
        let drops = Cell::new(0);
        let mut cache = WeakAssociationCache::new();
        let key = Rc::new(());
        cache.insert(&key, DropProbe(&drops));

        drop(cache.remove(&key));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn insert_sweeps_once_table_grows() {
        let mut cache = WeakAssociationCache::new();
        for i in 0..(MIN_PURGE_THRESHOLD * 10) {
            let short_lived = Rc::new(i);
            cache.insert(&short_lived, i);
        }
        assert!(cache.entries.len() <= MIN_PURGE_THRESHOLD);
    }

    #[test]
    fn threshold_tracks_live_entries() {
        let mut cache = WeakAssociationCache::new();
        let keep: Vec<_> = (0..100).map(Rc::new).collect();
        for key in &keep {
            cache.insert(key, *key.as_ref());
        }
        cache.purge();
        assert_eq!(cache.purge_threshold, 200);
        assert_eq!(cache.entries.len(), 100);
    }

    #[test]
    fn get_or_insert_with_computes_once() {
        let mut cache = WeakAssociationCache::new();
        let key = Rc::new("k");
        let mut calls = 0;

        for _ in 0..3 {
            let v = *cache.get_or_insert_with(&key, || {
                calls += 1;
                42
            });
            assert_eq!(v, 42);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn get_mut_updates_value() {
        let mut cache = WeakAssociationCache::new();
        let key = Rc::new(0u8);
        cache.insert(&key, vec![1]);
        if let Some(v) = cache.get_mut(&key) {
            v.push(2);
        }
        assert_eq!(cache.get(&key), Some(&vec![1, 2]));
    }

    #[test]
    fn unsized_keys() {
        let mut cache = WeakAssociationCache::new();
        let key: Rc<str> = Rc::from("fragment");
        let slice: Arc<[u8]> = Arc::from(&b"abc"[..]);

        cache.insert(&key, key.len());
        assert_eq!(cache.get(&key), Some(&8));

        let mut arc_cache = WeakAssociationCache::new();
        arc_cache.insert(&slice, 3usize);
        assert!(arc_cache.contains(&slice));
    }

    #[test]
    fn arc_keys_expire() {
        let mut cache = WeakAssociationCache::new();
        let key = Arc::new(String::from("shared"));
        let clone = Arc::clone(&key);
        cache.insert(&key, 1);

        drop(key);
        assert_eq!(cache.purge(), 0);
        assert_eq!(cache.get(&clone), Some(&1));

        drop(clone);
        assert_eq!(cache.purge(), 1);
    }

    #[test]
    fn arc_flavour_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<WeakAssociationCache<Arc<String>, u64>>();
    }
}
