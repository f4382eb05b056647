//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity key → value cache that evicts the entry whose last touch
//! (`get` or `put`) is oldest.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   ┌──────────────────────────────────────────────────────────────┐   │
//!   │   │  KeyIndex<K>  (FxHashMap<K, SlotId>)                         │   │
//!   │   │                                                              │   │
//!   │   │   ┌─────────┬──────────────────────────────────────────┐     │   │
//!   │   │   │   Key   │  SlotId                                  │     │   │
//!   │   │   ├─────────┼──────────────────────────────────────────┤     │   │
//!   │   │   │  "a"    │  ──────────────────────────────────┐     │     │   │
//!   │   │   │  "b"    │  ────────────────────────────┐     │     │     │   │
//!   │   │   └─────────┴──────────────────────────────┼─────┼─────┘     │   │
//!   │   └────────────────────────────────────────────┼─────┼───────────┘   │
//!   │                                                │     │               │
//!   │   ┌────────────────────────────────────────────┼─────┼───────────┐   │
//!   │   │  RecencyList<Entry<K, V>>                  ▼     ▼           │   │
//!   │   │                                                              │   │
//!   │   │  [head] ◄──► [b: 2] ◄──► [a: 1] ◄──► [tail]                  │   │
//!   │   │  sentinel     MRU          LRU       sentinel                │   │
//!   │   └──────────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries (key + value) live in the list's slot arena. The index maps a key
//! to the entry's `SlotId` handle, never to a copy of the entry.
//!
//! ## Operations Flow
//!
//! ```text
//!   put(D) on a full cache (capacity = 3)
//!   ═════════════════════════════════════════════════════════════════════
//!     Before:  head ─► [A] ◄──► [B] ◄──► [C] ◄─ tail
//!     1. evict [C] from the tail side; drop "C" from the index
//!     2. push [D] after head; index "D"
//!     After:   head ─► [D] ◄──► [A] ◄──► [B] ◄─ tail
//!
//!   get(B)
//!   ═════════════════════════════════════════════════════════════════════
//!     1. index lookup "B" → SlotId
//!     2. detach [B], splice it after head
//!     After:   head ─► [B] ◄──► [D] ◄──► [A] ◄─ tail
//! ```
//!
//! Eviction always runs before the new entry is created, so the index never
//! holds more than `capacity` keys, even mid-call.
//!
//! ## Methods
//!
//! | Method            | Complexity | Updates recency |
//! |-------------------|------------|-----------------|
//! | `try_new(cap)`    | O(1)       | -               |
//! | `get(&k)`         | O(1) avg   | yes             |
//! | `get_mut(&k)`     | O(1) avg   | yes             |
//! | `put(k, v)`       | O(1) avg   | yes             |
//! | `push(k, v)`      | O(1) avg   | yes             |
//! | `touch(&k)`       | O(1) avg   | yes             |
//! | `peek(&k)`        | O(1) avg   | no              |
//! | `contains(&k)`    | O(1) avg   | no              |
//! | `peek_lru()`      | O(1)       | no              |
//! | `peek_mru()`      | O(1)       | no              |
//! | `recency_rank(&k)`| O(n)       | no              |
//! | `iter()`          | O(n)       | no              |
//!
//! There is no `remove` or `clear`: entries are destroyed only by eviction.
//!
//! ## Thread Safety
//!
//! `LruCache` does no internal locking. Every mutating method takes
//! `&mut self`; to share a cache between threads, put it behind a lock and
//! hold the lock across each call:
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use lrukit::LruCache;
//!
//! let shared = Arc::new(Mutex::new(LruCache::<u32, u32>::try_new(64).unwrap()));
//! let worker = {
//!     let shared = Arc::clone(&shared);
//!     std::thread::spawn(move || shared.lock().put(1, 10))
//! };
//! worker.join().unwrap();
//! assert_eq!(shared.lock().get(&1), Some(&10));
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use lrukit::LruCache;
//!
//! let mut cache = LruCache::try_new(2).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//!
//! cache.put(3, "three"); // evicts 2, the least recently used
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some(&"one"));
//! assert_eq!(cache.get(&3), Some(&"three"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

use tracing::{debug, trace};

use crate::ds::key_index::KeyIndex;
use crate::ds::recency_list::{self, RecencyList};
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider};
use crate::traits::{CoreCache, LruCacheTrait};

/// One cached key/value pair. Its position is held by the recency list.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity least-recently-used cache.
///
/// See the [module documentation](self) for the layout and complexity table.
pub struct LruCache<K, V> {
    list: RecencyList<Entry<K, V>>,
    index: KeyIndex<K>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Example
    /// ```
    /// use std::num::NonZeroUsize;
    /// use lrukit::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(NonZeroUsize::new(100).unwrap());
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_prealloc(capacity, true)
    }

    /// Creates an empty cache, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Example
    /// ```
    /// use lrukit::{ConfigError, LruCache};
    ///
    /// assert!(LruCache::<u32, u32>::try_new(8).is_ok());
    /// assert_eq!(
    ///     LruCache::<u32, u32>::try_new(0).unwrap_err(),
    ///     ConfigError::InvalidCapacity { requested: 0 },
    /// );
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = validate_capacity(capacity)?;
        Ok(Self::new(capacity))
    }

    /// Creates an empty cache, optionally reserving storage for every entry
    /// up front.
    pub(crate) fn with_prealloc(capacity: NonZeroUsize, prealloc: bool) -> Self {
        let capacity = capacity.get();
        let (list, index) = if prealloc {
            (
                RecencyList::with_capacity(capacity),
                KeyIndex::with_capacity(capacity),
            )
        } else {
            (RecencyList::new(), KeyIndex::new())
        };
        debug!(capacity, prealloc, "created LRU cache");
        Self {
            list,
            index,
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.lookup_and_promote(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get) but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.lookup_and_promote(key)?;
        self.list.get_mut(id).map(|entry| &mut entry.value)
    }

    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// For a new key on a full cache, the least recently used entry is
    /// evicted first.
    #[inline]
    pub fn put(&mut self, key: K, value: V) {
        let _ = self.push(key, value);
    }

    /// Same as [`put`](Self::put), but reports what was displaced.
    ///
    /// - Existing key: returns the key with its previous value.
    /// - New key on a full cache: returns the evicted entry.
    /// - Otherwise `None`.
    ///
    /// # Example
    /// ```
    /// use lrukit::LruCache;
    ///
    /// let mut cache = LruCache::try_new(1).unwrap();
    /// assert_eq!(cache.push("a", 1), None);
    /// assert_eq!(cache.push("a", 2), Some(("a", 1)));
    /// assert_eq!(cache.push("b", 3), Some(("a", 2)));
    /// ```
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(id) = self.index.lookup(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let Some(entry) = self.list.get_mut(id) else {
                invariant_violation("index maps a key to a freed slot")
            };
            let previous = std::mem::replace(&mut entry.value, value);
            self.list.move_to_most_recent(id);
            self.debug_validate();
            return Some((key, previous));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let evicted = if self.index.len() >= self.capacity {
            Some(self.evict_least_recent())
        } else {
            None
        };

        let id = self.list.push_most_recent(Entry {
            key: key.clone(),
            value,
        });
        if self.index.insert(key, id).is_err() {
            invariant_violation("absent key was already indexed");
        }

        self.debug_validate();
        evicted
    }

    /// Marks `key` most recently used without reading it.
    ///
    /// Returns `false` if the key is absent.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let Some(id) = self.index.lookup(key) else {
            return false;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        self.list.move_to_most_recent(id)
    }

    /// Returns the value for `key` without updating recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns `true` if `key` is cached. Does not update recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains(key)
    }

    /// The entry that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list
            .least_recent()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    /// The most recently touched entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list
            .most_recent()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    /// Position of `key` in recency order, 0 being most recent. O(n).
    pub fn recency_rank<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.list.iter_ids().position(|candidate| candidate == id)
    }

    /// Iterates entries from most recent to least recent without touching
    /// them. Use `.rev()` for eviction order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterates keys from most recent to least recent.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Verifies that the index and the recency list describe the same set of
    /// entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but recency list links {} entries",
                self.index.len(),
                self.list.len()
            )));
        }
        if self.list.allocated() != self.list.len() {
            return Err(InvariantError::new(format!(
                "{} entries allocated but only {} linked",
                self.list.allocated(),
                self.list.len()
            )));
        }
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        for (rank, (id, entry)) in self.list.iter().enumerate() {
            if self.index.lookup(&entry.key) != Some(id) {
                return Err(InvariantError::new(format!(
                    "entry at recency rank {rank} ({id:?}) is not indexed under its key"
                )));
            }
        }
        Ok(())
    }

    fn lookup_and_promote<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(id) = self.index.lookup(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        if !self.list.move_to_most_recent(id) {
            invariant_violation("indexed entry is not linked into the recency list");
        }
        Some(id)
    }

    /// Removes the least recently used entry from both structures.
    ///
    /// Only called when `len == capacity >= 1`.
    fn evict_least_recent(&mut self) -> (K, V) {
        let Some(Entry { key, value }) = self.list.evict_least_recent() else {
            invariant_violation("eviction requested on an empty recency list")
        };
        if self.index.remove(&key).is_none() {
            invariant_violation("evicted key was not indexed");
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        trace!(
            len = self.index.len(),
            capacity = self.capacity,
            "evicted least recently used entry"
        );
        (key, value)
    }

    #[inline]
    fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            invariant_violation(err.message());
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Copies the current counters and size gauges.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }

    /// Zeroes every counter. Cached entries are kept.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// Rejects a zero capacity.
pub(crate) fn validate_capacity(capacity: usize) -> Result<NonZeroUsize, ConfigError> {
    NonZeroUsize::new(capacity).ok_or_else(|| {
        debug!(capacity, "rejected LRU cache capacity");
        ConfigError::InvalidCapacity {
            requested: capacity,
        }
    })
}

#[cold]
#[inline(never)]
#[track_caller]
fn invariant_violation(what: &str) -> ! {
    panic!("LruCache invariant violated: {what}")
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.list.len())
            .field(
                "entries",
                &DebugEntries {
                    list: &self.list,
                },
            )
            .finish()
    }
}

struct DebugEntries<'a, K, V> {
    list: &'a RecencyList<Entry<K, V>>,
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.list.iter().map(|(_, entry)| (&entry.key, &entry.value)))
            .finish()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&K, &V)` from most recent to least recent.
pub struct Iter<'a, K, V> {
    inner: recency_list::Iter<'a, Entry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn put(&mut self, key: K, value: V) {
        LruCache::put(self, key, value);
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LruCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn peek(&self, key: &K) -> Option<&V> {
        LruCache::peek(self, key)
    }

    #[inline]
    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }

    #[inline]
    fn recency_rank(&self, key: &K) -> Option<usize> {
        LruCache::recency_rank(self, key)
    }
}
