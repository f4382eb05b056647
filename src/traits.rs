//! # Cache Trait Hierarchy
//!
//! Small trait surface so callers can be generic over "an LRU cache" without
//! naming [`LruCache`](crate::LruCache) directly (test doubles, wrappers that
//! add locking, instrumentation shims).
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  put(&mut, K, V)                        │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   └──────────────────┬──────────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  peek(&, &K) → Option<&V>               │
//!   │  peek_lru(&) → Option<(&K, &V)>         │
//!   │  touch(&mut, &K) → bool                 │
//!   │  recency_rank(&, &K) → Option<usize>    │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! There is deliberately no `remove`/`pop`/`clear`: entries leave the cache
//! only through capacity eviction.
//!
//! ## Thread Safety
//!
//! Implementations are **not** internally synchronized. Wrap a cache in a
//! lock (e.g. `parking_lot::Mutex<C>`) and hold it across each call when
//! sharing between threads.

/// Core cache operations.
///
/// # Example
///
/// ```
/// use lrukit::traits::CoreCache;
/// use lrukit::LruCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.put(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(CoreCache::len(&cache), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// When a new key arrives at a full cache, the least recently used entry
    /// is evicted first.
    fn put(&mut self, key: K, value: V);

    /// Returns the value for `key`, marking it most recently used.
    ///
    /// A miss returns `None` and changes nothing.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating recency.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;
}

/// LRU-specific read and recency operations.
///
/// # Example
///
/// ```
/// use lrukit::traits::{CoreCache, LruCacheTrait};
/// use lrukit::LruCache;
///
/// let mut cache: LruCache<u64, &str> = LruCache::try_new(10).unwrap();
/// CoreCache::put(&mut cache, 1, "first");
/// CoreCache::put(&mut cache, 2, "second");
///
/// assert_eq!(LruCacheTrait::peek_lru(&cache).map(|(k, _)| *k), Some(1));
/// assert!(LruCacheTrait::touch(&mut cache, &1));
/// assert_eq!(LruCacheTrait::peek_lru(&cache).map(|(k, _)| *k), Some(2));
/// ```
pub trait LruCacheTrait<K, V>: CoreCache<K, V> {
    /// Returns the value for `key` without updating recency.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Returns the least recently used entry without updating recency.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as most recently used without reading it.
    ///
    /// Returns `false` if the key is absent.
    fn touch(&mut self, key: &K) -> bool;

    /// Position of `key` in recency order (0 = most recent).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Vec-backed reference implementation used to exercise the trait
    /// surface independently of `LruCache`.
    struct NaiveLru {
        capacity: usize,
        // front = most recent
        entries: VecDeque<(i32, String)>,
    }

    impl NaiveLru {
        fn position(&self, key: &i32) -> Option<usize> {
            self.entries.iter().position(|(k, _)| k == key)
        }
    }

    impl CoreCache<i32, String> for NaiveLru {
        fn put(&mut self, key: i32, value: String) {
            if let Some(pos) = self.position(&key) {
                self.entries.remove(pos);
            } else if self.entries.len() == self.capacity {
                self.entries.pop_back();
            }
            self.entries.push_front((key, value));
        }

        fn get(&mut self, key: &i32) -> Option<&String> {
            let pos = self.position(key)?;
            let entry = self.entries.remove(pos)?;
            self.entries.push_front(entry);
            self.entries.front().map(|(_, v)| v)
        }

        fn contains(&self, key: &i32) -> bool {
            self.position(key).is_some()
        }

        fn len(&self) -> usize {
            self.entries.len()
        }

        fn capacity(&self) -> usize {
            self.capacity
        }
    }

    impl LruCacheTrait<i32, String> for NaiveLru {
        fn peek(&self, key: &i32) -> Option<&String> {
            self.position(key).map(|pos| &self.entries[pos].1)
        }

        fn peek_lru(&self) -> Option<(&i32, &String)> {
            self.entries.back().map(|(k, v)| (k, v))
        }

        fn touch(&mut self, key: &i32) -> bool {
            self.get(key).is_some()
        }

        fn recency_rank(&self, key: &i32) -> Option<usize> {
            self.position(key)
        }
    }

    fn drive<C: LruCacheTrait<i32, String>>(cache: &mut C) -> Vec<Option<String>> {
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        let first = cache.get(&1).cloned();
        cache.put(3, "three".to_string());
        vec![first, cache.get(&2).cloned(), cache.peek(&3).cloned()]
    }

    #[test]
    fn trait_default_is_empty_uses_len() {
        let cache = NaiveLru {
            capacity: 2,
            entries: VecDeque::new(),
        };
        assert!(cache.is_empty());
    }

    #[test]
    fn generic_driver_observes_lru_eviction() {
        let mut naive = NaiveLru {
            capacity: 2,
            entries: VecDeque::new(),
        };
        let observed = drive(&mut naive);
        assert_eq!(
            observed,
            vec![Some("one".to_string()), None, Some("three".to_string())]
        );
        assert_eq!(naive.recency_rank(&1), Some(1));
        assert_eq!(naive.peek_lru().map(|(k, _)| *k), Some(1));
    }

    #[test]
    fn generic_driver_matches_lru_cache() {
        let mut naive = NaiveLru {
            capacity: 2,
            entries: VecDeque::new(),
        };
        let mut real: crate::LruCache<i32, String> = crate::LruCache::try_new(2).unwrap();
        assert_eq!(drive(&mut naive), drive(&mut real));
        assert_eq!(
            LruCacheTrait::recency_rank(&naive, &1),
            LruCacheTrait::recency_rank(&real, &1)
        );
    }
}
