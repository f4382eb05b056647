// ==============================================
// LRU BEHAVIOURAL SCENARIOS (integration)
// ==============================================
//
// Recorded get/put traces replayed against the public API, mirroring how a
// benchmark driver consumes the cache.

use lrukit::{ConfigError, LruCache};

#[derive(Debug, Clone, Copy)]
enum Step {
    Put(i32, i32),
    Get(i32, Option<i32>),
}

fn replay(capacity: usize, steps: &[Step]) -> LruCache<i32, i32> {
    let mut cache = LruCache::try_new(capacity).expect("valid capacity");
    for (i, step) in steps.iter().enumerate() {
        match *step {
            Step::Put(k, v) => cache.put(k, v),
            Step::Get(k, expected) => {
                assert_eq!(cache.get(&k).copied(), expected, "step {i}: get({k})");
            },
        }
        assert!(cache.len() <= capacity, "step {i}: len exceeded capacity");
        cache.check_invariants().unwrap();
    }
    cache
}

mod recorded_traces {
    use super::*;
    use super::Step::{Get, Put};

    #[test]
    fn capacity_two_evicts_untouched_key() {
        let cache = replay(
            2,
            &[
                Put(1, 1),
                Put(2, 2),
                Get(1, Some(1)),
                Put(3, 3),
                Get(2, None),
                Get(1, Some(1)),
                Get(3, Some(3)),
            ],
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn capacity_one_keeps_only_latest() {
        let cache = replay(1, &[Put(1, 1), Put(2, 2), Get(1, None), Get(2, Some(2))]);
        assert_eq!(cache.peek_lru(), Some((&2, &2)));
    }

    #[test]
    fn zero_capacity_produces_no_cache() {
        let result = LruCache::<i32, i32>::try_new(0);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidCapacity { requested: 0 })
        ));
    }

    #[test]
    fn classic_four_step_trace() {
        replay(
            2,
            &[
                Put(1, 1),
                Put(2, 2),
                Get(1, Some(1)),
                Put(3, 3),
                Get(2, None),
                Put(4, 4),
                Get(1, None),
                Get(3, Some(3)),
                Get(4, Some(4)),
            ],
        );
    }

    #[test]
    fn overwrite_refreshes_recency() {
        replay(
            2,
            &[
                Put(2, 1),
                Put(1, 1),
                Put(2, 3),
                Put(4, 1),
                Get(1, None),
                Get(2, Some(3)),
            ],
        );
    }
}

mod properties {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let mut cache = LruCache::try_new(3).unwrap();
        for k in 0..10 {
            cache.put(k, k * 7);
            assert_eq!(cache.get(&k), Some(&(k * 7)));
        }
    }

    #[test]
    fn overwrite_does_not_change_size() {
        let mut cache = LruCache::try_new(4).unwrap();
        cache.put("k", 1);
        cache.put("other", 0);
        let before = cache.len();
        cache.put("k", 2);
        assert_eq!(cache.len(), before);
        assert_eq!(cache.get("k"), Some(&2));
    }

    #[test]
    fn evicted_key_is_least_recently_touched() {
        let mut cache = LruCache::try_new(3).unwrap();
        cache.put('a', 0);
        cache.put('b', 0);
        cache.put('c', 0);
        // Touch order, oldest first: a(put) b(put) c(put) -> b(get) a(put) -> c is oldest.
        cache.get(&'b');
        cache.put('a', 1);
        assert_eq!(cache.push('d', 0), Some(('c', 0)));
        // Now oldest is b.
        assert_eq!(cache.push('e', 0), Some(('b', 0)));
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec!['e', 'd', 'a']);
    }

    #[test]
    fn miss_does_not_change_order() {
        let mut cache = LruCache::try_new(3).unwrap();
        cache.put(1, ());
        cache.put(2, ());
        let before: Vec<_> = cache.keys().copied().collect();
        assert_eq!(cache.get(&42), None);
        assert!(!cache.touch(&42));
        let after: Vec<_> = cache.keys().copied().collect();
        assert_eq!(before, after);
    }
}
