// ==============================================
// EXTERNALLY SERIALIZED SHARING (integration)
// ==============================================
//
// LruCache has no internal locking. These tests share one cache between
// threads the supported way: a caller-held lock around every call.

use std::sync::Arc;
use std::thread;

use lrukit::LruCache;
use parking_lot::Mutex;

#[test]
fn mutex_wrapped_cache_respects_capacity_across_threads() {
    let capacity = 32;
    let cache = Arc::new(Mutex::new(LruCache::<u64, u64>::try_new(capacity).unwrap()));

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500u64 {
                    let key = t * 1_000 + (i % 64);
                    let mut guard = cache.lock();
                    guard.put(key, i);
                    assert!(guard.len() <= capacity);
                    if let Some(value) = guard.get(&key) {
                        assert_eq!(*value, i);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let guard = cache.lock();
    assert_eq!(guard.len(), capacity);
    guard.check_invariants().unwrap();
}

#[test]
fn lock_held_across_put_then_get_sees_own_write() {
    let cache = Arc::new(Mutex::new(LruCache::<u32, String>::try_new(1).unwrap()));

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..100 {
                    let mut guard = cache.lock();
                    guard.put(t, format!("thread-{t}"));
                    // Capacity one: our own put is the only entry while we hold the lock.
                    assert_eq!(guard.get(&t), Some(&format!("thread-{t}")));
                    assert_eq!(guard.len(), 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.lock().len(), 1);
}
