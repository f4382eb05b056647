#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use lrukit::LruCache;

// Fuzz arbitrary put/get/push/touch/peek sequences against a VecDeque model.
//
// First byte picks the capacity (1..=16); then each pair of bytes is
// (op, key). Keys are folded into a small space so hits and evictions
// both happen often.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap_byte % 16) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::try_new(capacity).unwrap();
    // front = most recent
    let mut model: VecDeque<(u8, u32)> = VecDeque::new();

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let op = pair[0] % 6;
        let key = pair[1] % 32;
        let value = step as u32;

        match op {
            0 | 1 => {
                // put / push
                let expected = if let Some(pos) = model.iter().position(|(k, _)| *k == key) {
                    model.remove(pos)
                } else if model.len() == capacity {
                    model.pop_back()
                } else {
                    None
                };
                model.push_front((key, value));

                if op == 0 {
                    cache.put(key, value);
                } else {
                    assert_eq!(cache.push(key, value), expected);
                }
            }
            2 => {
                // get
                let expected = model.iter().position(|(k, _)| *k == key).map(|pos| {
                    let entry = model.remove(pos).unwrap();
                    model.push_front(entry);
                    entry.1
                });
                assert_eq!(cache.get(&key).copied(), expected);
            }
            3 => {
                // touch
                let found = match model.iter().position(|(k, _)| *k == key) {
                    Some(pos) => {
                        let entry = model.remove(pos).unwrap();
                        model.push_front(entry);
                        true
                    }
                    None => false,
                };
                assert_eq!(cache.touch(&key), found);
            }
            4 => {
                // peek (read-only)
                let expected = model.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
                assert_eq!(cache.peek(&key).copied(), expected);
            }
            5 => {
                // recency order (read-only)
                let keys: Vec<u8> = cache.keys().copied().collect();
                let expected: Vec<u8> = model.iter().map(|(k, _)| *k).collect();
                assert_eq!(keys, expected);
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert_eq!(cache.len(), model.len());
    }

    cache.check_invariants().unwrap();
});
