#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::SlotArena;

// Fuzz arbitrary insert/remove/get_mut sequences on SlotArena.
//
// Freed slots are reused, so every live id must keep resolving to the value
// last written through it.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut live = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 4;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = arena.insert(value);
                assert!(!live.iter().any(|(other, _)| *other == id));
                live.push((id, value));
            }
            1 => {
                if !live.is_empty() {
                    let (id, expected) = live.swap_remove(value as usize % live.len());
                    assert_eq!(arena.remove(id), Some(expected));
                    assert!(!arena.contains(id));
                    assert_eq!(arena.remove(id), None);
                }
            }
            2 => {
                if !live.is_empty() {
                    let at = value as usize % live.len();
                    let id = live[at].0;
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                    }
                    live[at].1 = value;
                }
            }
            3 => {
                assert_eq!(arena.iter().count(), arena.len());
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        assert!(arena.slot_count() >= arena.len());
        for (id, expected) in &live {
            assert_eq!(arena.get(*id), Some(expected));
        }
    }
});
