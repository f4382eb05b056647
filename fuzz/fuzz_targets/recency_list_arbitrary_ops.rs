#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::{RecencyList, SlotId};

// Fuzz arbitrary link/unlink sequences on RecencyList.
//
// Detached entries stay allocated, so this also covers re-linking and
// double-detach/double-insert being refused.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 7;
        let value = u32::from(pair[1]);
        let pick = |ids: &[SlotId]| (!ids.is_empty()).then(|| ids[value as usize % ids.len()]);

        match op {
            0 => {
                let id = list.push_most_recent(value);
                ids.push(id);
                assert_eq!(list.most_recent().map(|(head, v)| (head, *v)), Some((id, value)));
            }
            1 => {
                if let Some(id) = pick(&ids) {
                    let was_linked = list.contains(id);
                    assert_eq!(list.detach(id), was_linked);
                    assert!(!list.contains(id));
                    assert!(!list.detach(id));
                }
            }
            2 => {
                if let Some(id) = pick(&ids) {
                    let was_linked = list.contains(id);
                    assert_eq!(list.insert_most_recent(id), !was_linked);
                    assert!(list.contains(id));
                    if !was_linked {
                        assert_eq!(list.most_recent().map(|(head, _)| head), Some(id));
                    }
                }
            }
            3 => {
                if let Some(id) = pick(&ids) {
                    if list.move_to_most_recent(id) {
                        assert_eq!(list.most_recent().map(|(head, _)| head), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            }
            4 => {
                let expected = list.least_recent().map(|(id, v)| (id, *v));
                let evicted = list.evict_least_recent();
                assert_eq!(evicted, expected.map(|(_, v)| v));
                if let Some((id, _)) = expected {
                    ids.retain(|other| *other != id);
                }
            }
            5 => {
                if let Some(id) = pick(&ids) {
                    let before = list.allocated();
                    assert!(list.remove(id).is_some());
                    assert_eq!(list.allocated(), before - 1);
                    ids.retain(|other| *other != id);
                }
            }
            6 => {
                let forward: Vec<SlotId> = list.iter_ids().collect();
                let mut backward: Vec<SlotId> = list.iter_ids().rev().collect();
                backward.reverse();
                assert_eq!(forward, backward);
                assert_eq!(forward.len(), list.len());
            }
            _ => unreachable!(),
        }

        assert!(list.len() <= list.allocated());
        assert_eq!(list.allocated(), ids.len());
        list.check_invariants().unwrap();
    }
});
