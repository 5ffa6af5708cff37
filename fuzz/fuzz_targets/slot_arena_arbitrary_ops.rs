#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::ds::{SlotArena, SlotId};

// Insert/remove/clear sequences on SlotArena. Every id ever issued is kept so
// stale lookups are exercised after slots get reused.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<u32> = SlotArena::new();
    let mut live: Vec<(SlotId, u32)> = Vec::new();
    let mut dead: Vec<SlotId> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let value = u32::from(chunk[1]);

        match op {
            0 | 1 => {
                let id = arena.insert(value);
                assert_eq!(arena.get(id), Some(&value));
                live.push((id, value));
            },
            2 => {
                if !live.is_empty() {
                    let (id, expected) = live.swap_remove(value as usize % live.len());
                    assert_eq!(arena.remove(id), Some(expected));
                    dead.push(id);
                }
            },
            3 => {
                if !live.is_empty() {
                    let i = value as usize % live.len();
                    if let Some(slot) = arena.get_mut(live[i].0) {
                        *slot = value;
                    }
                    live[i].1 = value;
                }
            },
            4 => {
                arena.clear();
                dead.extend(live.drain(..).map(|(id, _)| id));
            },
            _ => unreachable!(),
        }

        assert_eq!(arena.len(), live.len());
        for &(id, value) in &live {
            assert_eq!(arena.get(id), Some(&value));
        }
        for &id in &dead {
            assert!(!arena.contains(id));
            assert_eq!(arena.get(id), None);
        }
    }
});
