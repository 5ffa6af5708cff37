#![no_main]

use libfuzzer_sys::fuzz_target;
use memokit::ds::{IntrusiveList, SlotId};

// Arbitrary push/pop/move/remove sequences on IntrusiveList, checked against
// a Vec of ids in front-to-back order.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut model: Vec<SlotId> = Vec::new();
    let mut issued: Vec<SlotId> = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 8;
        let value = u32::from(chunk[1]);
        let pick = |ids: &[SlotId]| ids.get(value as usize % ids.len().max(1)).copied();

        match op {
            0 => {
                let id = list.push_front(value);
                model.insert(0, id);
                issued.push(id);
            },
            1 => {
                let id = list.push_back(value);
                model.push(id);
                issued.push(id);
            },
            2 => {
                let expected = (!model.is_empty()).then(|| model.remove(0));
                let front = list.front_id();
                assert_eq!(front, expected);
                assert_eq!(list.pop_front().is_some(), expected.is_some());
            },
            3 => {
                let expected = model.pop();
                assert_eq!(list.back_id(), expected);
                assert_eq!(list.pop_back().is_some(), expected.is_some());
            },
            4 => {
                if let Some(id) = pick(&issued) {
                    let live = model.iter().position(|&m| m == id);
                    assert_eq!(list.move_to_front(id), live.is_some());
                    if let Some(pos) = live {
                        model.remove(pos);
                        model.insert(0, id);
                    }
                }
            },
            5 => {
                if let Some(id) = pick(&issued) {
                    let live = model.iter().position(|&m| m == id);
                    assert_eq!(list.move_to_back(id), live.is_some());
                    if let Some(pos) = live {
                        model.remove(pos);
                        model.push(id);
                    }
                }
            },
            6 => {
                if let Some(id) = pick(&issued) {
                    let live = model.iter().position(|&m| m == id);
                    assert_eq!(list.remove(id).is_some(), live.is_some());
                    if let Some(pos) = live {
                        model.remove(pos);
                    }
                    assert!(!list.contains(id));
                }
            },
            7 => {
                list.clear();
                model.clear();
                for &id in &issued {
                    assert!(!list.contains(id));
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        let order: Vec<SlotId> = list.iter_entries().map(|(id, _)| id).collect();
        assert_eq!(order, model);
        #[cfg(debug_assertions)]
        list.debug_validate_invariants();
    }
});
