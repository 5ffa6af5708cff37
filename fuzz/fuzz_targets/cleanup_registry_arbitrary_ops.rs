#![no_main]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use memokit::cleanup::CleanupRegistry;

// Register/unregister/cleanup sequences. Each task records (name, generation)
// when it runs; only the latest registration of a name may ever run, and at
// most once.
fuzz_target!(|data: &[u8]| {
    std::panic::set_hook(Box::new(|_| {}));

    let runs: Rc<RefCell<Vec<(u8, u32)>>> = Rc::new(RefCell::new(Vec::new()));
    let mut registry = CleanupRegistry::new();
    let mut latest: BTreeMap<u8, u32> = BTreeMap::new();
    let mut generation = 0u32;

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 6;
        let name = chunk[1] % 16;
        let label = format!("t{}", name);
        generation += 1;

        match op {
            0 | 1 => {
                let runs = Rc::clone(&runs);
                let tag = generation;
                match (chunk[1] / 16) % 3 {
                    0 => registry.register(label, move || runs.borrow_mut().push((name, tag))),
                    1 => registry.register_fallible(label, move || {
                        runs.borrow_mut().push((name, tag));
                        Err::<(), _>("refused")
                    }),
                    _ => registry.register(label, move || {
                        runs.borrow_mut().push((name, tag));
                        panic!("task {} panicked", tag);
                    }),
                }
                latest.insert(name, tag);
            },
            2 => {
                let expected = latest.remove(&name);
                let before = runs.borrow().len();
                let outcome = registry.cleanup(&label);
                match expected {
                    Some(tag) => {
                        assert!(!matches!(outcome, Ok(false)));
                        assert_eq!(runs.borrow().last(), Some(&(name, tag)));
                    },
                    None => {
                        assert!(matches!(outcome, Ok(false)));
                        assert_eq!(runs.borrow().len(), before);
                    },
                }
            },
            3 => {
                assert_eq!(registry.unregister(&label), latest.remove(&name).is_some());
            },
            4 => {
                let before = runs.borrow().len();
                let report = registry.cleanup_all();
                assert_eq!(report.ran, latest.len());
                assert_eq!(runs.borrow().len(), before + latest.len());
                latest.clear();
            },
            5 => {
                assert_eq!(registry.contains(&label), latest.contains_key(&name));
            },
            _ => unreachable!(),
        }

        assert_eq!(registry.len(), latest.len());
    }

    let ran = runs.borrow();
    for (i, entry) in ran.iter().enumerate() {
        assert!(!ran[i + 1..].contains(entry), "task {:?} ran twice", entry);
    }
});
